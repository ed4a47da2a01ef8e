//! Markdown rendering into styled article markup
//!
//! The renderer is a small line-oriented parser rather than a CommonMark
//! implementation. Its public entry point never fails: a fault while
//! rendering produces a visible diagnostic block instead.

mod blocks;
mod inline;
mod style;

pub use inline::InlineRenderer;

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

use crate::helpers::{html_escape, strip_scripts, take_chars};

/// Characters of raw input shown in the diagnostic block
const ERROR_PREVIEW_CHARS: usize = 500;

lazy_static! {
    static ref TAG_OPEN: Regex = Regex::new(r"(?is)<[a-z].*>").unwrap();
}

/// A fault raised while producing markup
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write markup: {0}")]
    Format(#[from] fmt::Error),
    #[error("renderer panicked: {0}")]
    Panicked(String),
}

/// Markdown renderer producing inline-styled HTML
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    inline: InlineRenderer,
    class_name: String,
    standalone: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("/articles/", "", true)
    }

    /// Create with custom settings
    ///
    /// `standalone` adds the centered page-width container classes.
    pub fn with_options(asset_prefix: &str, class_name: &str, standalone: bool) -> Self {
        Self {
            inline: InlineRenderer::new(asset_prefix),
            class_name: class_name.to_string(),
            standalone,
        }
    }

    /// Render article content to an `<article>` element
    ///
    /// Empty content renders to nothing. Content that is already markup is
    /// passed through with script blocks removed.
    pub fn render(&self, content: &str) -> String {
        if content.is_empty() {
            return String::new();
        }

        if looks_like_html(content) {
            tracing::debug!("Content is already markup, skipping markdown parsing");
            return format!(
                r#"<article class="{}"><div>{}</div></article>"#,
                self.container_class("max-w-4xl mx-auto p-8"),
                strip_scripts(content)
            );
        }

        self.render_markdown(content, |text| self.render_fragment(text))
    }

    /// Wrap the fragment produced by `fragment`, or show the diagnostic block
    fn render_markdown<F>(&self, content: &str, fragment: F) -> String
    where
        F: FnOnce(&str) -> Result<String, RenderError>,
    {
        match fragment(content) {
            Ok(html) => format!(
                r#"<article class="{}"><div style="{}">{}</div></article>"#,
                self.container_class("max-w-4xl mx-auto px-6 py-8"),
                style::BODY,
                html
            ),
            Err(e) => {
                tracing::error!("Markdown processing failed: {}", e);
                self.error_block(content)
            }
        }
    }

    /// Render markdown to block markup without the article container
    pub fn render_fragment(&self, content: &str) -> Result<String, RenderError> {
        let inline = &self.inline;
        guarded(|| blocks::render_blocks(content, inline))
    }

    /// Diagnostic shown in place of content that could not be rendered
    pub fn error_block(&self, content: &str) -> String {
        let preview = html_escape(take_chars(content, ERROR_PREVIEW_CHARS));
        format!(
            concat!(
                r#"<div class="{}"><div style="{}">"#,
                r#"<h3 style="{}">Content Error</h3>"#,
                r#"<p style="{}">Failed to render this content. Please check the format.</p>"#,
                r#"<details><summary style="{}">Show raw content</summary>"#,
                r#"<pre style="{}">{}...</pre></details></div></div>"#,
            ),
            self.container_class("max-w-4xl mx-auto p-8"),
            style::ERROR_PANEL,
            style::ERROR_TITLE,
            style::ERROR_TEXT,
            style::ERROR_SUMMARY,
            style::ERROR_PREVIEW,
            preview
        )
    }

    fn container_class(&self, standalone_classes: &str) -> String {
        if self.standalone {
            format!("{} {}", standalone_classes, self.class_name)
                .trim()
                .to_string()
        } else {
            self.class_name.clone()
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a rendering step, turning a panic into a [`RenderError`]
fn guarded<F>(step: F) -> Result<String, RenderError>
where
    F: FnOnce() -> Result<String, fmt::Error>,
{
    match panic::catch_unwind(AssertUnwindSafe(step)) {
        Ok(result) => Ok(result?),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(RenderError::Panicked(message))
        }
    }
}

/// Whether text is already markup: an opening tag somewhere and at least
/// one closing tag. A lone `<` or `a < b` in prose does not qualify.
pub fn looks_like_html(text: &str) -> bool {
    text.contains("</") && TAG_OPEN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.starts_with(r#"<article class="max-w-4xl mx-auto px-6 py-8"><div style="#));
        assert!(html.contains(">Hello World</h1>"));
        assert!(html.contains(">This is a test.</p>"));
        assert!(html.ends_with("</div></article>"));
    }

    #[test]
    fn test_empty_content_renders_nothing() {
        assert_eq!(MarkdownRenderer::new().render(""), "");
    }

    #[test]
    fn test_container_classes() {
        let embedded = MarkdownRenderer::with_options("/articles/", "prose", false);
        assert!(embedded.render("text").starts_with(r#"<article class="prose">"#));

        let standalone = MarkdownRenderer::with_options("/articles/", "prose", true);
        assert!(standalone
            .render("text")
            .starts_with(r#"<article class="max-w-4xl mx-auto px-6 py-8 prose">"#));
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<p>Already <b>markup</b></p>"));
        assert!(looks_like_html("<DIV>\nmulti\nline\n</DIV>"));
        assert!(!looks_like_html("Use a <br> tag for breaks"));
        assert!(!looks_like_html("if a < b and c > d then </ is odd"));
        assert!(!looks_like_html("plain prose"));
    }

    #[test]
    fn test_html_passthrough_strips_scripts() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<p>Hi</p><script>steal()</script><p>**not md**</p>");
        assert!(html.contains("<p>Hi</p><p>**not md**</p>"));
        assert!(!html.contains("script"));
        assert!(html.starts_with(r#"<article class="max-w-4xl mx-auto p-8">"#));
    }

    #[test]
    fn test_partial_tags_in_prose_are_escaped() {
        let html = MarkdownRenderer::new().render("Compare <b> with nothing else");
        assert!(html.contains("Compare &lt;b&gt; with nothing else"));
    }

    #[test]
    fn test_error_block_preview_is_truncated_and_escaped() {
        let raw = format!("<x>{}", "a".repeat(600));
        let html = MarkdownRenderer::new().error_block(&raw);
        assert!(html.contains("Content Error"));
        assert!(html.contains("<details>"));
        let expected = format!("&lt;x&gt;{}...</pre>", "a".repeat(497));
        assert!(html.contains(&expected));
    }

    #[test]
    fn test_render_shows_error_block_on_write_failure() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render_markdown("# Broken", |_| guarded(|| Err(fmt::Error)));
        assert!(html.contains("Content Error"));
        assert!(html.contains("# Broken...</pre>"));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_render_shows_error_block_on_panic() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render_markdown("| a |\n| - |", |_| {
            guarded(|| panic!("table state lost"))
        });
        assert!(html.contains("Content Error"));
        assert!(html.contains("Show raw content"));

        let err = guarded(|| panic!("table state lost")).unwrap_err();
        assert!(matches!(err, RenderError::Panicked(ref m) if m == "table state lost"));
    }

    #[test]
    fn test_render_fragment_has_no_container() {
        let html = MarkdownRenderer::new().render_fragment("text").unwrap();
        assert!(html.starts_with("<p "));
    }
}
