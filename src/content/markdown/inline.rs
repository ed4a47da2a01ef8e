//! Inline markdown: images, links, code spans, emphasis, strikethrough

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::style;
use crate::helpers::html_escape;

lazy_static! {
    static ref IMAGE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
    static ref CODE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref BOLD_ITALIC: Regex = Regex::new(r"\*\*\*([^*]+)\*\*\*").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*([^*\s][^*]*[^*\s]|\S)\*").unwrap();
    static ref STRIKE: Regex = Regex::new(r"~~([^~]+)~~").unwrap();
}

/// Renders the inline part of a single line
#[derive(Debug, Clone)]
pub struct InlineRenderer {
    asset_prefix: String,
}

impl InlineRenderer {
    /// `asset_prefix` is prepended to relative image paths, e.g. `/articles/`
    pub fn new(asset_prefix: &str) -> Self {
        let mut asset_prefix = asset_prefix.to_string();
        if !asset_prefix.ends_with('/') {
            asset_prefix.push('/');
        }
        Self { asset_prefix }
    }

    /// Escape the text, then apply each inline rule over the whole string.
    /// Images go before links so `![a](b)` is never read as a link.
    pub fn render(&self, text: &str) -> String {
        let result = html_escape(text);

        let result = IMAGE.replace_all(&result, |caps: &Captures| {
            let alt = caps[1].trim();
            let alt = if alt.is_empty() { "Image" } else { alt };
            let src = self.resolve_image_src(caps[2].trim());
            format!(
                r#"<img src="{}" alt="{}" style="{}" loading="lazy" />"#,
                src,
                alt,
                style::IMAGE
            )
        });

        let result = LINK.replace_all(&result, |caps: &Captures| {
            let text = caps[1].trim();
            let url = caps[2].trim();
            let target = if url.starts_with("http") {
                r#" target="_blank" rel="noopener noreferrer""#
            } else {
                ""
            };
            format!(
                r#"<a href="{}" style="{}"{}>{}</a>"#,
                url,
                style::LINK,
                target,
                text
            )
        });

        let result = CODE.replace_all(
            &result,
            format!(r#"<code style="{}">${{1}}</code>"#, style::INLINE_CODE).as_str(),
        );

        let result = BOLD_ITALIC.replace_all(
            &result,
            format!(
                r#"<strong style="{}"><em style="{}">${{1}}</em></strong>"#,
                style::STRONG,
                style::EM
            )
            .as_str(),
        );
        let result = BOLD.replace_all(
            &result,
            format!(r#"<strong style="{}">${{1}}</strong>"#, style::STRONG).as_str(),
        );
        let result = ITALIC.replace_all(
            &result,
            format!(r#"<em style="{}">${{1}}</em>"#, style::EM).as_str(),
        );

        let result = STRIKE.replace_all(
            &result,
            format!(r#"<del style="{}">${{1}}</del>"#, style::DEL).as_str(),
        );

        result.into_owned()
    }

    /// Full URLs, data URIs and site-absolute paths are used as given
    fn resolve_image_src(&self, src: &str) -> String {
        if src.starts_with("http") || src.starts_with("data:") || src.starts_with('/') {
            src.to_string()
        } else {
            format!("{}{}", self.asset_prefix, src)
        }
    }
}

impl Default for InlineRenderer {
    fn default() -> Self {
        Self::new("/articles/")
    }
}
