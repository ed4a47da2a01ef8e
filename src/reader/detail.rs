//! Article detail view

use std::sync::Arc;

use super::meta::{DocumentHead, PageMetadata};
use crate::config::SiteConfig;
use crate::content::{Article, MarkdownRenderer};
use crate::helpers::{full_date, html_escape};

/// The article currently requested and, once loaded, shown
///
/// Loads may finish out of order. A result is applied only if its slug is
/// still the one requested, so a slow load never replaces a newer article.
#[derive(Debug, Clone)]
pub struct DetailView {
    head: DocumentHead,
    renderer: MarkdownRenderer,
    requested: Option<String>,
    article: Option<Arc<Article>>,
}

impl DetailView {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            head: DocumentHead::new(config.clone()),
            renderer: MarkdownRenderer::with_options(&config.asset_prefix(), "", true),
            requested: None,
            article: None,
        }
    }

    /// Start showing `slug`; the previous article is cleared
    pub fn navigate(&mut self, slug: &str) {
        tracing::debug!("Navigating to article {}", slug);
        self.requested = Some(slug.to_string());
        self.article = None;
    }

    /// Apply a finished load. Returns false when the result is stale.
    pub fn apply_loaded(&mut self, article: Arc<Article>) -> bool {
        if self.requested.as_deref() != Some(article.slug.as_str()) {
            tracing::debug!(
                "Discarding stale result for {} (showing {:?})",
                article.slug,
                self.requested
            );
            return false;
        }

        self.head.enter_article(&article);
        self.article = Some(article);
        true
    }

    /// Leave the detail view and restore the site metadata
    pub fn leave(&mut self) {
        self.requested = None;
        self.article = None;
        self.head.exit_article();
    }

    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn article(&self) -> Option<&Arc<Article>> {
        self.article.as_ref()
    }

    /// Still waiting for the requested article
    pub fn is_loading(&self) -> bool {
        self.requested.is_some() && self.article.is_none()
    }

    pub fn metadata(&self) -> &PageMetadata {
        self.head.current()
    }

    /// Rendered article body
    pub fn render_body(&self) -> Option<String> {
        self.article
            .as_ref()
            .map(|article| self.renderer.render(&article.content))
    }

    /// A complete HTML document for the shown article
    pub fn render_document(&self) -> Option<String> {
        let article = self.article.as_ref()?;
        let body = self.renderer.render(&article.content);

        let mut byline = Vec::new();
        if !article.author.is_empty() {
            byline.push(format!("By {}", html_escape(&article.author)));
        }
        byline.push(full_date(&article.published_date));
        byline.push(html_escape(&article.read_time));

        let category = if article.category.is_empty() {
            String::new()
        } else {
            format!(
                "<p class=\"category\">{}</p>\n",
                html_escape(&article.category)
            )
        };

        Some(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{meta}</head>
<body>
<header class="max-w-4xl mx-auto px-6 pt-8">
{category}<h1>{title}</h1>
<p>{byline}</p>
</header>
{body}
</body>
</html>
"#,
            meta = self.metadata().to_html(),
            category = category,
            title = html_escape(&article.title),
            byline = byline.join(" | "),
            body = body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArticleLoader;
    use crate::fetch::{DirFetcher, Fetch};

    fn build(slug: &str, raw: &str) -> Arc<Article> {
        let loader = ArticleLoader::new(
            Arc::new(DirFetcher::new("unused")) as Arc<dyn Fetch>,
            SiteConfig::default(),
        );
        Arc::new(loader.build_article(slug, raw))
    }

    #[test]
    fn test_applies_matching_result() {
        let mut view = DetailView::new(&SiteConfig::default());
        view.navigate("a");
        assert!(view.is_loading());

        assert!(view.apply_loaded(build("a", "---\ntitle: A\n---\nHello")));
        assert!(!view.is_loading());
        assert_eq!(view.metadata().title, "A | CyberHost Nigeria");
        assert!(view.render_body().unwrap().contains(">Hello</p>"));
    }

    #[test]
    fn test_discards_stale_result() {
        let mut view = DetailView::new(&SiteConfig::default());
        view.navigate("a");
        view.navigate("b");

        assert!(!view.apply_loaded(build("a", "late")));
        assert!(view.article().is_none());
        assert_eq!(view.metadata().kind, "website");

        assert!(view.apply_loaded(build("b", "current")));
        assert_eq!(view.article().unwrap().slug, "b");
    }

    #[test]
    fn test_result_after_leaving_is_ignored() {
        let mut view = DetailView::new(&SiteConfig::default());
        view.navigate("a");
        view.leave();
        assert!(!view.apply_loaded(build("a", "late")));
        assert_eq!(
            view.metadata().title,
            "CyberHost Nigeria | Nigeria's Tech News Hub"
        );
    }

    #[test]
    fn test_leave_restores_site_metadata() {
        let mut view = DetailView::new(&SiteConfig::default());
        view.navigate("a");
        view.apply_loaded(build("a", "---\ntitle: A\n---\nHello"));
        view.leave();
        assert_eq!(view.metadata().kind, "website");
        assert!(view.render_document().is_none());
    }

    #[test]
    fn test_render_document() {
        let mut view = DetailView::new(&SiteConfig::default());
        view.navigate("a");
        view.apply_loaded(build(
            "a",
            "---\ntitle: A & B\nauthor: Munira Audu\ncategory: Hardware\npublished: 2025-05-24\n---\n# Heading\n\nText",
        ));

        let html = view.render_document().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &amp; B | CyberHost Nigeria</title>"));
        assert!(html.contains("<h1>A &amp; B</h1>"));
        assert!(html.contains("By Munira Audu | May 24, 2025 | 1 min read"));
        assert!(html.contains(r#"<p class="category">Hardware</p>"#));
        assert!(html.contains(">Heading</h1>"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
