//! Sharing metadata (Open Graph, Twitter card and description tags)

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::SiteConfig;
use crate::content::Article;
use crate::helpers::{article_route, full_url_for, html_escape, is_external, meta_tag, take_chars};

/// Longest description derived from article text
const DESCRIPTION_CHARS: usize = 160;

const FALLBACK_DESCRIPTION: &str = "Latest technology news and analysis from Nigeria";

lazy_static! {
    static ref FIRST_IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\(([^)\s]+)\)").unwrap();
    static ref MARKDOWN_PUNCT: Regex = Regex::new(r"[#*\[\]()]").unwrap();
}

/// The discoverable metadata of the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    /// Open Graph type, `article` or `website`
    pub kind: String,
    pub site_name: String,
    pub twitter_card: String,
}

impl PageMetadata {
    /// Metadata of the home page
    pub fn site_default(config: &SiteConfig) -> Self {
        Self {
            title: config.home_title(),
            description: config.description.clone(),
            image: full_url_for(config, &config.default_image),
            url: full_url_for(config, ""),
            kind: "website".to_string(),
            site_name: config.title.clone(),
            twitter_card: "summary_large_image".to_string(),
        }
    }

    /// Metadata while `article` is the active view
    pub fn for_article(article: &Article, config: &SiteConfig) -> Self {
        Self {
            title: format!("{} | {}", article.title, config.title),
            description: article_description(article),
            image: article_image(article, config),
            url: full_url_for(config, &article_route(&article.slug)),
            kind: "article".to_string(),
            site_name: config.title.clone(),
            twitter_card: "summary_large_image".to_string(),
        }
    }

    /// Title shown in Open Graph and Twitter tags, without the site suffix
    pub fn headline(&self) -> &str {
        self.title
            .strip_suffix(&format!(" | {}", self.site_name))
            .unwrap_or(&self.title)
    }

    /// Render the `<title>` element and meta tags
    pub fn to_html(&self) -> String {
        let headline = self.headline();
        let tags = [
            ("description", self.description.as_str(), true),
            ("og:type", self.kind.as_str(), false),
            ("og:site_name", self.site_name.as_str(), false),
            ("og:title", headline, false),
            ("og:description", self.description.as_str(), false),
            ("og:image", self.image.as_str(), false),
            ("og:url", self.url.as_str(), false),
            ("twitter:card", self.twitter_card.as_str(), true),
            ("twitter:title", headline, true),
            ("twitter:description", self.description.as_str(), true),
            ("twitter:image", self.image.as_str(), true),
        ];

        let mut html = format!("<title>{}</title>\n", html_escape(&self.title));
        for (key, content, is_name) in tags {
            if content.is_empty() {
                continue;
            }
            html.push_str(&meta_tag(key, content, is_name));
            html.push('\n');
        }
        html
    }
}

/// Owner of the current page metadata
#[derive(Debug, Clone)]
pub struct DocumentHead {
    config: SiteConfig,
    current: PageMetadata,
    active: Option<String>,
}

impl DocumentHead {
    pub fn new(config: SiteConfig) -> Self {
        let current = PageMetadata::site_default(&config);
        Self {
            config,
            current,
            active: None,
        }
    }

    pub fn current(&self) -> &PageMetadata {
        &self.current
    }

    /// Slug of the article whose metadata is applied
    pub fn active_article(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Replace the metadata with values derived from `article`
    pub fn enter_article(&mut self, article: &Article) -> &PageMetadata {
        self.current = PageMetadata::for_article(article, &self.config);
        self.active = Some(article.slug.clone());
        &self.current
    }

    /// Revert to the site defaults
    pub fn exit_article(&mut self) -> &PageMetadata {
        self.current = PageMetadata::site_default(&self.config);
        self.active = None;
        &self.current
    }
}

fn article_description(article: &Article) -> String {
    if !article.excerpt.trim().is_empty() {
        return article.excerpt.clone();
    }

    let cleaned = MARKDOWN_PUNCT.replace_all(&article.content, "");
    let first_line = cleaned.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        FALLBACK_DESCRIPTION.to_string()
    } else {
        format!("{}...", take_chars(first_line, DESCRIPTION_CHARS))
    }
}

/// First image in the article body, as an absolute URL
fn article_image(article: &Article, config: &SiteConfig) -> String {
    let src = FIRST_IMAGE
        .captures(&article.content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .or(article.image.as_deref());

    match src {
        Some(src) if is_external(src) => src.to_string(),
        Some(src) if src.starts_with('/') => full_url_for(config, src),
        Some(src) => full_url_for(config, &format!("{}{}", config.asset_prefix(), src)),
        None => full_url_for(config, &config.default_image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArticleLoader;
    use crate::fetch::{DirFetcher, Fetch};
    use std::sync::Arc;

    fn build(slug: &str, raw: &str) -> Article {
        let loader = ArticleLoader::new(
            Arc::new(DirFetcher::new("unused")) as Arc<dyn Fetch>,
            SiteConfig::default(),
        );
        loader.build_article(slug, raw)
    }

    #[test]
    fn test_site_default() {
        let meta = PageMetadata::site_default(&SiteConfig::default());
        assert_eq!(meta.title, "CyberHost Nigeria | Nigeria's Tech News Hub");
        assert_eq!(meta.image, "https://cyberhostnigeria.com.ng/default-og-image.jpg");
        assert_eq!(meta.url, "https://cyberhostnigeria.com.ng");
        assert_eq!(meta.kind, "website");
        assert!(meta.description.starts_with("Your premier source"));
    }

    #[test]
    fn test_for_article_uses_excerpt_and_first_image() {
        let article = build(
            "5g",
            "---\ntitle: 5G Coverage\nexcerpt: Half the country is covered.\n---\n\
             Intro.\n\n![Tower](/articles/images/5g.jpg)\n\n![Other](other.jpg)",
        );
        let meta = PageMetadata::for_article(&article, &SiteConfig::default());
        assert_eq!(meta.title, "5G Coverage | CyberHost Nigeria");
        assert_eq!(meta.headline(), "5G Coverage");
        assert_eq!(meta.description, "Half the country is covered.");
        assert_eq!(meta.image, "https://cyberhostnigeria.com.ng/articles/images/5g.jpg");
        assert_eq!(meta.url, "https://cyberhostnigeria.com.ng/#/article/5g");
        assert_eq!(meta.kind, "article");
    }

    #[test]
    fn test_description_from_content() {
        let long = "x".repeat(200);
        let article = build("a", &format!("# Big [news]({})\nsecond line", long));
        let meta = PageMetadata::for_article(&article, &SiteConfig::default());
        assert!(meta.description.starts_with("Big news"));
        assert_eq!(meta.description.chars().count(), 163);
        assert!(meta.description.ends_with("..."));
    }

    #[test]
    fn test_relative_and_missing_images() {
        let config = SiteConfig::default();
        let relative = build("a", "![pic](images/a.png)");
        assert_eq!(
            PageMetadata::for_article(&relative, &config).image,
            "https://cyberhostnigeria.com.ng/articles/images/a.png"
        );

        let none = build("b", "No pictures here");
        assert_eq!(
            PageMetadata::for_article(&none, &config).image,
            "https://cyberhostnigeria.com.ng/default-og-image.jpg"
        );
    }

    #[test]
    fn test_to_html_escapes() {
        let article = build("q", "---\ntitle: Tom & \"Jerry\" Live\n---\nBody");
        let html = PageMetadata::for_article(&article, &SiteConfig::default()).to_html();
        assert!(html.contains("<title>Tom &amp; &quot;Jerry&quot; Live | CyberHost Nigeria</title>"));
        assert!(html.contains(r#"<meta property="og:title" content="Tom &amp; &quot;Jerry&quot; Live">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
    }

    #[test]
    fn test_enter_and_exit() {
        let mut head = DocumentHead::new(SiteConfig::default());
        let default = head.current().clone();

        let article = build("rtx", "---\ntitle: RTX\n---\nBody");
        head.enter_article(&article);
        assert_eq!(head.active_article(), Some("rtx"));
        assert_eq!(head.current().title, "RTX | CyberHost Nigeria");

        head.exit_article();
        assert_eq!(head.active_article(), None);
        assert_eq!(head.current(), &default);
    }
}
