//! Generate static social preview pages
//!
//! Every catalog article gets `<public_dir>/<slug>.html`: a page carrying only
//! sharing metadata, which crawlers read and browsers leave for the in-app
//! article view.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::loader::validate_slug;
use crate::content::ArticleSummary;
use crate::helpers::{article_route, full_date, full_url_for, html_escape, share_url};
use crate::Newsdesk;

/// User agents that get the static page instead of the redirect
const CRAWLER_PATTERN: &str = "bot|crawler|spider|facebook|twitter|whatsapp|telegram|linkedin";

/// Redirect delay for visitors the crawler check lets through
const FALLBACK_REDIRECT_MS: u32 = 3000;

/// A page written by the generator
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub slug: String,
    pub path: PathBuf,
    pub share_url: String,
}

/// Generate a page for every article in the catalog
///
/// Pages are only written for the real catalog. When it cannot be loaded
/// the failure is logged and nothing is written.
pub async fn run(app: &Newsdesk) -> Result<Vec<GeneratedPage>> {
    let articles = match app.loader()?.fetch_index().await {
        Ok(articles) => articles,
        Err(e) => {
            tracing::error!("Error generating social pages: {}", e);
            return Ok(Vec::new());
        }
    };

    println!("Generating social sharing pages...\n");
    let pages = write_pages(app, &articles)?;
    println!("\nGenerated {} social sharing pages!", pages.len());

    Ok(pages)
}

/// Write one page per article into the public directory
pub fn write_pages(app: &Newsdesk, articles: &[ArticleSummary]) -> Result<Vec<GeneratedPage>> {
    fs::create_dir_all(&app.public_dir)
        .with_context(|| format!("Failed to create {:?}", app.public_dir))?;

    let mut pages = Vec::with_capacity(articles.len());
    for article in articles {
        if let Err(e) = validate_slug(&article.slug) {
            tracing::warn!("Skipping social page: {}", e);
            continue;
        }
        let path = app.public_dir.join(format!("{}.html", article.slug));
        let html = render_page(&app.config, article);
        fs::write(&path, html).with_context(|| format!("Failed to write {:?}", path))?;

        let share_url = share_url(&app.config, &article.slug);
        println!("Generated: {}", path.display());
        println!("   Share URL: {}", share_url);
        tracing::debug!("Wrote social page for {}", article.slug);

        pages.push(GeneratedPage {
            slug: article.slug.clone(),
            path,
            share_url,
        });
    }

    Ok(pages)
}

/// Render the preview page for one article
pub fn render_page(config: &SiteConfig, article: &ArticleSummary) -> String {
    let title = html_escape(&article.title);
    let description = html_escape(&page_description(config, article));
    let author = html_escape(&article.author);
    let date = article
        .published_at()
        .map(|d| full_date(&d))
        .or_else(|| article.published.clone())
        .unwrap_or_default();
    let image = html_escape(&page_image(config, article));
    let page_url = html_escape(&share_url(config, &article.slug));
    let site_name = html_escape(&config.title);
    let route = article_route(&article.slug);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">

    <!-- Primary Meta Tags -->
    <title>{title} | {site_name}</title>
    <meta name="description" content="{description}">

    <!-- Open Graph -->
    <meta property="og:type" content="article">
    <meta property="og:site_name" content="{site_name}">
    <meta property="og:title" content="{title}">
    <meta property="og:description" content="{description}">
    <meta property="og:image" content="{image}">
    <meta property="og:url" content="{page_url}">

    <!-- Twitter -->
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{title}">
    <meta name="twitter:description" content="{description}">
    <meta name="twitter:image" content="{image}">

    <script>
        const userAgent = navigator.userAgent.toLowerCase();
        const isCrawler = /{crawlers}/i.test(userAgent);

        if (!isCrawler) {{
            window.location.replace('{route}');
        }}
    </script>
</head>
<body style="font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px;">
    <h1>{title}</h1>
    <img src="{image}"
         alt="{title}"
         style="width: 100%; max-width: 600px; height: auto;">
    <p><strong>By {author} | {date}</strong></p>
    <p>{description}</p>
    <p><a href="{route}" style="color: #2563eb;">Continue reading the full article &rarr;</a></p>

    <script>
        setTimeout(() => {{
            window.location.replace('{route}');
        }}, {delay});
    </script>
</body>
</html>
"#,
        title = title,
        site_name = site_name,
        description = description,
        image = image,
        page_url = page_url,
        crawlers = CRAWLER_PATTERN,
        route = route,
        author = author,
        date = html_escape(&date),
        delay = FALLBACK_REDIRECT_MS,
    )
}

fn page_description(config: &SiteConfig, article: &ArticleSummary) -> String {
    if article.excerpt.trim().is_empty() {
        config.description.clone()
    } else {
        article.excerpt.clone()
    }
}

fn page_image(config: &SiteConfig, article: &ArticleSummary) -> String {
    match article.image.as_deref() {
        Some(image) if !image.is_empty() => full_url_for(config, image),
        _ => full_url_for(config, &config.default_image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn article() -> ArticleSummary {
        ArticleSummary::from_record(json!({
            "slug": "critical-ncc-response",
            "title": "Critical Response to the Allegations Against the NCC",
            "excerpt": "A measured, evidence-based response's overdue.",
            "author": "Maryam Kourrah",
            "published": "2025-05-24T09:00:00Z",
            "image": "/articles/images/ncc-headquarters-abuja.jpg"
        }))
        .unwrap()
    }

    #[test]
    fn test_render_page() {
        let html = render_page(&SiteConfig::default(), &article());

        assert!(html.contains(
            "<title>Critical Response to the Allegations Against the NCC | CyberHost Nigeria</title>"
        ));
        assert!(html.contains(
            r#"<meta property="og:image" content="https://cyberhostnigeria.com.ng/articles/images/ncc-headquarters-abuja.jpg">"#
        ));
        assert!(html.contains(
            r#"<meta property="og:url" content="https://cyberhostnigeria.com.ng/critical-ncc-response">"#
        ));
        assert!(html.contains("response&#39;s overdue"));
        assert!(html.contains("By Maryam Kourrah | May 24, 2025"));
        assert!(html.contains("window.location.replace('/#/article/critical-ncc-response');"));
        assert!(html.contains("/bot|crawler|spider|facebook|twitter|whatsapp|telegram|linkedin/i"));
        assert!(html.contains("}, 3000);"));
    }

    #[test]
    fn test_defaults_without_image_or_excerpt() {
        let article = ArticleSummary::from_record(json!({"slug": "x", "title": "X"})).unwrap();
        let html = render_page(&SiteConfig::default(), &article);
        assert!(html.contains("https://cyberhostnigeria.com.ng/default-og-image.jpg"));
        assert!(html.contains("Your premier source for technology news"));
    }

    #[test]
    fn test_write_pages() {
        let dir = TempDir::new().unwrap();
        let app = Newsdesk::new(dir.path()).unwrap();

        let unsafe_slug =
            ArticleSummary::from_record(json!({"slug": "../escape", "title": "Escape"})).unwrap();
        let pages = write_pages(&app, &[article(), unsafe_slug]).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(!dir.path().join("escape.html").exists());
        assert_eq!(
            pages[0].path,
            dir.path().join("public/critical-ncc-response.html")
        );
        assert_eq!(
            pages[0].share_url,
            "https://cyberhostnigeria.com.ng/critical-ncc-response"
        );
        let written = fs::read_to_string(&pages[0].path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_run_uses_local_catalog() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public/articles")).unwrap();
        fs::write(
            dir.path().join("public/articles/index.json"),
            r#"[{"slug": "one", "title": "One"}, {"slug": "two", "title": "Two"}]"#,
        )
        .unwrap();

        let app = Newsdesk::new(dir.path()).unwrap();
        let pages = run(&app).await.unwrap();
        let slugs: Vec<_> = pages.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["one", "two"]);
        assert!(dir.path().join("public/two.html").exists());
    }

    #[tokio::test]
    async fn test_run_without_catalog_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let app = Newsdesk::new(dir.path()).unwrap();

        let pages = run(&app).await.unwrap();
        assert!(pages.is_empty());
        assert!(!dir.path().join("public/ncc-outage-compensation.html").exists());
        let written = fs::read_dir(&app.public_dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(written, 0);
    }
}
