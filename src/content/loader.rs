//! Article loader - fetches the catalog and individual articles
//!
//! The public entry points never fail. A catalog that cannot be loaded is
//! replaced by a built-in sample list, and an article that cannot be loaded
//! becomes a placeholder article flagged with `error`.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use thiserror::Error;

use super::article::{reading_minutes, word_count, Article, ArticleSummary};
use super::frontmatter::{format_number, FrontMatter, FrontValue, Metadata};
use crate::config::SiteConfig;
use crate::fetch::{Fetch, FetchError};
use crate::helpers::parse_date;

/// Failure to load the catalog or an article
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid article data format: catalog is not a list")]
    NotAList,
    #[error("no valid articles found")]
    Empty,
    #[error("invalid article slug: {0:?}")]
    InvalidSlug(String),
}

/// Loads the catalog and articles from a [`Fetch`] source
#[derive(Clone)]
pub struct ArticleLoader {
    fetcher: Arc<dyn Fetch>,
    config: SiteConfig,
}

impl ArticleLoader {
    /// Create a new article loader
    pub fn new(fetcher: Arc<dyn Fetch>, config: SiteConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Load the catalog, falling back to the built-in sample list on any failure
    pub async fn load_index(&self) -> Vec<ArticleSummary> {
        match self.fetch_index().await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!("Error loading article index: {}", e);
                tracing::warn!("Falling back to sample articles");
                sample_articles()
            }
        }
    }

    /// Load the catalog, newest first, reporting failures
    pub async fn fetch_index(&self) -> Result<Vec<ArticleSummary>, LoadError> {
        let path = self.config.index_path();
        tracing::debug!("Loading article index from {}", path);

        let text = self.fetcher.fetch_text(&path).await?;
        let articles = parse_index(&text)?;

        tracing::info!("Loaded {} articles from index", articles.len());
        Ok(articles)
    }

    /// Load one article; failures produce a placeholder article
    pub async fn load_article(&self, slug: &str) -> Article {
        match self.fetch_article(slug).await {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!("Error loading article {}: {}", slug, e);
                if matches!(&e, LoadError::Fetch(fe) if fe.is_not_found()) {
                    tracing::warn!(
                        "Article file not found: /{}",
                        self.config.article_path(slug)
                    );
                }
                self.placeholder(slug, &e.to_string())
            }
        }
    }

    /// Load one article, reporting failures
    pub async fn fetch_article(&self, slug: &str) -> Result<Article, LoadError> {
        validate_slug(slug)?;

        let path = self.config.article_path(slug);
        let raw = self.fetcher.fetch_text(&path).await?;
        tracing::debug!("Loaded article {} ({} bytes)", slug, raw.len());

        Ok(self.build_article(slug, &raw))
    }

    /// Turn raw article text into an article record
    pub fn build_article(&self, slug: &str, raw: &str) -> Article {
        let (fm, body) = FrontMatter::parse(raw);
        let mut metadata = fm.into_metadata();
        let body = body.trim();

        let (content, error) = if body.is_empty() {
            tracing::warn!("Article {} has no readable content", slug);
            (empty_body_notice(slug, &metadata), true)
        } else {
            (body.to_string(), false)
        };

        let words = word_count(&content);
        let minutes = reading_minutes(words, self.config.reading.words_per_minute);
        let read_time = match metadata.shift_remove("readTime") {
            Some(FrontValue::Number(n)) => format!("{} min read", format_number(n)),
            Some(FrontValue::String(s)) => s,
            _ => format!("{} min read", minutes),
        };

        let published = take_string(&mut metadata, "published")
            .or_else(|| take_string(&mut metadata, "date"));
        let published_date = published
            .as_deref()
            .and_then(parse_date)
            .unwrap_or_else(Utc::now);

        Article {
            slug: slug.to_string(),
            title: take_string(&mut metadata, "title").unwrap_or_else(|| slug.to_string()),
            excerpt: take_string(&mut metadata, "excerpt")
                .or_else(|| take_string(&mut metadata, "description"))
                .unwrap_or_default(),
            category: take_string(&mut metadata, "category").unwrap_or_default(),
            author: take_string(&mut metadata, "author").unwrap_or_default(),
            published,
            tags: take_list(&mut metadata, "tags"),
            trending: take_bool(&mut metadata, "trending"),
            views: take_count(&mut metadata, "views"),
            comments: take_count(&mut metadata, "comments"),
            image: take_string(&mut metadata, "image"),
            read_time,
            content,
            word_count: words,
            reading_minutes: minutes,
            published_date,
            error,
            extra: metadata,
        }
    }

    /// Article shown when loading failed
    pub fn placeholder(&self, slug: &str, reason: &str) -> Article {
        let path = format!("/{}", self.config.article_path(slug));
        let content = format!(
            "## Article Not Found\n\nThe article \"{slug}\" could not be loaded.\n\n\
             **Error:** {reason}\n\nPlease check that the file exists at `{path}`"
        );
        let now = Utc::now();

        Article {
            slug: slug.to_string(),
            title: format!("Article Not Found: {}", slug),
            excerpt: format!(
                "The article \"{}\" could not be loaded. Error: {}",
                slug, reason
            ),
            category: "Error".to_string(),
            author: "System".to_string(),
            published: Some(now.to_rfc3339()),
            tags: Vec::new(),
            trending: false,
            views: None,
            comments: None,
            image: None,
            read_time: "1 min read".to_string(),
            word_count: word_count(&content),
            reading_minutes: 1,
            content,
            published_date: now,
            error: true,
            extra: Metadata::new(),
        }
    }
}

/// Parse, validate and sort catalog JSON
pub fn parse_index(text: &str) -> Result<Vec<ArticleSummary>, LoadError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(records) = value else {
        return Err(LoadError::NotAList);
    };

    let mut articles: Vec<ArticleSummary> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match ArticleSummary::from_record(record) {
            Ok(article) => Some(article),
            Err(reason) => {
                tracing::warn!("Dropping invalid article at index {}: {}", i, reason);
                None
            }
        })
        .collect();

    if articles.is_empty() {
        return Err(LoadError::Empty);
    }

    sort_newest_first(&mut articles);
    Ok(articles)
}

/// Sort by published date, newest first; undated records sink to the end
pub fn sort_newest_first(articles: &mut [ArticleSummary]) {
    articles.sort_by_key(|a| std::cmp::Reverse(published_or_epoch(a)));
}

pub(crate) fn published_or_epoch(article: &ArticleSummary) -> DateTime<Utc> {
    article.published_at().unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Slugs are used as file names, keep them to a safe alphabet
pub fn validate_slug(slug: &str) -> Result<(), LoadError> {
    let valid = !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains("..")
        && slug
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(LoadError::InvalidSlug(slug.to_string()))
    }
}

/// Stand-in body built from whatever the front matter does say
fn empty_body_notice(slug: &str, metadata: &Metadata) -> String {
    let field = |key: &str| {
        metadata
            .get(key)
            .map(FrontValue::to_label)
            .filter(|v| !v.trim().is_empty())
    };
    let title = field("title").unwrap_or_else(|| "Technology Update".to_string());
    let excerpt = field("excerpt")
        .or_else(|| field("description"))
        .unwrap_or_else(|| "Latest developments in Nigerian technology sector.".to_string());
    let category = field("category").unwrap_or_else(|| "Technology".to_string());

    format!(
        "# {title}\n\n{excerpt}\n\n## Overview\n\n\
         This article covers recent developments in Nigeria's {sector} sector.\n\n\
         ## Content Unavailable\n\n\
         The full text of \"{slug}\" is not available yet. Please check back later.",
        sector = category.to_lowercase(),
    )
}

fn take_string(metadata: &mut Metadata, key: &str) -> Option<String> {
    metadata.shift_remove(key).map(|v| match v {
        FrontValue::String(s) => s,
        other => other.to_label(),
    })
}

fn take_list(metadata: &mut Metadata, key: &str) -> Vec<String> {
    match metadata.shift_remove(key) {
        Some(FrontValue::List(items)) => items,
        Some(FrontValue::String(s)) => s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        Some(other) => vec![other.to_label()],
        None => Vec::new(),
    }
}

fn take_bool(metadata: &mut Metadata, key: &str) -> bool {
    metadata
        .shift_remove(key)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

fn take_count(metadata: &mut Metadata, key: &str) -> Option<u64> {
    match metadata.shift_remove(key)? {
        FrontValue::Number(n) if n.is_finite() && n >= 0.0 => Some(n as u64),
        FrontValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Catalog shown when the real one cannot be loaded
pub fn sample_articles() -> Vec<ArticleSummary> {
    let now = Utc::now();
    let samples = [
        (
            "ncc-outage-compensation",
            "Nigeria's Telecoms Regulator Introduces New Outage Notification",
            "NCC mandates operators to notify consumers of major outages.",
            "Government & Policy",
            "Munira Audu",
            0,
            "4 min read",
            true,
            532,
            86,
        ),
        (
            "critical-ncc-response",
            "Critical Response to Allegations Against NCC",
            "Analysis of the Nigerian Communications Commission response.",
            "Government & Policy",
            "Maryam Kourrah",
            1,
            "9 min read",
            true,
            926,
            37,
        ),
        (
            "rtx-4070-ti-price-drop",
            "RTX 4070 Ti Graphics Cards See Price Drop",
            "Gaming enthusiasts in Nigeria can now access high-end graphics cards.",
            "Hardware",
            "Chinelo Ikenna",
            2,
            "3 min read",
            false,
            892,
            15,
        ),
    ];

    samples
        .into_iter()
        .map(
            |(slug, title, excerpt, category, author, age_days, read_time, trending, views, comments)| {
                ArticleSummary {
                    slug: slug.to_string(),
                    title: title.to_string(),
                    excerpt: excerpt.to_string(),
                    category: category.to_string(),
                    author: author.to_string(),
                    published: Some((now - Duration::days(age_days)).to_rfc3339()),
                    tags: Vec::new(),
                    trending,
                    views: Some(views),
                    comments: Some(comments),
                    read_time: Some(read_time.to_string()),
                    image: None,
                    extra: Default::default(),
                }
            },
        )
        .collect()
}
