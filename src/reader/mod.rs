//! Reader session - list and detail presentation over the article loader
//!
//! A [`Reader`] owns the loader, the content cache and the retry policy. It
//! loads the catalog (retrying with backoff before falling back to the
//! sample list), opens articles through the cache and preloads popular
//! articles in the background.

mod detail;
mod list;
mod meta;

pub use detail::DetailView;
pub use list::{
    filter_by_category, search, select_popular, sort_for_display, ListQuery, ALL_CATEGORIES,
};
pub use meta::{DocumentHead, PageMetadata};

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::cache::ContentCache;
use crate::content::{sample_articles, Article, ArticleLoader, ArticleSummary};
use crate::fetch::RetryPolicy;

/// How the catalog was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Loaded from the source
    Fresh,
    /// Every attempt failed; the sample list is shown instead
    Fallback { error: String, attempts: u32 },
}

/// The article list as loaded for this session
#[derive(Debug, Clone)]
pub struct Catalog {
    pub articles: Vec<ArticleSummary>,
    pub status: CatalogStatus,
}

impl Catalog {
    pub fn is_fallback(&self) -> bool {
        matches!(self.status, CatalogStatus::Fallback { .. })
    }

    /// Message for the persistent error banner, if any
    pub fn error_message(&self) -> Option<String> {
        match &self.status {
            CatalogStatus::Fresh => None,
            CatalogStatus::Fallback { error, attempts } => Some(format!(
                "Failed to load articles after {} attempts: {}",
                attempts, error
            )),
        }
    }
}

/// What happened to one preload candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreloadOutcome {
    Loaded,
    AlreadyCached,
    Failed(String),
}

/// Reading session state shared by list and detail views
pub struct Reader {
    loader: ArticleLoader,
    cache: Mutex<ContentCache>,
    retry: RetryPolicy,
}

impl Reader {
    pub fn new(loader: ArticleLoader) -> Self {
        let config = loader.config();
        let cache = ContentCache::from_config(&config.cache);
        let retry = RetryPolicy::from_config(&config.retry);
        Self {
            loader,
            cache: Mutex::new(cache),
            retry,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn loader(&self) -> &ArticleLoader {
        &self.loader
    }

    /// Load the catalog, retrying with backoff before falling back to samples.
    /// Calling this again is the manual retry.
    pub async fn load_catalog(&self) -> Catalog {
        let result = self
            .retry
            .run(|attempt| {
                tracing::debug!("Loading catalog, attempt {}", attempt);
                self.loader.fetch_index()
            })
            .await;

        match result {
            Ok(articles) => Catalog {
                articles,
                status: CatalogStatus::Fresh,
            },
            Err(e) => {
                tracing::warn!("Using sample articles: {}", e);
                Catalog {
                    articles: sample_articles(),
                    status: CatalogStatus::Fallback {
                        error: e.to_string(),
                        attempts: self.retry.max_attempts(),
                    },
                }
            }
        }
    }

    /// Open an article, from the cache when fresh.
    /// Failed loads come back as placeholders and are not cached.
    pub async fn open_article(&self, slug: &str) -> Arc<Article> {
        if let Some(article) = self.cache.lock().await.get(slug) {
            return article;
        }

        let article = Arc::new(self.loader.load_article(slug).await);
        if !article.is_error() {
            self.cache.lock().await.insert(slug, Arc::clone(&article));
        }
        article
    }

    /// Load popular articles into the cache one after another.
    /// A failure is logged and the remaining candidates are still tried.
    pub async fn preload_popular(
        &self,
        articles: &[ArticleSummary],
    ) -> Vec<(String, PreloadOutcome)> {
        let preload = &self.loader.config().preload;
        let candidates = select_popular(articles, preload.views_threshold, preload.count);
        tracing::debug!("Preloading {} popular articles", candidates.len());

        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let slug = candidate.slug;
            if self.cache.lock().await.get(&slug).is_some() {
                outcomes.push((slug, PreloadOutcome::AlreadyCached));
                continue;
            }

            let outcome = match self.loader.fetch_article(&slug).await {
                Ok(article) if !article.is_error() => {
                    self.cache.lock().await.insert(&slug, Arc::new(article));
                    PreloadOutcome::Loaded
                }
                Ok(_) => PreloadOutcome::Failed("article has no readable content".to_string()),
                Err(e) => {
                    tracing::warn!("Failed to preload article {}: {}", slug, e);
                    PreloadOutcome::Failed(e.to_string())
                }
            };
            outcomes.push((slug, outcome));
        }
        outcomes
    }

    /// Open `slug` in `view`, applying the result only if still requested
    pub async fn show(&self, view: &mut DetailView, slug: &str) -> bool {
        view.navigate(slug);
        let article = self.open_article(slug).await;
        view.apply_loaded(article)
    }

    /// Number of cached articles
    pub async fn cached(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::fetch::{Fetch, FetchError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// In-memory source that counts requests per path
    #[derive(Default)]
    struct CountingFetcher {
        files: HashMap<String, String>,
        calls: std::sync::Mutex<HashMap<String, u32>>,
        total: AtomicU32,
    }

    impl CountingFetcher {
        fn with(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                ..Default::default()
            }
        }

        fn calls(&self, path: &str) -> u32 {
            self.calls.lock().unwrap().get(path).copied().unwrap_or(0)
        }
    }

    #[async_trait]
    impl Fetch for CountingFetcher {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            self.total.fetch_add(1, Ordering::SeqCst);
            *self.calls.lock().unwrap().entry(path.to_string()).or_default() += 1;
            self.files.get(path).cloned().ok_or_else(|| FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
                path: path.to_string(),
            })
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    const INDEX: &str = r#"[
        {"slug": "a", "title": "A", "trending": true, "published": "2025-05-26"},
        {"slug": "b", "title": "B", "views": 5000, "published": "2025-05-25"},
        {"slug": "c", "title": "C", "views": 10, "published": "2025-05-24"},
        {"slug": "d", "title": "D", "trending": true, "published": "2025-05-23"}
    ]"#;

    fn reader(fetcher: Arc<CountingFetcher>) -> Reader {
        let loader = ArticleLoader::new(fetcher, SiteConfig::default());
        Reader::new(loader).with_retry(RetryPolicy::new(3, std::time::Duration::ZERO))
    }

    #[tokio::test]
    async fn test_load_catalog_fresh() {
        let fetcher = Arc::new(CountingFetcher::with(&[("articles/index.json", INDEX)]));
        let catalog = reader(fetcher.clone()).load_catalog().await;
        assert_eq!(catalog.status, CatalogStatus::Fresh);
        assert_eq!(catalog.articles.len(), 4);
        assert!(catalog.error_message().is_none());
        assert_eq!(fetcher.calls("articles/index.json"), 1);
    }

    #[tokio::test]
    async fn test_load_catalog_retries_then_falls_back() {
        let fetcher = Arc::new(CountingFetcher::default());
        let catalog = reader(fetcher.clone()).load_catalog().await;

        assert!(catalog.is_fallback());
        assert_eq!(catalog.articles.len(), 3);
        assert_eq!(fetcher.calls("articles/index.json"), 4);
        let message = catalog.error_message().unwrap();
        assert!(message.starts_with("Failed to load articles after 4 attempts"));
    }

    #[tokio::test]
    async fn test_open_article_uses_cache() {
        let fetcher = Arc::new(CountingFetcher::with(&[("articles/a.txt", "Body of A")]));
        let reader = reader(fetcher.clone());

        let first = reader.open_article("a").await;
        let second = reader.open_article("a").await;
        assert_eq!(first.content, "Body of A");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls("articles/a.txt"), 1);
        assert_eq!(reader.cached().await, 1);
    }

    #[tokio::test]
    async fn test_failed_articles_are_not_cached() {
        let fetcher = Arc::new(CountingFetcher::default());
        let reader = reader(fetcher.clone());

        assert!(reader.open_article("missing").await.is_error());
        assert!(reader.open_article("missing").await.is_error());
        assert_eq!(fetcher.calls("articles/missing.txt"), 2);
        assert_eq!(reader.cached().await, 0);
    }

    #[tokio::test]
    async fn test_preload_is_best_effort() {
        let fetcher = Arc::new(CountingFetcher::with(&[
            ("articles/a.txt", "Body of A"),
            ("articles/d.txt", "Body of D"),
        ]));
        let reader = reader(fetcher.clone());
        let catalog = crate::content::loader::parse_index(INDEX).unwrap();

        reader.open_article("a").await;
        let outcomes = reader.preload_popular(&catalog).await;

        let slugs: Vec<_> = outcomes.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "d"]);
        assert_eq!(outcomes[0].1, PreloadOutcome::AlreadyCached);
        assert!(matches!(outcomes[1].1, PreloadOutcome::Failed(_)));
        assert_eq!(outcomes[2].1, PreloadOutcome::Loaded);
        assert_eq!(reader.cached().await, 2);
        assert_eq!(fetcher.calls("articles/c.txt"), 0);
    }

    #[tokio::test]
    async fn test_show_in_detail_view() {
        let fetcher = Arc::new(CountingFetcher::with(&[(
            "articles/a.txt",
            "---\ntitle: Alpha\n---\nBody",
        )]));
        let reader = reader(fetcher);
        let mut view = DetailView::new(reader.loader().config());

        assert!(reader.show(&mut view, "a").await);
        assert_eq!(view.metadata().title, "Alpha | CyberHost Nigeria");

        assert!(reader.show(&mut view, "missing").await);
        assert!(view.article().unwrap().is_error());
    }
}
