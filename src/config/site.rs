//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub url: String,
    pub default_image: String,

    // Sources
    /// Either an `http(s)://` base URL or a directory relative to the base dir
    pub source: String,
    pub articles_dir: String,
    pub index_file: String,
    pub article_extension: String,
    pub public_dir: String,

    // Listing
    pub categories: Vec<CategoryConfig>,

    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub preload: PreloadConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "CyberHost Nigeria".to_string(),
            tagline: "Nigeria's Tech News Hub".to_string(),
            description: "Your premier source for technology news, analysis, and insights \
                          covering Nigeria's digital transformation and innovation ecosystem."
                .to_string(),
            url: "https://cyberhostnigeria.com.ng".to_string(),
            default_image: "/default-og-image.jpg".to_string(),

            source: "public".to_string(),
            articles_dir: "articles".to_string(),
            index_file: "index.json".to_string(),
            article_extension: "txt".to_string(),
            public_dir: "public".to_string(),

            categories: default_categories(),

            cache: CacheConfig::default(),
            retry: RetryConfig::default(),
            reading: ReadingConfig::default(),
            preload: PreloadConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Whether articles are fetched over HTTP rather than read from disk
    pub fn is_remote_source(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }

    /// Relative resource path of the catalog
    pub fn index_path(&self) -> String {
        format!("{}/{}", self.articles_dir.trim_matches('/'), self.index_file)
    }

    /// Relative resource path of one article
    pub fn article_path(&self, slug: &str) -> String {
        format!(
            "{}/{}.{}",
            self.articles_dir.trim_matches('/'),
            slug,
            self.article_extension
        )
    }

    /// Site-absolute prefix for article assets, e.g. `/articles/`
    pub fn asset_prefix(&self) -> String {
        format!("/{}/", self.articles_dir.trim_matches('/'))
    }

    /// Title shown when no article is active
    pub fn home_title(&self) -> String {
        if self.tagline.is_empty() {
            self.title.clone()
        } else {
            format!("{} | {}", self.title, self.tagline)
        }
    }
}

/// A selectable category in the list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub id: String,
    pub name: String,
}

impl CategoryConfig {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new("all", "All Stories"),
        CategoryConfig::new("Hardware", "Hardware"),
        CategoryConfig::new("Telecommunications", "Telecommunications"),
        CategoryConfig::new("FinTech", "FinTech"),
        CategoryConfig::new("Government & Policy", "Government & Policy"),
        CategoryConfig::new("Consumer Tech", "Consumer Tech"),
    ]
}

/// Article content cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub expiry_secs: u64,
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiry_secs: 300,
            capacity: 20,
        }
    }
}

impl CacheConfig {
    pub fn expiry(&self) -> Duration {
        Duration::from_secs(self.expiry_secs)
    }
}

/// Catalog retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first failed attempt
    pub retries: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay_ms: 1000,
        }
    }
}

/// Reading time estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub words_per_minute: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
        }
    }
}

/// Background preload of popular articles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloadConfig {
    pub count: usize,
    pub views_threshold: u64,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            count: 3,
            views_threshold: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "CyberHost Nigeria");
        assert_eq!(config.cache.capacity, 20);
        assert_eq!(config.cache.expiry(), Duration::from_secs(300));
        assert_eq!(config.retry.retries, 3);
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.categories[0].id, "all");
        assert!(!config.is_remote_source());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My News
source: https://news.example.com
cache:
  capacity: 5
preload:
  count: 1
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My News");
        assert!(config.is_remote_source());
        assert_eq!(config.cache.capacity, 5);
        assert_eq!(config.cache.expiry_secs, 300);
        assert_eq!(config.preload.count, 1);
        assert_eq!(config.preload.views_threshold, 1000);
    }

    #[test]
    fn test_resource_paths() {
        let config = SiteConfig::default();
        assert_eq!(config.index_path(), "articles/index.json");
        assert_eq!(config.article_path("5g-rollout"), "articles/5g-rollout.txt");
        assert_eq!(config.asset_prefix(), "/articles/");
        assert_eq!(config.home_title(), "CyberHost Nigeria | Nigeria's Tech News Hub");
    }
}
