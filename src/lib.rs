//! newsdesk: the content core of a static tech news reader
//!
//! This crate loads an article catalog and per-article markdown files from a
//! web server or a local directory, caches loaded articles, renders markdown
//! into styled markup and produces social sharing pages.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod fetch;
pub mod helpers;
pub mod reader;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use fetch::{DirFetcher, Fetch, HttpFetcher};

/// The main newsdesk application
#[derive(Clone)]
pub struct Newsdesk {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Newsdesk {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// The configured article source
    pub fn fetcher(&self) -> Result<Arc<dyn Fetch>> {
        if self.config.is_remote_source() {
            tracing::debug!("Reading articles from {}", self.config.source);
            Ok(Arc::new(HttpFetcher::new(&self.config.source)?))
        } else {
            let root = self.base_dir.join(&self.config.source);
            tracing::debug!("Reading articles from {:?}", root);
            Ok(Arc::new(DirFetcher::new(root)))
        }
    }

    pub fn loader(&self) -> Result<content::ArticleLoader> {
        Ok(content::ArticleLoader::new(
            self.fetcher()?,
            self.config.clone(),
        ))
    }

    /// A fresh reading session with an empty cache
    pub fn reader(&self) -> Result<reader::Reader> {
        Ok(reader::Reader::new(self.loader()?))
    }

    /// Generate social sharing pages
    pub async fn social(&self) -> Result<()> {
        commands::social::run(self).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_with_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Test Desk\npublic_dir: out\nsource: https://news.example.com/\n",
        )
        .unwrap();

        let app = Newsdesk::new(dir.path()).unwrap();
        assert_eq!(app.config.title, "Test Desk");
        assert_eq!(app.public_dir, dir.path().join("out"));
        assert!(app.fetcher().unwrap().describe().starts_with("https://news.example.com/"));
    }

    #[test]
    fn test_invalid_remote_source() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "source: \"https://\"\n").unwrap();
        let app = Newsdesk::new(dir.path()).unwrap();
        assert!(app.loader().is_err());
    }

    #[test]
    fn test_new_defaults_to_local_source() {
        let dir = TempDir::new().unwrap();
        let app = Newsdesk::new(dir.path()).unwrap();
        assert_eq!(
            app.fetcher().unwrap().describe(),
            dir.path().join("public").display().to_string()
        );
    }
}
