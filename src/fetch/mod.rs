//! Resource fetching
//!
//! Articles and the catalog are plain files addressed by a relative path
//! such as `articles/index.json`. They are served either over HTTP or from a
//! local directory; both sit behind the [`Fetch`] trait.

mod retry;

pub use retry::RetryPolicy;

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Failure to obtain a resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} {reason}: {path}")]
    Status {
        status: u16,
        reason: String,
        path: String,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }

    fn not_found(path: &str) -> Self {
        FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
            path: path.to_string(),
        }
    }
}

/// A source of text resources
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch the resource at a path relative to the source root
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}

/// Fetches resources from a web server
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("newsdesk/", env!("CARGO_PKG_VERSION"))
    }

    pub fn url(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(FetchError::Url)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url(path)?;
        tracing::debug!("Fetching {}", url);

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                path: path.to_string(),
            });
        }

        Ok(resp.text().await?)
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Reads resources from a local directory, e.g. a site's `public/` folder
#[derive(Clone, Debug)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a relative resource path, refusing to leave the root
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            None
        } else {
            Some(self.root.join(relative))
        }
    }
}

#[async_trait]
impl Fetch for DirFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let Some(file) = self.resolve(path) else {
            return Err(FetchError::not_found(path));
        };
        tracing::debug!("Reading {:?}", file);

        match tokio::fs::read_to_string(&file).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::not_found(path)),
            Err(source) => Err(FetchError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
