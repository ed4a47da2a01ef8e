//! URL helper functions

use crate::config::SiteConfig;

/// Whether a path is already a full URL
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/articles/images/a.jpg") // -> "https://example.com/articles/images/a.jpg"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    let base = config.url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// In-app route of an article
pub fn article_route(slug: &str) -> String {
    format!("/#/article/{}", slug)
}

/// Shareable URL of an article's social preview page
pub fn share_url(config: &SiteConfig, slug: &str) -> String {
    full_url_for(config, slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://news.example.com/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/articles/a.jpg"),
            "https://news.example.com/articles/a.jpg"
        );
        assert_eq!(full_url_for(&config, ""), "https://news.example.com");
        assert_eq!(
            full_url_for(&config, "https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
    }

    #[test]
    fn test_article_links() {
        let config = test_config();
        assert_eq!(article_route("5g"), "/#/article/5g");
        assert_eq!(share_url(&config, "5g"), "https://news.example.com/5g");
    }
}
