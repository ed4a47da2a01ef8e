//! List view logic: category filter, search, display order and popular picks

use std::cmp::Ordering;

use crate::content::loader::published_or_epoch;
use crate::content::ArticleSummary;

/// Category id that disables filtering
pub const ALL_CATEGORIES: &str = "all";

/// Articles whose category or one of whose tags matches, ignoring case.
/// `all` keeps everything in its original order.
pub fn filter_by_category(articles: &[ArticleSummary], category: &str) -> Vec<ArticleSummary> {
    if category == ALL_CATEGORIES {
        return articles.to_vec();
    }

    let wanted = category.to_lowercase();
    articles
        .iter()
        .filter(|a| {
            a.category.to_lowercase() == wanted
                || a.tags.iter().any(|t| t.to_lowercase() == wanted)
        })
        .cloned()
        .collect()
}

/// Articles matching `query` in title, excerpt, author, category or tags
pub fn search(articles: &[ArticleSummary], query: &str) -> Vec<ArticleSummary> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return articles.to_vec();
    }

    articles
        .iter()
        .filter(|a| {
            [&a.title, &a.excerpt, &a.author, &a.category]
                .into_iter()
                .chain(a.tags.iter())
                .any(|field| field.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

/// Trending first, then newest first
pub fn sort_for_display(articles: &mut [ArticleSummary]) {
    articles.sort_by(display_order);
}

fn display_order(a: &ArticleSummary, b: &ArticleSummary) -> Ordering {
    b.trending
        .cmp(&a.trending)
        .then_with(|| published_or_epoch(b).cmp(&published_or_epoch(a)))
}

/// Trending or much-viewed articles worth loading ahead of time
pub fn select_popular(
    articles: &[ArticleSummary],
    views_threshold: u64,
    count: usize,
) -> Vec<ArticleSummary> {
    articles
        .iter()
        .filter(|a| a.trending || a.views.is_some_and(|v| v > views_threshold))
        .take(count)
        .cloned()
        .collect()
}

/// What the list view is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub category: String,
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }
}

impl ListQuery {
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        Self {
            category: category.unwrap_or(ALL_CATEGORIES).to_string(),
            search: search.unwrap_or_default().to_string(),
        }
    }

    /// Whether any filter is active
    pub fn is_filtered(&self) -> bool {
        self.category != ALL_CATEGORIES || !self.search.trim().is_empty()
    }

    /// Filter, search and order a catalog for display
    pub fn apply(&self, articles: &[ArticleSummary]) -> Vec<ArticleSummary> {
        let filtered = filter_by_category(articles, &self.category);
        let mut results = search(&filtered, &self.search);
        sort_for_display(&mut results);
        results
    }

    /// Message shown when nothing matches
    pub fn empty_message(&self) -> String {
        if !self.search.trim().is_empty() {
            format!("No articles match your search for \"{}\"", self.search)
        } else {
            format!("No articles found in the \"{}\" category", self.category)
        }
    }
}
