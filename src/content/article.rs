//! Article summary and article models

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::frontmatter::{format_number, FrontValue};
use crate::helpers::parse_date;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<serde_json::Value>()? {
                vec.extend(scalar_text(&item));
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Display counters arrive as numbers or numeric strings; anything else is absent
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct LenientCount;

    impl<'de> Visitor<'de> for LenientCount {
        type Value = Option<u64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a count as number or string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(u64::try_from(value).ok())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((value.is_finite() && value >= 0.0).then_some(value as u64))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(parse_leading_count(value))
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientCount)
}

/// Text of a scalar JSON value; null, lists and objects have none
fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Display text; null and non-scalar values read as empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

/// Strings only; anything else is absent
fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Date strings as given; numbers are epoch milliseconds
fn lenient_published<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|d| d.to_rfc3339())),
        _ => Ok(None),
    }
}

/// A bare number of minutes becomes the same label article pages use
fn lenient_read_time<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(n
            .as_f64()
            .map(|minutes| format!("{} min read", format_number(minutes)))),
        _ => Ok(None),
    }
}

/// `true` or the string "true"; everything else is false
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// "1,2k views" style strings count their leading digits only
fn parse_leading_count(s: &str) -> Option<u64> {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// One entry of the article catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: String,
    #[serde(
        default,
        deserialize_with = "lenient_published",
        skip_serializing_if = "Option::is_none"
    )]
    pub published: Option<String>,
    #[serde(default, deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub trending: bool,
    #[serde(default, deserialize_with = "lenient_count")]
    pub views: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub comments: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_read_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub read_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,

    /// Catalog keys this model does not know about
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl ArticleSummary {
    /// Validate and decode one raw catalog record
    ///
    /// A record needs a non-empty `title` and an identifier, taken from
    /// `slug` or, failing that, `id`. Optional fields of an unexpected
    /// shape are read as absent and never reject the record.
    pub fn from_record(record: serde_json::Value) -> Result<Self, String> {
        let serde_json::Value::Object(mut map) = record else {
            return Err("record is not an object".to_string());
        };

        let has_title = map
            .get("title")
            .and_then(|t| t.as_str())
            .is_some_and(|t| !t.trim().is_empty());
        if !has_title {
            return Err("record has no title".to_string());
        }

        let has_slug = map
            .get("slug")
            .and_then(|s| s.as_str())
            .is_some_and(|s| !s.trim().is_empty());
        if !has_slug {
            let id = match map.get("id") {
                Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.clone(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => return Err("record has no slug or id".to_string()),
            };
            map.insert("slug".to_string(), serde_json::Value::String(id));
        }

        let slug = map
            .get("slug")
            .and_then(scalar_text)
            .unwrap_or_default();
        let title = map
            .get("title")
            .and_then(scalar_text)
            .unwrap_or_default();

        match serde_json::from_value(serde_json::Value::Object(map)) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::debug!("Keeping only slug and title of {}: {}", slug, e);
                Ok(Self::bare(slug, title))
            }
        }
    }

    fn bare(slug: String, title: String) -> Self {
        Self {
            slug,
            title,
            excerpt: String::new(),
            category: String::new(),
            author: String::new(),
            published: None,
            tags: Vec::new(),
            trending: false,
            views: None,
            comments: None,
            read_time: None,
            image: None,
            extra: IndexMap::new(),
        }
    }

    /// Parsed publication timestamp
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published.as_deref().and_then(parse_date)
    }
}

/// A fully loaded article
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub author: String,
    pub published: Option<String>,
    pub tags: Vec<String>,
    pub trending: bool,
    pub views: Option<u64>,
    pub comments: Option<u64>,
    pub image: Option<String>,

    /// Display label such as "4 min read"
    pub read_time: String,

    /// Raw markdown body, never empty
    pub content: String,

    pub word_count: usize,

    /// Computed estimate in minutes
    pub reading_minutes: usize,

    /// Parsed publication date, "now" when missing or invalid
    pub published_date: DateTime<Utc>,

    /// Set on placeholder articles produced by a failed load
    pub error: bool,

    /// Front-matter keys without a dedicated field
    #[serde(flatten)]
    pub extra: IndexMap<String, FrontValue>,
}

impl Article {
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Summary view of this article for list rendering
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            category: self.category.clone(),
            author: self.author.clone(),
            published: self.published.clone(),
            tags: self.tags.clone(),
            trending: self.trending,
            views: self.views,
            comments: self.comments,
            read_time: Some(self.read_time.clone()),
            image: self.image.clone(),
            extra: IndexMap::new(),
        }
    }
}

/// Count whitespace separated tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `words` at `words_per_minute`, rounded up
pub fn reading_minutes(words: usize, words_per_minute: usize) -> usize {
    words.div_ceil(words_per_minute.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_from_record() {
        let record = json!({
            "slug": "rtx-4070-ti-price-drop",
            "title": "RTX 4070 Ti Price Drop",
            "category": "Hardware",
            "published": "2025-05-25T10:00:00Z",
            "tags": "gpu",
            "views": "892",
            "comments": 15,
            "sponsor": "none"
        });

        let summary = ArticleSummary::from_record(record).unwrap();
        assert_eq!(summary.slug, "rtx-4070-ti-price-drop");
        assert_eq!(summary.tags, vec!["gpu"]);
        assert_eq!(summary.views, Some(892));
        assert_eq!(summary.comments, Some(15));
        assert!(!summary.trending);
        assert_eq!(summary.extra.get("sponsor"), Some(&json!("none")));
        assert!(summary.published_at().is_some());
    }

    #[test]
    fn test_id_stands_in_for_slug() {
        let summary = ArticleSummary::from_record(json!({"id": 42, "title": "Numbered"})).unwrap();
        assert_eq!(summary.slug, "42");
    }

    #[test]
    fn test_invalid_records() {
        assert!(ArticleSummary::from_record(json!("just a string")).is_err());
        assert!(ArticleSummary::from_record(json!({"slug": "no-title"})).is_err());
        assert!(ArticleSummary::from_record(json!({"title": "No id"})).is_err());
        assert!(ArticleSummary::from_record(json!({"slug": "x", "title": "  "})).is_err());
    }

    #[test]
    fn test_loose_field_types_keep_the_record() {
        let summary = ArticleSummary::from_record(json!({
            "slug": "loose",
            "title": "Loose",
            "excerpt": null,
            "category": 7,
            "author": null,
            "readTime": 4,
            "published": 1716508800000u64,
            "trending": "true",
            "image": {"src": "a.jpg"},
            "tags": ["gpu", 5, null]
        }))
        .unwrap();

        assert_eq!(summary.excerpt, "");
        assert_eq!(summary.category, "7");
        assert_eq!(summary.author, "");
        assert_eq!(summary.read_time.as_deref(), Some("4 min read"));
        assert_eq!(
            summary.published_at().unwrap().format("%Y-%m-%d").to_string(),
            "2024-05-24"
        );
        assert!(summary.trending);
        assert_eq!(summary.image, None);
        assert_eq!(summary.tags, vec!["gpu", "5"]);
    }

    #[test]
    fn test_unreadable_fields_fall_back_to_slug_and_title() {
        let summary = ArticleSummary::from_record(json!({
            "slug": "odd",
            "title": "Odd",
            "tags": {"nested": true},
            "excerpt": "dropped with the rest"
        }))
        .unwrap();
        assert_eq!(summary.slug, "odd");
        assert_eq!(summary.title, "Odd");
        assert_eq!(summary.excerpt, "");
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn test_word_count_and_reading_time() {
        assert_eq!(word_count("one two\n three\tfour  "), 4);
        assert_eq!(word_count(""), 0);
        assert_eq!(reading_minutes(1, 200), 1);
        assert_eq!(reading_minutes(200, 200), 1);
        assert_eq!(reading_minutes(201, 200), 2);
        assert_eq!(reading_minutes(10, 0), 10);
    }
}
