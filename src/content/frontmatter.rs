//! Front-matter parsing
//!
//! Articles may open with a `---` delimited block of `key: value` lines.
//! The block is parsed line by line and never fails: lines that cannot be
//! understood are dropped so that one bad line does not cost a whole article.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker opening and closing a front-matter block
pub const DELIMITER: &str = "---";

lazy_static! {
    static ref ISO_DATE_PREFIX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap();
}

/// Parsed front-matter entries, in source order
pub type Metadata = IndexMap<String, FrontValue>;

/// A typed front-matter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontValue {
    List(Vec<String>),
    Bool(bool),
    Number(f64),
    String(String),
}

impl FrontValue {
    /// Coerce a raw value: bracketed list, then boolean, then number, then string
    pub fn coerce(value: &str) -> Self {
        if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let inner = inner.trim();
            if inner.is_empty() {
                return FrontValue::List(Vec::new());
            }
            let items = inner
                .split(',')
                .map(|item| strip_quotes(item.trim()).to_string())
                .filter(|item| !item.is_empty())
                .collect();
            return FrontValue::List(items);
        }

        match value {
            "true" => return FrontValue::Bool(true),
            "false" => return FrontValue::Bool(false),
            _ => {}
        }

        // Dates like 2024-05-01 stay strings
        if !ISO_DATE_PREFIX.is_match(value) {
            if let Ok(n) = value.parse::<f64>() {
                if n.is_finite() {
                    return FrontValue::Number(n);
                }
            }
        }

        FrontValue::String(strip_quotes(value).to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FrontValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FrontValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render the value as display text
    pub fn to_label(&self) -> String {
        match self {
            FrontValue::List(items) => items.join(", "),
            FrontValue::Bool(b) => b.to_string(),
            FrontValue::Number(n) => format_number(*n),
            FrontValue::String(s) => s.clone(),
        }
    }
}

/// Integers print without a trailing `.0`
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Remove one leading and one trailing quote character
fn strip_quotes(s: &str) -> &str {
    let s = s
        .strip_prefix('"')
        .or_else(|| s.strip_prefix('\''))
        .unwrap_or(s);
    s.strip_suffix('"')
        .or_else(|| s.strip_suffix('\''))
        .unwrap_or(s)
}

/// Front-matter data from an article
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub metadata: Metadata,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Text without a leading block is returned untouched; when a block is
    /// found the body after it is trimmed.
    pub fn parse(content: &str) -> (Self, &str) {
        let mut lines = content.split_inclusive('\n');

        let opens_with_block = lines.next().is_some_and(is_delimiter_line);
        if !opens_with_block {
            return (FrontMatter::default(), content);
        }

        let block_start = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
        let mut offset = block_start;

        for line in lines {
            if is_delimiter_line(line) {
                let block = &content[block_start..offset];
                let body = content[offset + line.len()..].trim();

                let fm = Self::parse_block(block);
                if fm.metadata.is_empty() && !block.trim().is_empty() {
                    // A horizontal rule pair around prose, not metadata
                    tracing::debug!("Delimited block has no key/value lines, treating as content");
                    return (FrontMatter::default(), content);
                }

                tracing::debug!("Parsed front-matter with {} keys", fm.metadata.len());
                return (fm, body);
            }
            offset += line.len();
        }

        tracing::debug!("Front-matter block is not closed, treating as content");
        (FrontMatter::default(), content)
    }

    /// Parse the lines of a block; later keys replace earlier ones
    pub fn parse_block(block: &str) -> Self {
        let mut metadata = Metadata::new();
        for line in block.lines() {
            if let Some((key, value)) = parse_line(line) {
                metadata.insert(key, value);
            }
        }
        Self { metadata }
    }

    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.metadata.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }
}

fn is_delimiter_line(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn parse_line(line: &str) -> Option<(String, FrontValue)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, value) = trimmed.split_once(':')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key.to_string(), FrontValue::coerce(value)))
}
