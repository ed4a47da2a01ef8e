//! HTML helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Remove `<script>` blocks, including their content
pub fn strip_scripts(html: &str) -> String {
    SCRIPT_BLOCK.replace_all(html, "").into_owned()
}

/// First `length` characters of `s`, with no omission marker
pub fn take_chars(s: &str, length: usize) -> &str {
    match s.char_indices().nth(length) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Generate a `<meta>` tag keyed by `property` (Open Graph) or `name`
pub fn meta_tag(key: &str, content: &str, is_name: bool) -> String {
    let attr = if is_name { "name" } else { "property" };
    format!(
        r#"<meta {}="{}" content="{}">"#,
        attr,
        key,
        html_escape(content)
    )
}
