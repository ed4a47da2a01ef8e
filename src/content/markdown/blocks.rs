//! Block-level markdown
//!
//! A cursor walks the lines; every rule reports how many lines it consumed
//! so multi-line constructs (fences, tables, lists) swallow their own extent.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Write};

use super::inline::InlineRenderer;
use super::style;
use crate::helpers::html_escape;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(#{1,6})\s+(.+)$").unwrap();
    static ref UNORDERED_ITEM: Regex = Regex::new(r"^\s*[-*+]\s+(.+)$").unwrap();
    static ref ORDERED_ITEM: Regex = Regex::new(r"^\s*\d+\.\s+(.+)$").unwrap();
    static ref RULE: Regex = Regex::new(r"^[-*]{3,}$").unwrap();
}

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }

    fn style(self) -> &'static str {
        match self {
            ListKind::Unordered => style::UNORDERED_LIST,
            ListKind::Ordered => style::ORDERED_LIST,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            ListKind::Unordered => &UNORDERED_ITEM,
            ListKind::Ordered => &ORDERED_ITEM,
        }
    }
}

/// Render a markdown body into block markup
pub fn render_blocks(text: &str, inline: &InlineRenderer) -> Result<String, fmt::Error> {
    BlockParser::new(text, inline).run()
}

struct BlockParser<'a> {
    lines: Vec<&'a str>,
    inline: &'a InlineRenderer,
    out: String,
}

impl<'a> BlockParser<'a> {
    fn new(text: &'a str, inline: &'a InlineRenderer) -> Self {
        Self {
            lines: text.split('\n').collect(),
            inline,
            out: String::with_capacity(text.len() * 2),
        }
    }

    fn run(mut self) -> Result<String, fmt::Error> {
        let mut i = 0;
        while i < self.lines.len() {
            i += self.block_at(i)?;
        }
        Ok(self.out)
    }

    /// Render the block starting at line `i`, returning the lines consumed
    fn block_at(&mut self, i: usize) -> Result<usize, fmt::Error> {
        let line = self.lines[i].trim();

        if line.is_empty() {
            write!(self.out, r#"<div style="{}"></div>"#, style::SPACER)?;
            return Ok(1);
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1].len();
            write!(
                self.out,
                r#"<h{level} style="{}">{}</h{level}>"#,
                style::HEADINGS[level - 1],
                self.inline.render(&caps[2]),
            )?;
            return Ok(1);
        }

        if line.starts_with(FENCE) {
            return self.code_block(i);
        }

        if line.contains('|') {
            if let Some(consumed) = self.table(i)? {
                return Ok(consumed);
            }
        }

        if let Some(quote) = line.strip_prefix('>') {
            write!(
                self.out,
                r#"<blockquote style="{}">{}</blockquote>"#,
                style::BLOCKQUOTE,
                self.inline.render(quote.trim()),
            )?;
            return Ok(1);
        }

        if UNORDERED_ITEM.is_match(line) {
            return self.list(i, ListKind::Unordered);
        }

        if ORDERED_ITEM.is_match(line) {
            return self.list(i, ListKind::Ordered);
        }

        if RULE.is_match(line) {
            write!(self.out, r#"<hr style="{}">"#, style::RULE)?;
            return Ok(1);
        }

        write!(
            self.out,
            r#"<p style="{}">{}</p>"#,
            style::PARAGRAPH,
            self.inline.render(line),
        )?;
        Ok(1)
    }

    /// Everything up to the closing fence is literal text
    fn code_block(&mut self, start: usize) -> Result<usize, fmt::Error> {
        let mut i = start + 1;
        let mut code = String::new();

        while i < self.lines.len() && !self.lines[i].trim().starts_with(FENCE) {
            code.push_str(self.lines[i].trim_end_matches('\r'));
            code.push('\n');
            i += 1;
        }

        write!(
            self.out,
            r#"<pre style="{}"><code>{}</code></pre>"#,
            style::CODE_BLOCK,
            html_escape(code.trim()),
        )?;

        // Closing fence, if present, is consumed but not rendered
        let end = (i + 1).min(self.lines.len());
        Ok(end - start)
    }

    /// Header row, separator row, then body rows until a line without a pipe.
    /// Returns `None` when the separator is missing so other rules can apply.
    fn table(&mut self, start: usize) -> Result<Option<usize>, fmt::Error> {
        let is_separator = self
            .lines
            .get(start + 1)
            .is_some_and(|next| is_separator_row(next));
        if !is_separator {
            return Ok(None);
        }

        write!(
            self.out,
            r#"<div style="{}"><table style="{}"><thead style="{}"><tr>"#,
            style::TABLE_WRAPPER,
            style::TABLE,
            style::TABLE_HEAD,
        )?;
        for cell in split_cells(self.lines[start]) {
            write!(
                self.out,
                r#"<th style="{}">{}</th>"#,
                style::TABLE_HEADER_CELL,
                self.inline.render(cell),
            )?;
        }
        self.out.push_str("</tr></thead><tbody>");

        let mut i = start + 2;
        while i < self.lines.len() {
            let row = self.lines[i].trim();
            if !row.contains('|') {
                break;
            }
            write!(self.out, r#"<tr style="{}">"#, style::TABLE_ROW)?;
            for cell in split_cells(row) {
                write!(
                    self.out,
                    r#"<td style="{}">{}</td>"#,
                    style::TABLE_CELL,
                    self.inline.render(cell),
                )?;
            }
            self.out.push_str("</tr>");
            i += 1;
        }

        self.out.push_str("</tbody></table></div>");
        Ok(Some(i - start))
    }

    /// Consecutive lines of the same list kind form one list
    fn list(&mut self, start: usize, kind: ListKind) -> Result<usize, fmt::Error> {
        write!(self.out, r#"<{} style="{}">"#, kind.tag(), kind.style())?;

        let mut i = start;
        while i < self.lines.len() {
            let Some(caps) = kind.pattern().captures(self.lines[i].trim()) else {
                break;
            };
            write!(
                self.out,
                r#"<li style="{}">{}</li>"#,
                style::LIST_ITEM,
                self.inline.render(&caps[1]),
            )?;
            i += 1;
        }

        write!(self.out, "</{}>", kind.tag())?;
        Ok(i - start)
    }
}

/// Pipe-split cells, trimmed, empties dropped
fn split_cells(row: &str) -> impl Iterator<Item = &str> {
    row.trim()
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
}

/// A row made only of pipes, dashes, colons and whitespace
fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    line.contains('|')
        && line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}
