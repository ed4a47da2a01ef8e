//! Content module - handles articles, front-matter, and markdown processing

mod article;
mod frontmatter;
pub mod loader;
pub mod markdown;

pub use article::{reading_minutes, word_count, Article, ArticleSummary};
pub use frontmatter::{FrontMatter, FrontValue, Metadata};
pub use loader::{sample_articles, ArticleLoader, LoadError};
pub use markdown::{looks_like_html, InlineRenderer, MarkdownRenderer, RenderError};
