//! List the article catalog

use anyhow::Result;

use crate::content::ArticleSummary;
use crate::helpers::{parse_date, short_date};
use crate::reader::{ListQuery, ALL_CATEGORIES};
use crate::Newsdesk;

/// Print the filtered, display-ordered catalog
pub async fn run(app: &Newsdesk, category: Option<&str>, search: Option<&str>) -> Result<()> {
    let reader = app.reader()?;
    let catalog = reader.load_catalog().await;
    if let Some(message) = catalog.error_message() {
        eprintln!("{}", message);
        eprintln!("Showing sample articles instead. Run the command again to retry.");
    }

    let category = category.map(|c| resolve_category(app, c));
    let query = ListQuery::new(category.as_deref(), search);
    let articles = query.apply(&catalog.articles);

    if articles.is_empty() {
        println!("{}", query.empty_message());
        return Ok(());
    }

    println!("{} ({}):", heading(app, &query), articles.len());
    for article in &articles {
        println!("  {}", format_entry(article));
    }

    Ok(())
}

/// Accept a configured category id (`hardware`) as well as its name
fn resolve_category(app: &Newsdesk, category: &str) -> String {
    app.config
        .categories
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(category) && c.id != ALL_CATEGORIES)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| category.to_string())
}

fn heading(app: &Newsdesk, query: &ListQuery) -> String {
    if query.category == ALL_CATEGORIES {
        "Latest Tech News".to_string()
    } else {
        app.config
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(&query.category))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| query.category.clone())
    }
}

fn display_date(published: Option<&str>) -> String {
    match published {
        None => "Unknown date".to_string(),
        Some(s) => parse_date(s)
            .map(|d| short_date(&d))
            .unwrap_or_else(|| "Invalid date".to_string()),
    }
}

fn format_entry(article: &ArticleSummary) -> String {
    let mut line = String::new();
    if article.trending {
        line.push_str("[trending] ");
    }
    line.push_str(&article.title);
    if !article.category.is_empty() {
        line.push_str(&format!(" [{}]", article.category));
    }

    let mut details = vec![article.slug.clone()];
    if !article.author.is_empty() {
        details.push(article.author.clone());
    }
    details.push(display_date(article.published.as_deref()));
    if let Some(read_time) = &article.read_time {
        details.push(read_time.clone());
    }
    if let Some(views) = article.views {
        details.push(format!("{} views", views));
    }

    format!("{}\n    {}", line, details.join(" | "))
}
