//! Render one article as a standalone HTML document

use anyhow::Result;

use crate::reader::DetailView;
use crate::Newsdesk;

/// Open `slug` and return the document; failed loads render as a placeholder
pub async fn render(app: &Newsdesk, slug: &str) -> Result<String> {
    let reader = app.reader()?;
    let mut view = DetailView::new(&app.config);

    reader.show(&mut view, slug).await;
    if let Some(article) = view.article() {
        if article.is_error() {
            tracing::warn!("Showing placeholder for {}", slug);
        }
    }

    view.render_document()
        .ok_or_else(|| anyhow::anyhow!("No article loaded for {}", slug))
}

/// Print the document for `slug` to stdout
pub async fn run(app: &Newsdesk, slug: &str) -> Result<()> {
    let html = render(app, slug).await?;
    print!("{}", html);
    Ok(())
}
