//! CLI entry point for newsdesk

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(author = "CyberHost Nigeria")]
#[command(version)]
#[command(about = "Article loading, markdown rendering and social pages for a tech news reader", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate social sharing pages for every article
    Social,

    /// List the article catalog
    #[command(alias = "ls")]
    List {
        /// Only show this category (id or name) or tag
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Only show articles matching this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Render an article as an HTML document
    Read {
        /// Slug of the article
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "newsdesk=debug,info"
    } else {
        "newsdesk=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Social => {
            let app = newsdesk::Newsdesk::new(&base_dir)?;
            tracing::info!("Generating social pages into {:?}", app.public_dir);
            app.social().await?;
        }

        Commands::List { category, search } => {
            let app = newsdesk::Newsdesk::new(&base_dir)?;
            newsdesk::commands::list::run(&app, category.as_deref(), search.as_deref()).await?;
        }

        Commands::Read { slug } => {
            let app = newsdesk::Newsdesk::new(&base_dir)?;
            newsdesk::commands::read::run(&app, &slug).await?;
        }

        Commands::Version => {
            println!("newsdesk version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
