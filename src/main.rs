//! CLI entry point for postfeed

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postfeed::listing::ALL_CATEGORY;

#[derive(Parser)]
#[command(name = "postfeed")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "Category listings, incremental paging and title search for a Markdown blog", long_about = None)]
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
    /// Generate the search index and post manifest
    #[command(alias = "g")]
    Generate,

    /// List categories, or the posts of one category
    List {
        /// Category to list (omit for the tally)
        category: Option<String>,
    },

    /// Show the visible window of a listing after scrolling
    Page {
        /// Category to show
        #[arg(default_value = ALL_CATEGORY)]
        category: String,

        /// Number of times to scroll to the end of the list
        #[arg(short, long, default_value = "0")]
        scrolls: usize,
    },

    /// Search post titles
    Search {
        /// One or more queries, run against the same loaded index
        #[arg(required = true)]
        queries: Vec<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postfeed=debug,info"
    } else {
        "postfeed=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate => {
            let blog = postfeed::Blog::new(&base_dir)?;
            tracing::info!("Generating search index and manifest...");
            blog.generate()?;
            println!("Generated successfully!");
        }

        Commands::List { category } => {
            let blog = postfeed::Blog::new(&base_dir)?;
            postfeed::commands::list::run(&blog, category.as_deref())?;
        }

        Commands::Page { category, scrolls } => {
            let blog = postfeed::Blog::new(&base_dir)?;
            postfeed::commands::page::run(&blog, &category, scrolls)?;
        }

        Commands::Search { queries } => {
            let blog = postfeed::Blog::new(&base_dir)?;
            postfeed::commands::search::run(&blog, &queries).await?;
        }

        Commands::Version => {
            println!("postfeed version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
