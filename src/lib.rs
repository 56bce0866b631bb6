//! postfeed: the listing core of a Markdown blog
//!
//! Posts are loaded from Markdown, tallied and filtered by category, and
//! revealed a few at a time as the reader scrolls. Titles are searchable
//! through a prebuilt index that is fetched lazily on the first query.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod listing;
pub mod search;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A blog rooted at a directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown contents directory
    pub contents_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Open a blog, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a blog from an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let contents_dir = base_dir.join(&config.contents_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            contents_dir,
            public_dir,
        }
    }

    /// Load every post, newest first
    pub fn load_posts(&self) -> Result<Vec<content::Post>> {
        content::loader::ContentLoader::new(self).load_posts()
    }

    /// Generate the search index and post manifest
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }
}
