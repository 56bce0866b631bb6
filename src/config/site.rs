//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::listing::{ConfigError, PaginatorConfig, DEFAULT_PAGE_SIZE, DEFAULT_THRESHOLD};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // Directory
    pub contents_dir: String,
    pub public_dir: String,

    // Writing
    pub render_drafts: bool,
    pub date_format: String,

    // Listing
    #[serde(default)]
    pub listing: ListingConfig,

    // Search
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),

            contents_dir: "contents".to_string(),
            public_dir: "public".to_string(),

            render_drafts: false,
            date_format: "%Y.%m.%d.".to_string(),

            listing: ListingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Infinite-scroll listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Posts revealed per increment
    pub page_size: usize,
    /// Fraction of the last item that must be visible before revealing more
    pub threshold: f64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ListingConfig {
    /// Validate into a paginator configuration
    pub fn paginator_config(&self) -> Result<PaginatorConfig, ConfigError> {
        PaginatorConfig::new(self.page_size, self.threshold)
    }
}

/// Search index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Index file, relative to the public directory
    pub index_path: String,
    /// Where clients fetch the index from; the local file is used when unset
    pub public_url: Option<String>,
    /// Maximum number of hits returned per query (0 = unlimited)
    pub max_results: usize,
    /// HTTP timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: "search.json".to_string(),
            public_url: None,
            max_results: 0,
            timeout_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.contents_dir, "contents");
        assert_eq!(config.listing.page_size, 4);
        assert_eq!(config.listing.threshold, 1.0);
        assert_eq!(config.search.index_path, "search.json");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
theme: landscape
listing:
  page_size: 6
search:
  public_url: https://example.com/search.json
  max_results: 8
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.listing.page_size, 6);
        assert_eq!(config.listing.threshold, 1.0);
        assert_eq!(
            config.search.public_url.as_deref(),
            Some("https://example.com/search.json")
        );
        assert_eq!(config.search.max_results, 8);
    }

    #[test]
    fn test_invalid_listing_rejected() {
        let yaml = "listing:\n  page_size: 0\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.listing.paginator_config().is_err());
    }
}
