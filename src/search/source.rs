//! Where the prebuilt search index is fetched from

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use super::SearchIndexEntry;
use crate::Blog;

/// Failure to obtain the search index
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed search index: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A fetchable search index artifact
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Fetch and decode the whole index
    async fn fetch(&self) -> Result<Vec<SearchIndexEntry>, FetchError>;

    /// Human-readable location, for logs
    fn location(&self) -> String;
}

/// Index served over HTTP
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl IndexSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<SearchIndexEntry>, FetchError> {
        let entries = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<SearchIndexEntry>>()
            .await?;
        Ok(entries)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Index read from the generated public directory
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IndexSource for FileSource {
    async fn fetch(&self) -> Result<Vec<SearchIndexEntry>, FetchError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// The source selected by the site configuration
pub enum ConfiguredSource {
    Http(HttpSource),
    File(FileSource),
}

impl ConfiguredSource {
    /// `search.public_url` when set, otherwise the generated index file
    pub fn from_blog(blog: &Blog) -> Result<Self, FetchError> {
        let search = &blog.config.search;
        match &search.public_url {
            Some(url) => Ok(Self::Http(HttpSource::new(
                url.clone(),
                Duration::from_millis(search.timeout_ms),
            )?)),
            None => Ok(Self::File(FileSource::new(
                blog.public_dir.join(&search.index_path),
            ))),
        }
    }
}

#[async_trait]
impl IndexSource for ConfiguredSource {
    async fn fetch(&self) -> Result<Vec<SearchIndexEntry>, FetchError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }

    fn location(&self) -> String {
        match self {
            Self::Http(source) => source.location(),
            Self::File(source) => source.location(),
        }
    }
}
