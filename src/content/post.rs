//! Post model

use serde::{Deserialize, Serialize};

/// A blog post, as produced by the build step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (source path relative to the contents directory)
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date, already formatted for display
    pub date: String,

    /// Post categories in front-matter order
    #[serde(default)]
    pub categories: Vec<String>,

    /// Short summary shown on listing cards
    #[serde(default)]
    pub summary: String,

    /// Navigation target
    pub slug: String,

    /// Thumbnail image reference
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Rendered HTML content
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html: String,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: String::new(),
            categories: Vec::new(),
            summary: String::new(),
            slug: slug.into(),
            thumbnail: None,
            html: String::new(),
        }
    }

    /// Builder-style helper for categories
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this post is tagged with `category`
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// A copy without the rendered HTML, for manifests
    pub fn without_html(&self) -> Self {
        Self {
            html: String::new(),
            ..self.clone()
        }
    }
}
