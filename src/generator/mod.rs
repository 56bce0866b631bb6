//! Generator module - writes the data artifacts the listing and search consume

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::Post;
use crate::listing::CategoryTally;
use crate::search::SearchIndex;
use crate::Blog;

/// File name of the post manifest inside the public directory
pub const MANIFEST_FILE: &str = "posts.json";

/// Everything a listing page needs, without rendered HTML
#[derive(Debug, Serialize)]
pub struct PostManifest {
    pub title: String,
    pub description: String,
    pub categories: CategoryTally,
    pub posts: Vec<Post>,
}

impl PostManifest {
    pub fn new(blog: &Blog, posts: &[Post]) -> Self {
        Self {
            title: blog.config.title.clone(),
            description: blog.config.description.clone(),
            categories: CategoryTally::from_posts(posts),
            posts: posts.iter().map(Post::without_html).collect(),
        }
    }
}

/// Writes generated artifacts into the public directory
pub struct Generator<'a> {
    blog: &'a Blog,
}

impl<'a> Generator<'a> {
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Generate every artifact
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir).with_context(|| {
            format!("Failed to create {}", self.blog.public_dir.display())
        })?;

        self.generate_search_index(posts)?;
        self.generate_manifest(posts)?;

        Ok(())
    }

    /// Path of the generated search index
    pub fn search_index_path(&self) -> PathBuf {
        self.blog
            .public_dir
            .join(&self.blog.config.search.index_path)
    }

    /// Generate the search index (JSON array of {id, title, slug})
    fn generate_search_index(&self, posts: &[Post]) -> Result<()> {
        let index = SearchIndex::from_posts(posts);
        let output_path = self.search_index_path();
        write_json(&output_path, index.entries())?;
        tracing::info!("Generated {} ({} entries)", output_path.display(), index.len());
        Ok(())
    }

    /// Generate the post manifest
    fn generate_manifest(&self, posts: &[Post]) -> Result<()> {
        let manifest = PostManifest::new(self.blog, posts);
        let output_path = self.blog.public_dir.join(MANIFEST_FILE);
        write_json(&output_path, &manifest)?;
        tracing::info!(
            "Generated {} ({} categories)",
            output_path.display(),
            manifest.categories.len() - 1
        );
        Ok(())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
