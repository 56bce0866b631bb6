//! Content loader - loads posts from the contents directory

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post};
use crate::Blog;

/// Loads posts from the contents directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load all posts, newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let contents_dir = &self.blog.contents_dir;
        if !contents_dir.exists() {
            tracing::warn!("Contents directory {:?} does not exist", contents_dir);
            return Ok(Vec::new());
        }

        let mut dated: Vec<(Option<NaiveDateTime>, Post)> = Vec::new();

        for entry in WalkDir::new(contents_dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", contents_dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            match self.load_post(path) {
                Ok(Some(loaded)) => dated.push(loaded),
                Ok(None) => tracing::debug!("Skipping draft {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {:#}", path, e),
            }
        }

        // Newest first; undated posts sink to the end, ties broken by title
        dated.sort_by(|(a_date, a), (b_date, b)| {
            b_date.cmp(a_date).then_with(|| a.title.cmp(&b.title))
        });

        let posts: Vec<Post> = dated.into_iter().map(|(_, post)| post).collect();
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), contents_dir);
        Ok(posts)
    }

    /// Load a single post; `None` for drafts that are not rendered
    fn load_post(&self, path: &Path) -> Result<Option<(Option<NaiveDateTime>, Post)>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let (fm, body) = FrontMatter::parse(&content)?;

        if fm.draft && !self.blog.config.render_drafts {
            return Ok(None);
        }

        let relative = path.strip_prefix(&self.blog.contents_dir).unwrap_or(path);
        let id = relative.to_string_lossy().replace('\\', "/");
        let slug = slug_for(relative);

        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let published = fm.parse_date();
        let date = match (published, fm.date.as_deref()) {
            (Some(dt), _) => dt.format(&self.blog.config.date_format).to_string(),
            (None, Some(raw)) => raw.trim().to_string(),
            (None, None) => String::new(),
        };

        let summary = fm
            .summary
            .clone()
            .or_else(|| self.renderer.first_paragraph(body))
            .unwrap_or_default();

        let post = Post {
            id,
            title,
            date,
            categories: fm.categories,
            summary,
            slug,
            thumbnail: fm.thumbnail,
            html: self.renderer.render(body),
        };

        Ok(Some((published, post)))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// File-path slug: `foo/bar.md` -> `/foo/bar/`, `foo/index.md` -> `/foo/`
fn slug_for(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let mut parts: Vec<String> = without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    if parts.last().map(|p| p == "index").unwrap_or(false) {
        parts.pop();
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}
