//! Search index entries and fuzzy title matching

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher};
use serde::{Deserialize, Serialize};

use crate::content::Post;

/// One record of the prebuilt search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexEntry {
    pub id: String,
    pub title: String,
    pub slug: String,
}

impl From<&Post> for SearchIndexEntry {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
        }
    }
}

// Titles are the only searchable field
impl AsRef<str> for SearchIndexEntry {
    fn as_ref(&self) -> &str {
        &self.title
    }
}

/// A matched entry, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub score: u32,
}

/// In-memory search index
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<SearchIndexEntry>,
}

impl SearchIndex {
    pub fn new(entries: Vec<SearchIndexEntry>) -> Self {
        Self { entries }
    }

    /// Build the index for a post list
    pub fn from_posts(posts: &[Post]) -> Self {
        Self::new(posts.iter().map(SearchIndexEntry::from).collect())
    }

    pub fn entries(&self) -> &[SearchIndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fuzzy match `query` against titles, case-insensitively
    ///
    /// Hits are ordered by score, ties keep index order. `limit == 0` returns
    /// every hit.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let matches = pattern.match_list(self.entries.iter(), &mut matcher);

        let limit = if limit == 0 { matches.len() } else { limit };
        matches
            .into_iter()
            .take(limit)
            .map(|(entry, score)| SearchHit {
                id: entry.id.clone(),
                title: entry.title.clone(),
                slug: entry.slug.clone(),
                score,
            })
            .collect()
    }
}
