//! Category filtering and tallies for the post listing

use indexmap::IndexMap;
use serde::Serialize;

use crate::content::Post;

/// Reserved category meaning "no filter"
pub const ALL_CATEGORY: &str = "All";

/// Posts tagged with `selected`, in list order; every post for [`ALL_CATEGORY`]
pub fn filter_posts<'a>(posts: &'a [Post], selected: &str) -> Vec<&'a Post> {
    if selected == ALL_CATEGORY {
        return posts.iter().collect();
    }
    posts.iter().filter(|p| p.has_category(selected)).collect()
}

/// Post count per category, `"All"` first then categories in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTally {
    counts: IndexMap<String, usize>,
}

impl CategoryTally {
    /// Tally the categories of `posts`
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut counts = IndexMap::new();
        counts.insert(ALL_CATEGORY.to_string(), posts.len());

        for post in posts {
            for (i, category) in post.categories.iter().enumerate() {
                // A category repeated in one post's front-matter counts once;
                // a literal "All" tag cannot override the reserved entry
                if category == ALL_CATEGORY || post.categories[..i].contains(category) {
                    continue;
                }
                *counts.entry(category.clone()).or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    /// Count for `category`, `None` if no post carries it
    pub fn get(&self, category: &str) -> Option<usize> {
        self.counts.get(category).copied()
    }

    /// Total number of posts (the `"All"` entry)
    pub fn total(&self) -> usize {
        self.get(ALL_CATEGORY).unwrap_or(0)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.counts.contains_key(category)
    }

    /// Entries in navigation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of entries, including `"All"`
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no post carries a category (only `"All"` is present)
    pub fn is_empty(&self) -> bool {
        self.counts.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, categories: &[&str]) -> Post {
        Post::new(id, id, format!("/{}/", id)).with_categories(categories.iter().copied())
    }

    fn sample() -> Vec<Post> {
        vec![post("1", &["a"]), post("2", &["b"]), post("3", &["a", "b"])]
    }

    #[test]
    fn test_filter_by_category_preserves_order() {
        let posts = sample();
        let ids: Vec<&str> = filter_posts(&posts, "a").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_filter_all_is_identity() {
        let posts = sample();
        let filtered = filter_posts(&posts, ALL_CATEGORY);
        assert_eq!(filtered.len(), posts.len());
        assert!(filtered.iter().zip(&posts).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        let posts = sample();
        assert!(filter_posts(&posts, "c").is_empty());
        assert!(filter_posts(&[], "a").is_empty());
    }

    #[test]
    fn test_empty_categories_excluded() {
        let posts = vec![post("1", &[]), post("2", &["a"])];
        assert_eq!(filter_posts(&posts, "a").len(), 1);
        assert_eq!(filter_posts(&posts, ALL_CATEGORY).len(), 2);
    }

    #[test]
    fn test_tally() {
        let tally = CategoryTally::from_posts(&sample());
        let entries: Vec<(&str, usize)> = tally.iter().collect();
        assert_eq!(entries, vec![("All", 3), ("a", 2), ("b", 2)]);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.get("c"), None);
        assert!(!tally.is_empty());
    }

    #[test]
    fn test_tally_first_seen_order() {
        let posts = vec![post("1", &["z", "m"]), post("2", &["a", "z"])];
        let tally = CategoryTally::from_posts(&posts);
        let names: Vec<&str> = tally.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["All", "z", "m", "a"]);
    }

    #[test]
    fn test_tally_matches_filter_lengths() {
        let posts = vec![
            post("1", &["rust", "web"]),
            post("2", &["web"]),
            post("3", &[]),
            post("4", &["rust", "rust"]),
            post("5", &["life"]),
        ];
        let tally = CategoryTally::from_posts(&posts);
        for (name, count) in tally.iter() {
            let filtered = filter_posts(&posts, name);
            assert_eq!(filtered.len(), count, "category {}", name);
            if name != ALL_CATEGORY {
                assert!(filtered.iter().all(|p| p.has_category(name)));
            }
        }
    }

    #[test]
    fn test_empty_tally() {
        let tally = CategoryTally::from_posts(&[]);
        assert!(tally.is_empty());
        assert_eq!(tally.len(), 1);
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_tally_serializes_as_map() {
        let json = serde_json::to_string(&CategoryTally::from_posts(&sample())).unwrap();
        assert_eq!(json, r#"{"All":3,"a":2,"b":2}"#);
    }
}
