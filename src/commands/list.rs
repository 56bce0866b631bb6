//! List categories and posts

use anyhow::Result;

use crate::content::Post;
use crate::listing::{filter_posts, CategoryTally, ALL_CATEGORY};
use crate::Blog;

/// Print the category tally, or the posts of one category
pub fn run(blog: &Blog, category: Option<&str>) -> Result<()> {
    let posts = blog.load_posts()?;

    match category {
        None => {
            let tally = CategoryTally::from_posts(&posts);
            println!("Categories ({}):", tally.len() - 1);
            for (name, count) in tally.iter() {
                println!("  {} ({})", name, count);
            }
        }
        Some(category) => {
            let selected = filter_posts(&posts, category);
            if selected.is_empty() && category != ALL_CATEGORY {
                tracing::warn!("No posts in category {:?}", category);
            }
            println!("Posts in {} ({}):", category, selected.len());
            for post in selected {
                println!("{}", format_post(post));
            }
        }
    }

    Ok(())
}

/// One line per post: date, title, slug
pub fn format_post(post: &Post) -> String {
    if post.date.is_empty() {
        format!("  {} [{}]", post.title, post.slug)
    } else {
        format!("  {} - {} [{}]", post.date, post.title, post.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_post() {
        let mut post = Post::new("a.md", "Hello", "/a/");
        assert_eq!(format_post(&post), "  Hello [/a/]");
        post.date = "2021.03.04.".to_string();
        assert_eq!(format_post(&post), "  2021.03.04. - Hello [/a/]");
    }
}
