//! Simulate a reader scrolling through a category listing

use anyhow::Result;

use crate::commands::list::format_post;
use crate::content::Post;
use crate::listing::{HeadlessSurface, Paginator, PaginatorConfig, PaginatorState};
use crate::Blog;

/// What the reader sees after scrolling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub visible: Vec<String>,
    pub filtered: usize,
    pub state: PaginatorState,
    pub scrolls_honored: usize,
}

/// Mount a listing and scroll to its end `scrolls` times
pub fn simulate(
    posts: &[Post],
    category: &str,
    scrolls: usize,
    config: PaginatorConfig,
) -> PageView {
    let mut paginator = Paginator::mount(posts, category, config, HeadlessSurface::new());
    let mut honored = 0;

    for _ in 0..scrolls {
        let Some(event) = paginator.surface().scroll_to_end() else {
            tracing::debug!("Nothing left to observe");
            break;
        };
        if paginator.on_intersection(&event) {
            honored += 1;
        }
        tracing::debug!(
            "Revealed {} of {} posts",
            paginator.visible_len(),
            paginator.filtered().len()
        );
    }

    PageView {
        visible: paginator.visible().iter().map(|p| p.id.clone()).collect(),
        filtered: paginator.filtered().len(),
        state: paginator.state(),
        scrolls_honored: honored,
    }
}

/// Print the visible window after `scrolls` scrolls
pub fn run(blog: &Blog, category: &str, scrolls: usize) -> Result<()> {
    let posts = blog.load_posts()?;
    let config = blog.config.listing.paginator_config()?;
    let view = simulate(&posts, category, scrolls, config);

    println!(
        "{}: showing {} of {} posts ({:?})",
        category,
        view.visible.len(),
        view.filtered,
        view.state
    );
    for id in &view.visible {
        if let Some(post) = posts.iter().find(|p| &p.id == id) {
            println!("{}", format_post(post));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                let category = if i % 2 == 0 { "even" } else { "odd" };
                Post::new(format!("p{}", i), format!("Post {}", i), format!("/p{}/", i))
                    .with_categories([category])
            })
            .collect()
    }

    #[test]
    fn test_no_scroll_shows_first_page() {
        let posts = posts(10);
        let view = simulate(&posts, "All", 0, PaginatorConfig::default());
        assert_eq!(view.visible, vec!["p0", "p1", "p2", "p3"]);
        assert_eq!(view.filtered, 10);
        assert_eq!(view.state, PaginatorState::Watching);
    }

    #[test]
    fn test_scrolls_until_exhausted() {
        let posts = posts(10);
        let view = simulate(&posts, "All", 5, PaginatorConfig::default());
        assert_eq!(view.visible.len(), 10);
        assert_eq!(view.state, PaginatorState::Exhausted);
        assert_eq!(view.scrolls_honored, 2);
    }

    #[test]
    fn test_category_window() {
        let posts = posts(10);
        let config = PaginatorConfig::new(2, 1.0).unwrap();
        let view = simulate(&posts, "odd", 1, config);
        assert_eq!(view.visible, vec!["p1", "p3", "p5", "p7"]);
        assert_eq!(view.filtered, 5);
        assert_eq!(view.state, PaginatorState::Watching);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let posts = posts(3);
        let view = simulate(&posts, "missing", 3, PaginatorConfig::default());
        assert!(view.visible.is_empty());
        assert_eq!(view.state, PaginatorState::Exhausted);
    }
}
