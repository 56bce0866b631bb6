//! Content module - posts and the Markdown build step that produces them

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::Post;
