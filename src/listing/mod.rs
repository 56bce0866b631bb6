//! Listing module - category filtering and incremental reveal of the post list

mod category;
mod paginator;
mod surface;

pub use category::{filter_posts, CategoryTally, ALL_CATEGORY};
pub use paginator::{
    Paginator, PaginatorConfig, PaginatorState, DEFAULT_PAGE_SIZE, DEFAULT_THRESHOLD,
};
pub use surface::{HeadlessSurface, IntersectionEvent, Surface, Ticket};

use thiserror::Error;

/// Rejected listing configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    #[error("visibility threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),
}
