//! CLI command implementations

pub mod generate;
pub mod list;
pub mod page;
pub mod search;
