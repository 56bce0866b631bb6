//! Client-side search: the prebuilt index and its lazy loader

mod index;
mod loader;
mod source;

pub use index::{SearchHit, SearchIndex, SearchIndexEntry};
pub use loader::SearchIndexLoader;
pub use source::{ConfiguredSource, FetchError, FileSource, HttpSource, IndexSource};
