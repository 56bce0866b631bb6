//! Configuration module

mod site;

pub use site::ListingConfig;
pub use site::SearchConfig;
pub use site::SiteConfig;
