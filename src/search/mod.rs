pub mod fetcher;
pub mod format;

pub use fetcher::{HttpSearchFetcher, SearchFetcher};
pub use format::{format_search_item, format_summary};
