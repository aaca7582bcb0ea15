pub mod url_builder;

pub use url_builder::{QueryUrlBuilder, SearchRequest};
