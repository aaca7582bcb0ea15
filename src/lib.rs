pub mod config;
pub mod error;
pub mod interactive;
pub mod pipeline;
pub mod profiling;
pub mod query;
pub mod schemas;
pub mod search;

pub use config::PipelineConfig;
pub use error::{ClientConfigError, ErrorMessage, FetchError, InvalidQueryError};
pub use pipeline::{
    Clock, Phase, PipelineController, PipelineEvent, PipelineObserver, PipelineSnapshot,
    PipelineState, TokioClock,
};
pub use query::{QueryUrlBuilder, SearchRequest};
pub use schemas::{SearchResult, SearchResultItem};
pub use search::{HttpSearchFetcher, SearchFetcher, format_search_item, format_summary};
