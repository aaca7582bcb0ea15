//! The reactive query pipeline.
//!
//! Query edits flow through [`debounce`] and the [`Deduplicator`] into the
//! [`QueryUrlBuilder`](crate::query::QueryUrlBuilder), then to a
//! [`SearchFetcher`](crate::search::SearchFetcher). [`PipelineController`] owns the
//! published state and lets only the most recently dispatched request write it.

pub mod clock;
pub mod controller;
pub mod debounce;
pub mod dedupe;
pub mod state;


pub use clock::{Clock, TokioClock};
pub use controller::{PipelineController, PipelineObserver};
pub use debounce::{Debounce, debounce};
pub use dedupe::{Deduplicator, dedupe};
pub use state::{Phase, PipelineEvent, PipelineSnapshot, PipelineState, RequestToken};
