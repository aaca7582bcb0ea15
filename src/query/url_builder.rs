use crate::config::PipelineConfig;
use crate::error::InvalidQueryError;
use url::Url;

/// A validated search request. Only [`QueryUrlBuilder::build`] constructs one, so it
/// never wraps an empty query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    url: Url,
}

impl SearchRequest {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Maps raw query text to a [`SearchRequest`] against a fixed endpoint.
#[derive(Debug, Clone)]
pub struct QueryUrlBuilder {
    endpoint: String,
    max_query_len: usize,
}

impl QueryUrlBuilder {
    pub fn new(endpoint: impl Into<String>, max_query_len: usize) -> Self {
        Self {
            endpoint: endpoint.into(),
            max_query_len,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.endpoint.clone(), config.max_query_len)
    }

    /// `Ok(None)` for the empty string: no request is made for it.
    ///
    /// Whitespace is not trimmed; `" "` is a real query.
    pub fn build(&self, query: &str) -> Result<Option<SearchRequest>, InvalidQueryError> {
        if query.is_empty() {
            return Ok(None);
        }

        let length = query.chars().count();
        if length > self.max_query_len {
            return Err(InvalidQueryError {
                query: query.to_string(),
                reason: format!(
                    "query is {length} characters, the limit is {}",
                    self.max_query_len
                ),
            });
        }

        let url = Url::parse_with_params(&self.endpoint, &[("q", query)]).map_err(|e| {
            InvalidQueryError {
                query: query.to_string(),
                reason: format!("cannot build request URL: {e}"),
            }
        })?;

        Ok(Some(SearchRequest {
            query: query.to_string(),
            url,
        }))
    }
}
