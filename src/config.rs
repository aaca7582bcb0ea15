//! Pipeline configuration.
//!
//! The endpoint is a fixed value for the shipped binary; it lives here rather than
//! in a constant so tests can point the fetcher at a local responder.

use std::time::Duration;

/// GitHub repository search endpoint
pub const GITHUB_SEARCH_ENDPOINT: &str = "https://api.github.com/search/repositories";

/// Default quiescence window before a typed query is sent
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// GitHub rejects search queries longer than this many characters
pub const MAX_QUERY_LEN: usize = 256;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub endpoint: String,
    pub debounce: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub token: Option<String>,
    pub max_query_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint: GITHUB_SEARCH_ENDPOINT.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: format!("repo-search/{}", env!("CARGO_PKG_VERSION")),
            token: None,
            max_query_len: MAX_QUERY_LEN,
        }
    }
}

impl PipelineConfig {
    pub fn with_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.debounce = Duration::from_millis(delay_ms);
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.endpoint, GITHUB_SEARCH_ENDPOINT);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert!(config.user_agent.starts_with("repo-search/"));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = PipelineConfig::default().with_token(Some("  ".to_string()));
        assert!(config.token.is_none());

        let config = PipelineConfig::default().with_token(Some("ghp_abc".to_string()));
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
    }

    #[test]
    fn test_debounce_is_per_instance() {
        let fast = PipelineConfig::default().with_debounce_ms(50);
        let slow = PipelineConfig::default().with_debounce_ms(800);
        assert_eq!(fast.debounce, Duration::from_millis(50));
        assert_eq!(slow.debounce, Duration::from_millis(800));
    }
}
