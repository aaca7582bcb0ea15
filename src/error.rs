use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The query could not be turned into a request URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid query {query:?}: {reason}")]
pub struct InvalidQueryError {
    pub query: String,
    pub reason: String,
}

/// Failure of a single search request
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connect, TLS, timeout, reading the body)
    #[error("Network error: {source}")]
    Network {
        #[source]
        source: BoxError,
    },
    /// The server answered with something other than 200 OK
    #[error("Server responded with HTTP {status}")]
    Server { status: u16 },
    /// The body was not a search result
    #[error("Could not decode search response: {message}")]
    Decode { message: String },
}

impl FetchError {
    pub fn network(source: impl Into<BoxError>) -> Self {
        FetchError::Network {
            source: source.into(),
        }
    }
}

/// The HTTP client could not be set up from the configuration
#[derive(Debug, Error)]
pub enum ClientConfigError {
    #[error("API token is not a valid HTTP header value")]
    InvalidToken,
    #[error("Could not build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// User-facing error notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub id: String,
    pub text: String,
}

impl ErrorMessage {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: text.clone(),
            text,
        }
    }
}

impl From<&InvalidQueryError> for ErrorMessage {
    fn from(error: &InvalidQueryError) -> Self {
        ErrorMessage::new(error.to_string())
    }
}

impl From<&FetchError> for ErrorMessage {
    fn from(error: &FetchError) -> Self {
        ErrorMessage::new(error.to_string())
    }
}
