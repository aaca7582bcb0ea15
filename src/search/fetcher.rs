use crate::config::PipelineConfig;
use crate::error::{ClientConfigError, FetchError};
use crate::query::SearchRequest;
use crate::schemas::SearchResult;
use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Performs one search request.
///
/// Dropping the returned future cancels the request; nothing is reported for it.
pub trait SearchFetcher: Send + Sync + 'static {
    fn fetch(
        &self,
        request: SearchRequest,
    ) -> BoxFuture<'static, Result<SearchResult, FetchError>>;
}

impl<F: SearchFetcher + ?Sized> SearchFetcher for Arc<F> {
    fn fetch(
        &self,
        request: SearchRequest,
    ) -> BoxFuture<'static, Result<SearchResult, FetchError>> {
        (**self).fetch(request)
    }
}

/// [`SearchFetcher`] over HTTPS using a shared reqwest client
#[derive(Clone)]
pub struct HttpSearchFetcher {
    client: Client,
}

impl HttpSearchFetcher {
    /// Fails only on configuration problems; nothing is sent over the network here.
    pub fn new(config: &PipelineConfig) -> Result<Self, ClientConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientConfigError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientConfigError::Build)?;

        Ok(Self { client })
    }
}

impl SearchFetcher for HttpSearchFetcher {
    fn fetch(
        &self,
        request: SearchRequest,
    ) -> BoxFuture<'static, Result<SearchResult, FetchError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let started = Instant::now();
            debug!(url = %request.url(), "sending search request");

            let response = client
                .get(request.url().clone())
                .send()
                .await
                .map_err(FetchError::network)?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(FetchError::Server {
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(FetchError::network)?;
            let result = SearchResult::from_slice(&body).map_err(|e| FetchError::Decode {
                message: e.to_string(),
            })?;

            info!(
                query = %request.query(),
                items = result.items.len(),
                total = result.total_count,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "search completed"
            );
            Ok(result)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryUrlBuilder;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    const FIXTURE: &str = r#"{"total_count":2,"incomplete_results":false,"items":[{"name":"foo","full_name":"org/foo"},{"name":"bar","full_name":"org/bar"}]}"#;

    /// Answers exactly one request with the given status line and body, handing back
    /// the raw request head.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
        });

        (format!("http://{addr}/search/repositories"), rx)
    }

    fn request_for(endpoint: &str, query: &str) -> SearchRequest {
        QueryUrlBuilder::new(endpoint, 256)
            .build(query)
            .unwrap()
            .unwrap()
    }

    fn fetcher(config: &PipelineConfig) -> HttpSearchFetcher {
        HttpSearchFetcher::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success_decodes_fixture() {
        let (endpoint, head) = serve_once("200 OK", FIXTURE).await;
        let config = PipelineConfig::default();

        let result = fetcher(&config)
            .fetch(request_for(&endpoint, "foo bar"))
            .await
            .unwrap();

        assert_eq!(result.full_names(), vec!["org/foo", "org/bar"]);

        let head = head.await.unwrap();
        assert!(head.starts_with("GET /search/repositories?q=foo+bar HTTP/1.1"));
        assert!(head.to_lowercase().contains("user-agent: repo-search/"));
        assert!(head.to_lowercase().contains("accept: application/vnd.github+json"));
        assert!(!head.to_lowercase().contains("authorization"));
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_token() {
        let (endpoint, head) = serve_once("200 OK", FIXTURE).await;
        let config = PipelineConfig::default().with_token(Some("secret".to_string()));

        fetcher(&config)
            .fetch(request_for(&endpoint, "foo"))
            .await
            .unwrap();

        let head = head.await.unwrap().to_lowercase();
        assert!(head.contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_non_200_is_server_error() {
        let (endpoint, _head) = serve_once("500 Internal Server Error", "{}").await;

        let error = fetcher(&PipelineConfig::default())
            .fetch(request_for(&endpoint, "foo"))
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Server { status: 500 }));
    }

    #[tokio::test]
    async fn test_rate_limited_is_server_error() {
        let (endpoint, _head) =
            serve_once("403 Forbidden", r#"{"message":"API rate limit exceeded"}"#).await;

        let error = fetcher(&PipelineConfig::default())
            .fetch(request_for(&endpoint, "foo"))
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Server { status: 403 }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (endpoint, _head) = serve_once("200 OK", r#"{"total_count": "oops"}"#).await;

        let error = fetcher(&PipelineConfig::default())
            .fetch(request_for(&endpoint, "foo"))
            .await
            .unwrap_err();

        match error {
            FetchError::Decode { message } => assert!(!message.is_empty()),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{addr}/search/repositories");
        let error = fetcher(&PipelineConfig::default())
            .fetch(request_for(&endpoint, "foo"))
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Network { .. }));
    }

    #[test]
    fn test_malformed_token_is_a_config_error() {
        let config =
            PipelineConfig::default().with_token(Some("ghp_abc\nX-Injected: 1".to_string()));

        let error = HttpSearchFetcher::new(&config).err().unwrap();

        assert!(matches!(error, ClientConfigError::InvalidToken));
        // The token itself never ends up in the message
        assert!(!error.to_string().contains("ghp_abc"));
    }
}
