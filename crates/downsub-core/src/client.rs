//! HTTP client for the captured caption API
//!
//! Fetches the endpoint recorded during browser navigation and the
//! derived track download URLs. Every fetch is a single attempt.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{DownsubError, Result};
use crate::types::RawAggregatorResponse;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for the aggregator's caption and subtitle services
#[derive(Debug, Clone)]
pub struct CaptionClient {
    client: reqwest::Client,
}

impl CaptionClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(DownsubError::HttpError)?;

        Ok(Self { client })
    }

    /// Fetch and decode the caption payload behind a captured endpoint
    ///
    /// # Errors
    /// - `HttpError` - Network errors
    /// - `FetchStatus` - Endpoint answered with a non-2xx status
    /// - `MalformedResponse` - Body is not the expected JSON document
    pub async fn fetch_captions(&self, endpoint: &str) -> Result<RawAggregatorResponse> {
        let body = self.fetch_text(endpoint).await?;

        serde_json::from_str(&body).map_err(|e| DownsubError::MalformedResponse(e.to_string()))
    }

    /// Fetch a URL and return its body as text
    ///
    /// # Errors
    /// - `HttpError` - Network errors
    /// - `FetchStatus` - Server answered with a non-2xx status
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(DownsubError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownsubError::FetchStatus(status.as_u16()));
        }

        response.text().await.map_err(DownsubError::HttpError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.user_agent, USER_AGENT);
    }

    #[test]
    fn test_client_config_partial_deserialize() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"timeout_secs": 5}"#).expect("Deserialization should succeed");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, USER_AGENT);
    }

    #[test]
    fn test_client_creation() {
        let client = CaptionClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_captions_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("token", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"sourceName":"Youtube","urlSubtitle":"https://x/y","subtitles":[{"name":"English","url":"abc"}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = CaptionClient::new().unwrap();
        let raw = client
            .fetch_captions(&format!("{}/?token=abc", server.uri()))
            .await
            .unwrap();

        assert_eq!(raw.source_name, "Youtube");
        assert_eq!(raw.subtitles[0].url, "abc");
    }

    #[tokio::test]
    async fn test_fetch_captions_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = CaptionClient::new().unwrap();
        let result = client.fetch_captions(&server.uri()).await;

        match result {
            Err(DownsubError::FetchStatus(500)) => {}
            other => panic!("Expected FetchStatus(500), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_captions_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let client = CaptionClient::new().unwrap();
        let result = client.fetch_captions(&server.uri()).await;

        match result {
            Err(DownsubError::MalformedResponse(_)) => {}
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_text_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = CaptionClient::new().unwrap();
        let result = client.fetch_text(&server.uri()).await;

        assert!(matches!(result, Err(DownsubError::FetchStatus(404))));
    }

    #[tokio::test]
    async fn test_fetch_text_connection_refused() {
        let client = CaptionClient::new().unwrap();
        let result = client.fetch_text("http://127.0.0.1:9/").await;

        match result {
            Err(e @ DownsubError::HttpError(_)) => {
                assert_eq!(e.kind(), crate::error::ErrorKind::Fetch)
            }
            other => panic!("Expected HttpError, got {:?}", other),
        }
    }
}
