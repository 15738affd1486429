//! Anthropic `LlmAdapter` implementation.

use course_rag::{AdapterError, AdapterResponse, LlmAdapter, ModelRequest};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::instrument;

use crate::config::AnthropicConfig;
use crate::convert;

/// Anthropic Claude adapter implementing [`LlmAdapter`].
///
/// Talks to the Anthropic Messages API with tool calling in the
/// single-request, non-streaming form the orchestrator needs.
///
/// # Example
///
/// ```rust,no_run
/// use course_rag_anthropic::{AnthropicAdapter, AnthropicConfig};
/// use course_rag::{LlmAdapter, ModelRequest, ConversationTurn};
///
/// # async fn example() -> Result<(), course_rag::AdapterError> {
/// let adapter = AnthropicAdapter::new(AnthropicConfig::new(
///     std::env::var("ANTHROPIC_API_KEY").unwrap(),
/// ));
///
/// let response = adapter.call(&ModelRequest {
///     system: "You are concise.".into(),
///     turns: vec![ConversationTurn::user("Hello!")],
///     tools: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AnthropicAdapter {
    config: AnthropicConfig,
    client: reqwest::Client,
}

impl AnthropicAdapter {
    /// Create a new Anthropic adapter from configuration.
    ///
    /// If `config.client` is `Some`, that client is reused for
    /// connection pooling. Otherwise a new client is built with the
    /// configured timeout.
    pub fn new(config: AnthropicConfig) -> Self {
        let client = config.client.clone().unwrap_or_else(|| {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = config.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build().expect("failed to build HTTP client")
        });
        Self { config, client }
    }

    /// Build the default headers for Anthropic API requests.
    fn default_headers(&self) -> Result<HeaderMap, AdapterError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.config.api_key).map_err(|_| {
                AdapterError::Auth("API key contains invalid header characters".into())
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&self.config.api_version).map_err(|_| {
                AdapterError::InvalidRequest(
                    "API version contains invalid header characters".into(),
                )
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Build the full URL for the messages endpoint.
    fn messages_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/v1/messages")
    }

    /// Send a request to the Anthropic Messages API and return the raw
    /// response after validating the HTTP status.
    async fn send_request(
        &self,
        request: &ModelRequest,
    ) -> Result<reqwest::Response, AdapterError> {
        let request_body = convert::build_request(request, &self.config);
        let headers = self.default_headers()?;

        let response = self
            .client
            .post(self.messages_url())
            .headers(headers)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AdapterError::Timeout {
                        elapsed_ms: self
                            .config
                            .timeout
                            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
                    }
                } else {
                    AdapterError::Http {
                        status: e.status().map(|s| {
                            http::StatusCode::from_u16(s.as_u16())
                                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
                        }),
                        message: e.to_string(),
                        retryable: e.is_connect() || e.is_timeout(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let http_status = http::StatusCode::from_u16(status.as_u16())
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
            return Err(convert::convert_error(http_status, &body));
        }

        Ok(response)
    }
}

impl LlmAdapter for AnthropicAdapter {
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn call(&self, request: &ModelRequest) -> Result<AdapterResponse, AdapterError> {
        let response = self.send_request(request).await?;

        let body = response
            .text()
            .await
            .map_err(|e| AdapterError::ResponseFormat {
                message: format!("Failed to read Anthropic response body: {e}"),
                raw: String::new(),
            })?;
        let api_response: crate::types::Response =
            serde_json::from_str(&body).map_err(|e| AdapterError::ResponseFormat {
                message: format!("Failed to parse Anthropic response: {e}"),
                raw: body,
            })?;

        Ok(convert::convert_response(api_response))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_messages_url() {
        let adapter = AnthropicAdapter::new(AnthropicConfig {
            base_url: "https://api.anthropic.com".into(),
            ..Default::default()
        });
        assert_eq!(adapter.messages_url(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_messages_url_custom_base() {
        let adapter = AnthropicAdapter::new(AnthropicConfig {
            base_url: "http://localhost:8080".into(),
            ..Default::default()
        });
        assert_eq!(adapter.messages_url(), "http://localhost:8080/v1/messages");
    }

    #[test]
    fn test_messages_url_trailing_slash() {
        let adapter = AnthropicAdapter::new(AnthropicConfig {
            base_url: "https://proxy.example.com/".into(),
            ..Default::default()
        });
        assert_eq!(adapter.messages_url(), "https://proxy.example.com/v1/messages");
    }

    #[test]
    fn test_default_headers() {
        let adapter = AnthropicAdapter::new(AnthropicConfig {
            api_key: "sk-ant-test123".into(),
            api_version: "2023-06-01".into(),
            ..Default::default()
        });
        let headers = adapter.default_headers().unwrap();

        assert_eq!(headers.get("x-api-key").unwrap(), "sk-ant-test123");
        assert_eq!(headers.get("anthropic-version").unwrap(), "2023-06-01");
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_default_headers_invalid_api_key() {
        let adapter = AnthropicAdapter::new(AnthropicConfig {
            api_key: "invalid\nkey".into(),
            ..Default::default()
        });
        let err = adapter.default_headers().unwrap_err();
        assert!(matches!(err, AdapterError::Auth(_)));
    }

    #[test]
    fn test_new_with_custom_client() {
        let custom_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        let adapter = AnthropicAdapter::new(AnthropicConfig {
            client: Some(custom_client),
            ..Default::default()
        });
        assert_eq!(adapter.config.model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_new_with_timeout() {
        let adapter = AnthropicAdapter::new(AnthropicConfig {
            timeout: Some(Duration::from_secs(30)),
            ..Default::default()
        });
        assert_eq!(adapter.config.timeout, Some(Duration::from_secs(30)));
    }
}
