//! Anthropic adapter configuration.

use std::time::Duration;

/// Default model for course Q&A.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default response budget. Answers are sourced snippets, not essays,
/// so this stays small.
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Settings for [`AnthropicAdapter`](crate::AnthropicAdapter).
///
/// Only the API key is required; everything else defaults to the
/// Messages API production values. Override individual fields with
/// struct update syntax:
///
/// ```rust
/// use std::time::Duration;
/// use course_rag_anthropic::AnthropicConfig;
///
/// let config = AnthropicConfig {
///     timeout: Some(Duration::from_secs(30)),
///     ..AnthropicConfig::new("sk-ant-...")
/// };
/// ```
#[derive(Clone)]
pub struct AnthropicConfig {
    /// Anthropic API key. Required.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Base URL for the API. Override for proxies or testing.
    pub base_url: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
    /// Request timeout. `None` uses reqwest's default.
    pub timeout: Option<Duration>,
    /// Pre-configured HTTP client, for connection pooling. When
    /// `None`, the adapter builds its own.
    pub client: Option<reqwest::Client>,
}

impl AnthropicConfig {
    /// Creates a config with the given API key and default everything
    /// else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

// The API key must never reach logs; RagSystem and the adapter both
// derive Debug through this.
impl std::fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &"<hidden>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("client", &self.client.is_some())
            .finish()
    }
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.into(),
            base_url: "https://api.anthropic.com".into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_version: "2023-06-01".into(),
            timeout: None,
            client: None,
        }
    }
}
