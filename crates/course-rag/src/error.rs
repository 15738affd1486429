//! Unified error type for model-service calls.
//!
//! Every adapter maps its native failures into [`AdapterError`], giving
//! the orchestrator a single type to match against regardless of which
//! backend answers the call. Variants carry enough context for retry
//! decisions at the transport boundary and for diagnostics.
//!
//! The orchestrator itself never surfaces an `AdapterError` to callers —
//! it folds terminal failures into a fixed user-facing reply (see
//! [`orchestrator`](crate::orchestrator)). The taxonomy here exists for
//! adapter implementations and for anything wrapping the adapter with
//! retries or timeouts.

/// The unified error type returned by model-service adapters.
///
/// Variants are `#[non_exhaustive]` — new error kinds may be added in
/// minor releases without breaking downstream matches (always include a
/// wildcard arm).
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum AdapterError {
    /// An HTTP-level failure (transport error, unexpected status code).
    ///
    /// `status` is `None` when the request never received a response
    /// (e.g. DNS failure, connection reset).
    #[error("HTTP error (status={status:?}): {message}")]
    Http {
        /// The HTTP status code, if one was received.
        status: Option<http::StatusCode>,
        /// A human-readable description of the failure.
        message: String,
        /// Whether the caller should retry this request.
        retryable: bool,
    },

    /// The API key or token was rejected.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The request was malformed (missing fields, invalid parameters).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A service-specific error that doesn't map to another variant.
    #[error("Service error ({code}): {message}")]
    Service {
        /// Service-defined error code (e.g. `"overloaded"`).
        code: String,
        /// Human-readable error description.
        message: String,
        /// Whether the caller should retry this request.
        retryable: bool,
    },

    /// The response body could not be parsed.
    #[error("Response format error: {message}")]
    ResponseFormat {
        /// What went wrong during parsing.
        message: String,
        /// The raw response body, for diagnostics.
        raw: String,
    },

    /// The operation exceeded its deadline.
    #[error("Operation timed out after {elapsed_ms}ms")]
    Timeout {
        /// Milliseconds elapsed before the timeout fired.
        elapsed_ms: u64,
    },
}

impl AdapterError {
    /// Returns `true` if the error is transient and the request may
    /// succeed on retry.
    ///
    /// This checks the `retryable` flag on applicable variants and
    /// treats timeouts as always retryable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use course_rag::AdapterError;
    ///
    /// let err = AdapterError::Timeout { elapsed_ms: 5000 };
    /// assert!(err.is_retryable());
    ///
    /// let err = AdapterError::Auth("bad key".into());
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { retryable, .. } | Self::Service { retryable, .. } => *retryable,
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}
