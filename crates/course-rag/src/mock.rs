//! Scripted adapter for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::adapter::{AdapterResponse, LlmAdapter, ModelRequest};
use crate::error::AdapterError;

/// An [`LlmAdapter`] that replays a queue of scripted outcomes and
/// records every request it receives.
///
/// Responses are consumed front-to-back, one per call. Calling past
/// the end of the queue panics, which in a test points straight at the
/// script/flow mismatch.
#[derive(Default)]
pub struct MockAdapter {
    script: Mutex<VecDeque<Result<AdapterResponse, AdapterError>>>,
    calls: Mutex<Vec<ModelRequest>>,
}

impl std::fmt::Debug for MockAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAdapter")
            .field("queued", &self.script.lock().unwrap_or_else(|e| e.into_inner()).len())
            .field("calls", &self.call_count())
            .finish()
    }
}

impl MockAdapter {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn queue_response(&self, response: AdapterResponse) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(response));
    }

    /// Queues a failure.
    pub fn queue_error(&self, error: AdapterError) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// All requests received so far, in call order.
    pub fn recorded_calls(&self) -> Vec<ModelRequest> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl LlmAdapter for MockAdapter {
    async fn call(&self, request: &ModelRequest) -> Result<AdapterResponse, AdapterError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .expect("MockAdapter called with an empty script")
    }
}
