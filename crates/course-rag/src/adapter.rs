//! Adapter trait and model request/response types.
//!
//! This module defines two core abstractions:
//!
//! - **[`LlmAdapter`]** — the trait every model-service backend
//!   implements. It uses native async-fn-in-traits, so implementations
//!   are straightforward `async fn`s with no macro overhead.
//!
//! - **[`DynLlmAdapter`]** — an object-safe mirror of `LlmAdapter` that
//!   uses boxed futures. A blanket `impl<T: LlmAdapter> DynLlmAdapter
//!   for T` bridges the two, so any concrete adapter can be stored as
//!   `Box<dyn DynLlmAdapter>` or `Arc<dyn DynLlmAdapter>` with zero
//!   boilerplate.
//!
//! The adapter is a stateless capability: the orchestrator passes the
//! full request — system context, transcript snapshot, and the tool
//! schemas for this round, if any — on every call. No conversation
//! state lives behind the adapter boundary, which is also what lets a
//! test double implement the same one-method contract without any
//! reflection tricks.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::{ConversationTurn, ToolCallRequest};
use crate::error::AdapterError;

/// The trait every model-service adapter implements.
///
/// # Object safety
///
/// `LlmAdapter` is **not** object-safe because AFIT returns
/// `impl Future`. When you need dynamic dispatch, use [`DynLlmAdapter`]
/// instead — every `LlmAdapter` automatically implements it via a
/// blanket impl.
pub trait LlmAdapter: Send + Sync {
    /// Sends one request to the model service and returns its response.
    fn call(
        &self,
        request: &ModelRequest,
    ) -> impl Future<Output = Result<AdapterResponse, AdapterError>> + Send;
}

/// Object-safe counterpart of [`LlmAdapter`] for dynamic dispatch.
///
/// You rarely implement this directly — the blanket
/// `impl<T: LlmAdapter> DynLlmAdapter for T` does it for you.
pub trait DynLlmAdapter: Send + Sync {
    /// Boxed-future version of [`LlmAdapter::call`].
    fn call_boxed<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AdapterResponse, AdapterError>> + Send + 'a>>;
}

impl<T: LlmAdapter> DynLlmAdapter for T {
    fn call_boxed<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AdapterResponse, AdapterError>> + Send + 'a>> {
        Box::pin(self.call(request))
    }
}

/// One model-service request, assembled fresh for every round.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelRequest {
    /// System context: the fixed instruction block, plus prior-session
    /// history when the caller supplied one. Identical across every
    /// round of a single query.
    pub system: String,
    /// Snapshot of the transcript at the moment of the call.
    pub turns: Vec<ConversationTurn>,
    /// Tool schemas offered this round. `None` when the caller supplied
    /// no tools or the round budget is spent — the model then cannot
    /// request a tool round.
    pub tools: Option<Vec<ToolDefinition>>,
}

/// The model's explicit indication of whether it is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopSignal {
    /// The model produced its final answer.
    Done,
    /// The model wants tool results before continuing.
    NeedsTools,
}

/// A structured response from the model service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterResponse {
    /// Text content, if the model produced any.
    pub text: Option<String>,
    /// Tool invocations, in the order the model emitted them.
    pub tool_calls: Vec<ToolCallRequest>,
    /// Whether the model is done or wants tools.
    pub stop: StopSignal,
}

impl AdapterResponse {
    /// Consumes the response, returning its text or the empty string.
    pub fn into_text(self) -> String {
        self.text.unwrap_or_default()
    }
}

/// A tool the model can invoke, as advertised in a [`ModelRequest`].
///
/// Adapters translate this into their service's native tool format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool's name, matched against [`ToolCallRequest::tool_name`].
    pub name: String,
    /// Human-readable description shown to the model so it knows when
    /// to use this tool.
    pub description: String,
    /// JSON Schema describing the tool's expected input.
    pub parameters: JsonSchema,
}

/// A JSON Schema document used for tool parameters.
///
/// Wraps a [`serde_json::Value`] and provides validation via the
/// [`jsonschema`] crate. The inner value is private — use
/// [`as_value`](Self::as_value) for read access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema(Value);

impl JsonSchema {
    /// Creates a schema from a raw JSON value.
    pub fn new(schema: Value) -> Self {
        Self(schema)
    }

    /// Returns a reference to the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Validates `value` against this schema.
    ///
    /// Returns `Ok(())` if validation passes, or the concatenated
    /// validation messages on failure. A malformed schema itself also
    /// reports as an error.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        let validator = jsonschema::validator_for(&self.0)
            .map_err(|e| format!("invalid JSON schema: {e}"))?;
        let errors: Vec<String> = validator.iter_errors(value).map(|e| e.to_string()).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_request_defaults() {
        let req = ModelRequest::default();
        assert!(req.system.is_empty());
        assert!(req.turns.is_empty());
        assert!(req.tools.is_none());
    }

    #[test]
    fn test_stop_signal_serde() {
        let json = serde_json::to_string(&StopSignal::NeedsTools).unwrap();
        assert_eq!(json, "\"needs_tools\"");
        let back: StopSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StopSignal::NeedsTools);
    }

    #[test]
    fn test_into_text_defaults_to_empty() {
        let response = AdapterResponse {
            text: None,
            tool_calls: vec![],
            stop: StopSignal::Done,
        };
        assert_eq!(response.into_text(), "");
    }

    #[test]
    fn test_json_schema_validate_valid() {
        let schema = JsonSchema::new(serde_json::json!({
            "type": "object",
            "properties": { "query": {"type": "string"} },
            "required": ["query"]
        }));
        assert!(schema.validate(&serde_json::json!({"query": "rust"})).is_ok());
    }

    #[test]
    fn test_json_schema_validate_missing_field() {
        let schema = JsonSchema::new(serde_json::json!({
            "type": "object",
            "properties": { "query": {"type": "string"} },
            "required": ["query"]
        }));
        let err = schema.validate(&serde_json::json!({})).unwrap_err();
        assert!(err.contains("query"));
    }

    #[test]
    fn test_json_schema_validate_wrong_type() {
        let schema = JsonSchema::new(serde_json::json!({
            "type": "object",
            "properties": { "lesson_number": {"type": "integer"} }
        }));
        assert!(schema
            .validate(&serde_json::json!({"lesson_number": "four"}))
            .is_err());
    }

    #[test]
    fn test_json_schema_invalid_schema_reports() {
        let schema = JsonSchema::new(serde_json::json!({"type": "bogus_not_a_type"}));
        let err = schema.validate(&serde_json::json!(42)).unwrap_err();
        assert!(err.contains("invalid JSON schema"));
    }

    #[test]
    fn test_tool_definition_serde_roundtrip() {
        let def = ToolDefinition {
            name: "search_course_content".into(),
            description: "Search course materials".into(),
            parameters: JsonSchema::new(serde_json::json!({"type": "object"})),
        };
        let json = serde_json::to_string(&def).unwrap();
        let back: ToolDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, back);
    }

    #[test]
    fn test_model_request_serde_roundtrip() {
        let req = ModelRequest {
            system: "be helpful".into(),
            turns: vec![crate::chat::ConversationTurn::user("hi")],
            tools: Some(vec![]),
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: ModelRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
    }

    #[test]
    fn test_dyn_adapter_is_object_safe() {
        let f1: fn(&dyn DynLlmAdapter) = |_| {};
        let f2: fn(Box<dyn DynLlmAdapter>) = |_| {};
        let _ = (f1, f2);
    }
}
