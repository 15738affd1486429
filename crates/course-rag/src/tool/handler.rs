//! Tool trait and closure-backed implementation.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use super::ToolError;
use crate::adapter::ToolDefinition;

/// A single named capability the model can invoke.
///
/// The trait is object-safe (boxed futures) so tools can be stored as
/// `Arc<dyn Tool>` in the registry. For simple stateless tools, wrap a
/// closure with [`tool_fn`]; implement the trait directly when a tool
/// needs shared state such as an index handle.
///
/// # Source attribution
///
/// Retrieval tools report which documents backed their last result via
/// [`last_sources`](Self::last_sources), so the response layer can
/// attach a source list to the final answer. Tools without sources keep
/// the default no-op implementations. Implementations use interior
/// mutability — `execute` takes `&self` because the registry shares
/// tools across concurrent conversations.
pub trait Tool: Send + Sync {
    /// Returns the tool's definition (name, description, input schema).
    fn definition(&self) -> ToolDefinition;

    /// Executes the tool with already-validated JSON arguments.
    ///
    /// Returns the text to surface to the model. Tools with structured
    /// output should serialize it themselves — the conversation only
    /// carries text.
    fn execute<'a>(
        &'a self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>>;

    /// Sources backing the most recent execution, most relevant first.
    fn last_sources(&self) -> Vec<String> {
        Vec::new()
    }

    /// Clears recorded sources ahead of the next query.
    fn reset_sources(&self) {}
}

/// A tool backed by an async closure. Created via [`tool_fn`].
pub struct FnTool<F> {
    definition: ToolDefinition,
    handler: F,
}

impl<F> std::fmt::Debug for FnTool<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.definition.name)
            .finish_non_exhaustive()
    }
}

impl<F, Fut> Tool for FnTool<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn execute<'a>(
        &'a self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin((self.handler)(arguments))
    }
}

/// Wraps an async closure as a [`Tool`].
///
/// # Example
///
/// ```rust
/// use course_rag::tool::{tool_fn, Tool};
/// use course_rag::{JsonSchema, ToolDefinition};
/// use serde_json::{json, Value};
///
/// let echo = tool_fn(
///     ToolDefinition {
///         name: "echo".into(),
///         description: "Echo the input back".into(),
///         parameters: JsonSchema::new(json!({
///             "type": "object",
///             "properties": { "text": {"type": "string"} },
///             "required": ["text"]
///         })),
///     },
///     |input: Value| async move {
///         Ok(input["text"].as_str().unwrap_or_default().to_string())
///     },
/// );
/// assert_eq!(echo.definition().name, "echo");
/// ```
pub fn tool_fn<F, Fut>(definition: ToolDefinition, handler: F) -> FnTool<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    FnTool {
        definition,
        handler,
    }
}
