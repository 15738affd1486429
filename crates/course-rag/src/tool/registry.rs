//! Tool registry: name-indexed storage and dispatch.

use std::sync::Arc;

use serde_json::Value;

use super::{Tool, ToolError};
use crate::adapter::ToolDefinition;

/// A registry of tools, indexed by name.
///
/// Dispatch is read-mostly over `Arc`ed handlers, so a registry can be
/// shared across concurrent conversations. The registry validates
/// arguments against each tool's declared schema before dispatch and
/// never retries — failure handling belongs to the round loop, which
/// folds errors back into the conversation.
///
/// Tools keep their registration order: `definitions()` advertises
/// them in that order and [`last_sources`](Self::last_sources) resolves
/// ties by it, so attribution stays deterministic when several tools
/// recorded sources in one query.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<(String, Arc<dyn Tool>)>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field(
                "tools",
                &self.tools.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool. A tool with the same name is replaced in
    /// place, keeping its original position.
    pub fn register(&mut self, tool: impl Tool + 'static) -> &mut Self {
        self.register_shared(Arc::new(tool))
    }

    /// Registers a shared tool handle.
    pub fn register_shared(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        let name = tool.definition().name;
        match self.tools.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = tool,
            None => self.tools.push((name, tool)),
        }
        self
    }

    fn lookup(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tool)| tool)
    }

    /// Returns whether a tool with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns the definitions of all registered tools, in
    /// registration order.
    ///
    /// Pass these to the orchestrator to advertise the tools to the
    /// model.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|(_, tool)| tool.definition()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns `true` if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatches a single invocation by name.
    ///
    /// 1. Looks up the tool; unknown names fail with
    ///    [`ToolError::UnknownTool`].
    /// 2. Validates `arguments` against the tool's parameter schema.
    /// 3. Invokes the tool.
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let Some(tool) = self.lookup(name) else {
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        let definition = tool.definition();
        if let Err(detail) = definition.parameters.validate(&arguments) {
            return Err(ToolError::InvalidArguments {
                tool: name.to_string(),
                detail,
            });
        }

        tool.execute(arguments).await
    }

    /// Sources backing the most recent retrieval, from the
    /// earliest-registered tool that recorded any.
    pub fn last_sources(&self) -> Vec<String> {
        self.tools
            .iter()
            .map(|(_, tool)| tool.last_sources())
            .find(|sources| !sources.is_empty())
            .unwrap_or_default()
    }

    /// Clears recorded sources on every tool.
    pub fn reset_sources(&self) {
        for (_, tool) in &self.tools {
            tool.reset_sources();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::adapter::JsonSchema;
    use crate::tool::tool_fn;

    fn add_tool_definition() -> ToolDefinition {
        ToolDefinition {
            name: "add".into(),
            description: "Add two numbers".into(),
            parameters: JsonSchema::new(serde_json::json!({
                "type": "object",
                "properties": {
                    "a": {"type": "number"},
                    "b": {"type": "number"}
                },
                "required": ["a", "b"]
            })),
        }
    }

    fn make_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(tool_fn(add_tool_definition(), |input: Value| async move {
            let a = input["a"].as_f64().unwrap_or(0.0);
            let b = input["b"].as_f64().unwrap_or(0.0);
            Ok(format!("{}", a + b))
        }));
        registry
    }

    /// A tool that always reports a fixed source list.
    struct SourcedTool {
        name: &'static str,
        sources: Mutex<Vec<String>>,
    }

    impl SourcedTool {
        fn new(name: &'static str, source: &str) -> Self {
            Self {
                name,
                sources: Mutex::new(vec![source.to_string()]),
            }
        }
    }

    impl Tool for SourcedTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: self.name.into(),
                description: "Fixed sources".into(),
                parameters: JsonSchema::new(serde_json::json!({"type": "object"})),
            }
        }

        fn execute<'a>(
            &'a self,
            _arguments: Value,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<String, ToolError>> + Send + 'a>,
        > {
            Box::pin(async move { Ok(String::new()) })
        }

        fn last_sources(&self) -> Vec<String> {
            self.sources.lock().unwrap().clone()
        }

        fn reset_sources(&self) {
            self.sources.lock().unwrap().clear();
        }
    }

    #[tokio::test]
    async fn test_execute_known_tool() {
        let registry = make_registry();
        let out = registry
            .execute("add", serde_json::json!({"a": 2, "b": 3}))
            .await
            .unwrap();
        assert_eq!(out, "5");
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = make_registry();
        let err = registry
            .execute("subtract", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::UnknownTool("subtract".into()));
    }

    #[tokio::test]
    async fn test_execute_invalid_arguments() {
        let registry = make_registry();
        let err = registry
            .execute("add", serde_json::json!({"a": 2}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { tool, .. } if tool == "add"));
    }

    #[tokio::test]
    async fn test_tool_runtime_error_propagates() {
        let mut registry = ToolRegistry::new();
        registry.register(tool_fn(
            ToolDefinition {
                name: "broken".into(),
                description: "Always fails".into(),
                parameters: JsonSchema::new(serde_json::json!({"type": "object"})),
            },
            |_input: Value| async move {
                Err(ToolError::Runtime {
                    tool: "broken".into(),
                    detail: "boom".into(),
                })
            },
        ));

        let err = registry
            .execute("broken", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Runtime { .. }));
    }

    #[test]
    fn test_definitions_and_len() {
        let registry = make_registry();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(registry.contains("add"));
        assert_eq!(registry.definitions()[0].name, "add");
    }

    #[test]
    fn test_register_replaces_same_name_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(SourcedTool::new("first", "s1"));
        registry.register(SourcedTool::new("second", "s2"));
        registry.register(SourcedTool::new("first", "s1-replaced"));

        assert_eq!(registry.len(), 2);
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(registry.last_sources(), vec!["s1-replaced"]);
    }

    #[test]
    fn test_definitions_keep_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(SourcedTool::new("zeta", "z"));
        registry.register(SourcedTool::new("alpha", "a"));
        registry.register(SourcedTool::new("mid", "m"));

        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_last_sources_prefers_earliest_registered() {
        // Both tools recorded sources in the same query; attribution
        // must not depend on map iteration order.
        for _ in 0..32 {
            let mut registry = ToolRegistry::new();
            registry.register(SourcedTool::new("search_course_content", "from-search"));
            registry.register(SourcedTool::new("get_course_outline", "from-outline"));
            assert_eq!(registry.last_sources(), vec!["from-search"]);
        }
    }

    #[test]
    fn test_last_sources_skips_empty_lists() {
        let mut registry = ToolRegistry::new();
        let empty = SourcedTool::new("empty", "ignored");
        empty.reset_sources();
        registry.register(empty);
        registry.register(SourcedTool::new("full", "kept"));
        assert_eq!(registry.last_sources(), vec!["kept"]);
    }

    #[test]
    fn test_empty_registry_sources() {
        let registry = ToolRegistry::new();
        assert!(registry.last_sources().is_empty());
        registry.reset_sources();
    }

    #[test]
    fn test_reset_sources_clears_every_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(SourcedTool::new("one", "s1"));
        registry.register(SourcedTool::new("two", "s2"));
        registry.reset_sources();
        assert!(registry.last_sources().is_empty());
    }

    #[test]
    fn test_registry_debug_lists_tools() {
        let registry = make_registry();
        assert!(format!("{registry:?}").contains("add"));
    }
}
