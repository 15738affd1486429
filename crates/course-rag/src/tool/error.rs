//! Tool dispatch error types.

/// Error returned by tool dispatch.
///
/// The orchestrator treats every variant identically — converted to a
/// `Failed` result entry and folded back into the conversation — so the
/// taxonomy exists for logging and for callers invoking the registry
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// No tool with this name is registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments failed validation against the tool's schema.
    #[error("Invalid arguments for tool '{tool}': {detail}")]
    InvalidArguments {
        /// The tool whose schema rejected the arguments.
        tool: String,
        /// Concatenated validation messages.
        detail: String,
    },

    /// The tool implementation itself failed.
    #[error("Tool '{tool}' failed: {detail}")]
    Runtime {
        /// The tool that failed.
        tool: String,
        /// What went wrong.
        detail: String,
    },
}
