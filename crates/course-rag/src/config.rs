//! Runtime configuration for the RAG system.

use crate::orchestrator::DEFAULT_MAX_TOOL_ROUNDS;

/// Tunable limits for query processing.
///
/// All fields have working defaults; override with struct-update
/// syntax:
///
/// ```
/// use course_rag::RagConfig;
///
/// let config = RagConfig {
///     max_tool_rounds: 3,
///     ..RagConfig::default()
/// };
/// assert_eq!(config.max_history, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagConfig {
    /// Maximum tool rounds per query before the model is forced to
    /// answer in text.
    pub max_tool_rounds: u32,
    /// Exchanges of conversation history kept per session.
    pub max_history: usize,
    /// Maximum search hits returned per tool invocation.
    pub max_search_results: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            max_history: 2,
            max_search_results: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.max_tool_rounds, 2);
        assert_eq!(config.max_history, 2);
        assert_eq!(config.max_search_results, 5);
    }
}
