//! Multi-round response orchestration.
//!
//! The orchestrator drives the conversation between the model and the
//! tool registry: it sends the accumulated transcript to the adapter,
//! executes any requested tools, folds the results back into the
//! transcript, and repeats until the model answers in text or the
//! round budget runs out. On the final permitted call no tool schemas
//! are offered, which forces a text answer.
//!
//! Failure handling is asymmetric on purpose. An adapter failure is
//! terminal and yields a fixed fallback reply; a tool failure is
//! recoverable and is fed back to the model as an error-marked result
//! so it can recover within the same conversation.

use tracing::{debug, warn};

use crate::adapter::{DynLlmAdapter, ModelRequest, StopSignal, ToolDefinition};
use crate::chat::{ConversationTurn, ToolOutcome, ToolResultEntry};
use crate::tool::ToolRegistry;
use crate::transcript::Transcript;

/// Reply returned when the model call itself fails.
pub const SERVICE_FAILURE_REPLY: &str = "I encountered an error while processing your request.";

/// Reply returned when a tool round cannot be assembled.
pub const TOOL_RESULTS_FAILURE_REPLY: &str =
    "I encountered an error while processing tool results.";

/// Default budget of tool rounds per query.
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 2;

/// Default system prompt for course-material queries.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an AI assistant specialized in course materials and educational content.

Tool usage:
- Use search_course_content for questions about specific course content or detailed educational materials.
- Use get_course_outline for questions about a course's structure, lesson list, or links.
- You may use tools across multiple rounds to refine or broaden a search before answering.
- If a tool yields no results, say so briefly; never invent content.

Responses are brief, accurate, and sourced from the retrieved material. \
Answer general knowledge questions directly without tools.";

/// Drives bounded multi-round conversations against an LLM adapter.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    system_prompt: String,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

impl Orchestrator {
    /// Creates an orchestrator with the given system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    /// Produces a response to `query`, running tool rounds as the model
    /// requests them.
    ///
    /// Tooling is active only when both `tools` (non-empty) and
    /// `registry` are supplied. Up to `max_tool_rounds` rounds of tool
    /// execution are permitted; once the budget is spent the model is
    /// called one final time without tool schemas.
    ///
    /// This never fails: terminal errors collapse to a fixed fallback
    /// reply so callers always have something to show the user.
    pub async fn generate_response(
        &self,
        adapter: &dyn DynLlmAdapter,
        query: &str,
        conversation_history: Option<&str>,
        tools: Option<&[ToolDefinition]>,
        registry: Option<&ToolRegistry>,
        max_tool_rounds: u32,
    ) -> String {
        let system = match conversation_history {
            Some(history) if !history.is_empty() => {
                format!("{}\n\nPrevious conversation:\n{history}", self.system_prompt)
            }
            _ => self.system_prompt.clone(),
        };

        let tooling = match (tools, registry) {
            (Some(tools), Some(registry)) if !tools.is_empty() => Some((tools, registry)),
            _ => None,
        };

        let mut transcript = Transcript::new();
        transcript.append(ConversationTurn::user(query));

        let mut rounds_used: u32 = 0;
        loop {
            let offer_tools = tooling.is_some() && rounds_used < max_tool_rounds;
            let request = ModelRequest {
                system: system.clone(),
                turns: transcript.snapshot(),
                tools: if offer_tools {
                    tooling.map(|(tools, _)| tools.to_vec())
                } else {
                    None
                },
            };

            let response = match adapter.call_boxed(&request).await {
                Ok(response) => response,
                Err(error) => {
                    warn!(%error, rounds_used, "model call failed");
                    return SERVICE_FAILURE_REPLY.to_string();
                }
            };

            let active_registry = match tooling {
                Some((_, registry)) if offer_tools => Some(registry),
                _ => None,
            };
            if let (StopSignal::NeedsTools, Some(registry)) = (response.stop, active_registry) {
                if response.tool_calls.is_empty() {
                    warn!(rounds_used, "model requested tools without naming any");
                    return TOOL_RESULTS_FAILURE_REPLY.to_string();
                }

                debug!(
                    rounds_used,
                    calls = response.tool_calls.len(),
                    "executing tool round"
                );
                transcript.append(ConversationTurn::tool_calls(response.tool_calls.clone()));

                let mut entries = Vec::with_capacity(response.tool_calls.len());
                for call in &response.tool_calls {
                    let outcome = match registry
                        .execute(&call.tool_name, call.arguments.clone())
                        .await
                    {
                        Ok(output) => ToolOutcome::Ok(output),
                        Err(error) => {
                            warn!(tool = %call.tool_name, %error, "tool invocation failed");
                            ToolOutcome::Failed(error.to_string())
                        }
                    };
                    entries.push(ToolResultEntry {
                        call_id: call.id.clone(),
                        tool_name: call.tool_name.clone(),
                        outcome,
                    });
                }
                transcript.append(ConversationTurn::tool_results(entries));

                rounds_used += 1;
                continue;
            }

            return response.into_text();
        }
    }
}
