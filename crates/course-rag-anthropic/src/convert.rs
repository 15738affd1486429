//! Bidirectional conversion between `course-rag` types and Anthropic
//! API types.
//!
//! This module is internal — callers interact only with `course-rag`
//! types. The adapter implementation uses these functions to build
//! requests and parse responses.

use course_rag::chat::ConversationTurn;
use course_rag::{AdapterError, AdapterResponse, ModelRequest, StopSignal, ToolCallRequest};
use serde_json::Value;

use crate::config::AnthropicConfig;
use crate::types::{ContentBlock, ErrorResponse, Message, Request, Tool};

// ── Request conversion ───────────────────────────────────────────────

/// Build an Anthropic API request from a `ModelRequest` and adapter
/// config.
pub(crate) fn build_request<'a>(
    request: &'a ModelRequest,
    config: &'a AnthropicConfig,
) -> Request<'a> {
    let tools = request.tools.as_ref().map(|tools| {
        tools
            .iter()
            .map(|t| Tool {
                name: &t.name,
                description: &t.description,
                input_schema: t.parameters.as_value(),
            })
            .collect()
    });

    Request {
        model: &config.model,
        messages: convert_turns(&request.turns),
        max_tokens: config.max_tokens,
        system: (!request.system.is_empty()).then_some(request.system.as_str()),
        tools,
    }
}

/// Convert conversation turns to Anthropic message format.
///
/// Tool results travel in "user" role messages with `ToolResult`
/// content blocks; a failed outcome sets `is_error` so the model sees
/// the failure for what it is.
fn convert_turns(turns: &[ConversationTurn]) -> Vec<Message> {
    turns
        .iter()
        .map(|turn| match turn {
            ConversationTurn::UserText { content } => Message {
                role: "user",
                content: vec![ContentBlock::Text {
                    text: content.clone(),
                }],
            },
            ConversationTurn::AssistantText { content } => Message {
                role: "assistant",
                content: vec![ContentBlock::Text {
                    text: content.clone(),
                }],
            },
            ConversationTurn::AssistantToolCalls { calls } => Message {
                role: "assistant",
                content: calls
                    .iter()
                    .map(|call| ContentBlock::ToolUse {
                        id: call.id.clone(),
                        name: call.tool_name.clone(),
                        input: call.arguments.clone(),
                    })
                    .collect(),
            },
            ConversationTurn::ToolResults { entries } => Message {
                role: "user",
                content: entries
                    .iter()
                    .map(|entry| ContentBlock::ToolResult {
                        tool_use_id: entry.call_id.clone(),
                        content: entry.outcome.text().to_string(),
                        is_error: entry.outcome.is_failure(),
                    })
                    .collect(),
            },
        })
        .collect()
}

// ── Response conversion ──────────────────────────────────────────────

/// Convert an Anthropic API response to an `AdapterResponse`.
pub(crate) fn convert_response(resp: crate::types::Response) -> AdapterResponse {
    let mut text_parts: Vec<String> = Vec::new();
    let mut tool_calls: Vec<ToolCallRequest> = Vec::new();

    for block in resp.content {
        match block.content_type.as_str() {
            "text" => {
                if let Some(text) = block.text {
                    text_parts.push(text);
                }
            }
            "tool_use" => {
                tool_calls.push(ToolCallRequest {
                    id: block.id.unwrap_or_default(),
                    tool_name: block.name.unwrap_or_default(),
                    arguments: block.input.unwrap_or(Value::Object(serde_json::Map::default())),
                });
            }
            // thinking and unknown block types carry nothing we need
            _ => {}
        }
    }

    let stop = match resp.stop_reason.as_deref() {
        Some("tool_use") => StopSignal::NeedsTools,
        _ => StopSignal::Done,
    };

    AdapterResponse {
        text: (!text_parts.is_empty()).then(|| text_parts.join("\n")),
        tool_calls,
        stop,
    }
}

// ── Error conversion ─────────────────────────────────────────────────

/// Convert an HTTP status + optional error body into an `AdapterError`.
pub(crate) fn convert_error(status: http::StatusCode, body: &str) -> AdapterError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map_or_else(|_| body.to_string(), |e| e.error.message);

    if status == http::StatusCode::UNAUTHORIZED || status == http::StatusCode::FORBIDDEN {
        return AdapterError::Auth(message);
    }

    if status == http::StatusCode::BAD_REQUEST {
        return AdapterError::InvalidRequest(message);
    }

    let retryable = matches!(status.as_u16(), 429 | 500 | 502 | 503 | 529);

    AdapterError::Http {
        status: Some(status),
        message,
        retryable,
    }
}
