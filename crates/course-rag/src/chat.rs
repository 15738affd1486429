//! Conversation turns, tool-call requests, and tool results.
//!
//! These are the foundational types the rest of the crate speaks:
//! the [`Transcript`](crate::transcript::Transcript) accumulates
//! [`ConversationTurn`]s, adapters encode them onto the wire, and the
//! orchestrator appends tool rounds as paired
//! [`AssistantToolCalls`](ConversationTurn::AssistantToolCalls) /
//! [`ToolResults`](ConversationTurn::ToolResults) turns.
//!
//! # Tool-round pairing invariant
//!
//! A `ToolResults` turn always immediately follows an
//! `AssistantToolCalls` turn and carries exactly one entry per request,
//! in request order, correlated by [`ToolCallRequest::id`]. The
//! orchestrator is the only writer of these turns and maintains the
//! pairing; adapters may rely on it when encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in the ordered conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationTurn {
    /// Text supplied by the end user (or the query wrapper around it).
    UserText {
        /// The user's text, forwarded verbatim — empty strings included.
        content: String,
    },
    /// Plain text produced by the model.
    AssistantText {
        /// The model's text.
        content: String,
    },
    /// The model requested one or more tool invocations.
    AssistantToolCalls {
        /// Requests in the order the model emitted them.
        calls: Vec<ToolCallRequest>,
    },
    /// Results for the immediately preceding tool-call turn.
    ToolResults {
        /// One entry per request, in request order.
        entries: Vec<ToolResultEntry>,
    },
}

impl ConversationTurn {
    /// Creates a user text turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::UserText {
            content: content.into(),
        }
    }

    /// Creates an assistant text turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::AssistantText {
            content: content.into(),
        }
    }

    /// Creates a tool-call turn from the model's requests.
    pub fn tool_calls(calls: Vec<ToolCallRequest>) -> Self {
        Self::AssistantToolCalls { calls }
    }

    /// Creates a tool-result turn.
    pub fn tool_results(entries: Vec<ToolResultEntry>) -> Self {
        Self::ToolResults { entries }
    }
}

/// A single tool invocation requested by the model.
///
/// Immutable once created — the orchestrator clones it into the
/// transcript and correlates the eventual result back by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Opaque correlation token, unique within a conversation.
    pub id: String,
    /// The registered name of the tool to invoke.
    pub tool_name: String,
    /// JSON arguments, validated against the tool's schema before dispatch.
    pub arguments: Value,
}

/// The result of dispatching one [`ToolCallRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultEntry {
    /// The `id` of the originating request.
    pub call_id: String,
    /// The tool that was (or failed to be) invoked.
    pub tool_name: String,
    /// Success text or failure reason.
    pub outcome: ToolOutcome,
}

/// Success or failure of a single tool dispatch.
///
/// A failure here is conversation data, not a control-flow error: the
/// reason text is surfaced to the model as if it were a result, so the
/// model can recover or explain. An empty `Ok` string is a valid,
/// distinct outcome from `Failed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolOutcome {
    /// The tool ran and produced this text (possibly empty).
    Ok(String),
    /// The dispatch failed; the reason is shown to the model verbatim.
    Failed(String),
}

impl ToolOutcome {
    /// Returns `true` for [`ToolOutcome::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The text carried by either variant.
    pub fn text(&self) -> &str {
        match self {
            Self::Ok(text) | Self::Failed(text) => text,
        }
    }
}
