//! Tool-augmented retrieval over course materials.
//!
//! This crate orchestrates bounded multi-round conversations between
//! an LLM and a set of retrieval tools: the model may request course
//! searches or outline lookups, the results are folded back into the
//! conversation, and after a fixed round budget the model is forced to
//! answer in text.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`chat`] | Conversation turns, tool calls, and tool results |
//! | [`transcript`] | Ordered accumulation of turns within one query |
//! | [`adapter`] | The [`LlmAdapter`] trait and request/response types |
//! | [`orchestrator`] | The bounded tool-round loop |
//! | [`tool`] | Tool trait, registry, and the built-in retrieval tools |
//! | [`store`] | The [`CourseIndex`] seam to the retrieval backend |
//! | [`session`] | Per-session conversation history |
//! | [`rag`] | The [`RagSystem`] facade |
//! | [`error`] | Adapter error taxonomy |
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use course_rag::{RagConfig, RagSystem};
//! # fn adapter() -> Arc<dyn course_rag::DynLlmAdapter> { unimplemented!() }
//! # fn index() -> Arc<dyn course_rag::CourseIndex> { unimplemented!() }
//!
//! # async fn run() {
//! let system = RagSystem::new(adapter(), index(), RagConfig::default());
//! let outcome = system.query("What does lesson 2 cover?", None).await;
//! println!("{}\nsources: {:?}", outcome.answer, outcome.sources);
//! # }
//! ```

#![warn(missing_docs)]

pub mod adapter;
pub mod chat;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod rag;
pub mod session;
pub mod store;
pub mod tool;
pub mod transcript;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

pub use adapter::{
    AdapterResponse, DynLlmAdapter, JsonSchema, LlmAdapter, ModelRequest, StopSignal,
    ToolDefinition,
};
pub use chat::{ConversationTurn, ToolCallRequest, ToolOutcome, ToolResultEntry};
pub use config::RagConfig;
pub use error::AdapterError;
pub use orchestrator::{
    DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_SYSTEM_PROMPT, Orchestrator, SERVICE_FAILURE_REPLY,
    TOOL_RESULTS_FAILURE_REPLY,
};
pub use rag::{CourseStats, QueryOutcome, RagSystem};
pub use session::SessionManager;
pub use store::{CourseIndex, CourseOutline, IndexError, LessonRef, SearchHit};
pub use tool::{CourseOutlineTool, CourseSearchTool, Tool, ToolError, ToolRegistry};
pub use transcript::Transcript;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockAdapter;
