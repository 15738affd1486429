//! Tool layer: handlers, registry, and the built-in retrieval tools.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Tool`] / [`tool_fn`] | The handler trait and its closure wrapper |
//! | [`ToolRegistry`] | Name-indexed dispatch with schema validation |
//! | [`CourseSearchTool`] | Content search over a [`CourseIndex`](crate::store::CourseIndex) |
//! | [`CourseOutlineTool`] | Full course structure lookups |
//!
//! Tools return plain strings. A failed invocation is a
//! [`ToolError`], which the round loop renders back into the
//! conversation rather than aborting it, so the model can see what
//! went wrong and adjust.

mod error;
mod handler;
mod outline;
mod registry;
mod search;

pub use error::ToolError;
pub use handler::{FnTool, Tool, tool_fn};
pub use outline::CourseOutlineTool;
pub use registry::ToolRegistry;
pub use search::CourseSearchTool;
