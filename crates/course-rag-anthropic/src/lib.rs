//! Anthropic Claude adapter for `course-rag`.
//!
//! This crate implements [`LlmAdapter`](course_rag::LlmAdapter) over
//! Anthropic's Messages API in the non-streaming, tool-calling form
//! the orchestrator drives.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use course_rag::{RagConfig, RagSystem};
//! use course_rag_anthropic::{AnthropicAdapter, AnthropicConfig};
//! # fn index() -> Arc<dyn course_rag::CourseIndex> { unimplemented!() }
//!
//! # async fn example() {
//! let adapter = AnthropicAdapter::new(AnthropicConfig::new(
//!     std::env::var("ANTHROPIC_API_KEY").unwrap(),
//! ));
//!
//! let system = RagSystem::new(Arc::new(adapter), index(), RagConfig::default());
//! let outcome = system.query("What does lesson 2 cover?", None).await;
//! println!("{}", outcome.answer);
//! # }
//! ```

#![warn(missing_docs)]

mod adapter;
mod config;
mod convert;
mod types;

pub use adapter::AnthropicAdapter;
pub use config::{AnthropicConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
