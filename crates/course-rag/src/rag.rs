//! The top-level RAG facade.
//!
//! [`RagSystem`] wires the orchestrator, tool registry, session store,
//! and course index together behind a two-method surface: [`query`]
//! for answering questions and [`analytics`] for catalog stats.
//!
//! [`query`]: RagSystem::query
//! [`analytics`]: RagSystem::analytics

use std::sync::Arc;

use tracing::info;

use crate::adapter::DynLlmAdapter;
use crate::config::RagConfig;
use crate::orchestrator::Orchestrator;
use crate::session::SessionManager;
use crate::store::CourseIndex;
use crate::tool::{CourseOutlineTool, CourseSearchTool, ToolRegistry};

/// The answer to one query, with its supporting sources.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// The model's answer text.
    pub answer: String,
    /// Source labels recorded by the retrieval tools during this
    /// query, empty when no tool ran or nothing was found.
    pub sources: Vec<String>,
    /// The session the exchange was recorded under. Newly minted when
    /// the caller passed none.
    pub session_id: String,
}

/// Catalog statistics for the indexed courses.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CourseStats {
    /// Number of indexed courses.
    pub total_courses: usize,
    /// Titles of all indexed courses.
    pub course_titles: Vec<String>,
}

/// Ties the orchestrator, tools, sessions, and index into one system.
pub struct RagSystem {
    adapter: Arc<dyn DynLlmAdapter>,
    registry: ToolRegistry,
    sessions: SessionManager,
    orchestrator: Orchestrator,
    config: RagConfig,
    index: Arc<dyn CourseIndex>,
}

impl std::fmt::Debug for RagSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagSystem")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RagSystem {
    /// Builds a system over the given adapter and course index,
    /// registering the two built-in retrieval tools.
    pub fn new(
        adapter: Arc<dyn DynLlmAdapter>,
        index: Arc<dyn CourseIndex>,
        config: RagConfig,
    ) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(CourseSearchTool::new(
            Arc::clone(&index),
            config.max_search_results,
        ));
        registry.register(CourseOutlineTool::new(Arc::clone(&index)));

        Self {
            adapter,
            registry,
            sessions: SessionManager::new(config.max_history),
            orchestrator: Orchestrator::default(),
            config,
            index,
        }
    }

    /// Answers a question about the indexed course materials.
    ///
    /// When `session_id` is `None` a new session is created; either
    /// way the exchange is appended to the session history afterwards.
    /// Sources recorded by the tools during this query are harvested
    /// into the outcome and then cleared, so they never leak into the
    /// next query.
    pub async fn query(&self, query: &str, session_id: Option<&str>) -> QueryOutcome {
        let session_id = match session_id {
            Some(id) => id.to_string(),
            None => self.sessions.create_session(),
        };
        let history = self.sessions.history(&session_id);

        let prompt = format!("Answer this question about course materials: {query}");
        let definitions = self.registry.definitions();
        let answer = self
            .orchestrator
            .generate_response(
                self.adapter.as_ref(),
                &prompt,
                history.as_deref(),
                Some(&definitions),
                Some(&self.registry),
                self.config.max_tool_rounds,
            )
            .await;

        let sources = self.registry.last_sources();
        self.registry.reset_sources();

        self.sessions.add_exchange(&session_id, query, &answer);
        info!(%session_id, sources = sources.len(), "query answered");

        QueryOutcome {
            answer,
            sources,
            session_id,
        }
    }

    /// Returns catalog statistics for the indexed courses.
    pub fn analytics(&self) -> CourseStats {
        let course_titles = self.index.course_titles();
        CourseStats {
            total_courses: course_titles.len(),
            course_titles,
        }
    }

    /// Creates a fresh session and returns its id.
    pub fn create_session(&self) -> String {
        self.sessions.create_session()
    }
}
