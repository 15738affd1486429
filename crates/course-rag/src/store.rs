//! The course-index collaborator seam.
//!
//! The retrieval tools query an indexed corpus of course material
//! through [`CourseIndex`]. How chunks were embedded, stored, and
//! ranked is entirely the implementor's concern — this crate only
//! consumes the trait. Implementations must be safe for concurrent use
//! (tools share one index across concurrent requests).

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// A ranked chunk of course content returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The chunk text.
    pub content: String,
    /// Title of the course the chunk belongs to.
    pub course_title: String,
    /// Lesson number within the course, when known.
    pub lesson_number: Option<u32>,
}

/// A course's structural outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOutline {
    /// Exact course title.
    pub title: String,
    /// Course landing page, when known.
    pub link: Option<String>,
    /// Lessons in course order.
    pub lessons: Vec<LessonRef>,
}

/// One lesson entry in a [`CourseOutline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRef {
    /// Lesson number within the course.
    pub number: u32,
    /// Lesson title.
    pub title: String,
}

/// Error returned by index queries.
#[derive(Debug, Clone, thiserror::Error)]
#[error("index query failed: {0}")]
pub struct IndexError(pub String);

impl IndexError {
    /// Creates an index error with the given detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

/// Read access to the indexed course corpus.
///
/// Object-safe (boxed futures) so tools can hold `Arc<dyn CourseIndex>`.
pub trait CourseIndex: Send + Sync {
    /// Semantic search over indexed chunks, optionally narrowed to one
    /// course (fuzzy-matched title) and/or one lesson number.
    fn search<'a>(
        &'a self,
        query: &'a str,
        course_name: Option<&'a str>,
        lesson_number: Option<u32>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchHit>, IndexError>> + Send + 'a>>;

    /// Resolves a course title (fuzzy match) to its outline, or `None`
    /// when no course matches.
    fn outline<'a>(
        &'a self,
        course_title: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CourseOutline>, IndexError>> + Send + 'a>>;

    /// Titles of every indexed course.
    fn course_titles(&self) -> Vec<String>;
}
