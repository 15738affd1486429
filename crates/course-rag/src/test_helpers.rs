//! Shared helpers for tests: response builders and a canned index.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::adapter::{AdapterResponse, StopSignal};
use crate::chat::ToolCallRequest;
use crate::store::{CourseIndex, CourseOutline, IndexError, SearchHit};

/// A terminal text response.
pub fn text_response(text: impl Into<String>) -> AdapterResponse {
    AdapterResponse {
        text: Some(text.into()),
        tool_calls: Vec::new(),
        stop: StopSignal::Done,
    }
}

/// A response requesting the given tool invocations.
pub fn tool_call_response(calls: Vec<ToolCallRequest>) -> AdapterResponse {
    AdapterResponse {
        text: None,
        tool_calls: calls,
        stop: StopSignal::NeedsTools,
    }
}

/// Shorthand for building a [`ToolCallRequest`].
pub fn call(id: &str, tool_name: &str, arguments: Value) -> ToolCallRequest {
    ToolCallRequest {
        id: id.into(),
        tool_name: tool_name.into(),
        arguments,
    }
}

/// A [`CourseIndex`] with fixed contents, built up fluently.
///
/// `search` returns every configured hit regardless of the query;
/// `outline` matches course titles by case-insensitive substring.
#[derive(Debug, Default, Clone)]
pub struct StaticIndex {
    hits: Vec<SearchHit>,
    outlines: Vec<CourseOutline>,
    titles: Vec<String>,
}

impl StaticIndex {
    /// Adds a search hit (and its course title to the catalog).
    pub fn with_hit(
        mut self,
        course_title: &str,
        lesson_number: Option<u32>,
        content: &str,
    ) -> Self {
        self.hits.push(SearchHit {
            content: content.into(),
            course_title: course_title.into(),
            lesson_number,
        });
        if !self.titles.iter().any(|t| t == course_title) {
            self.titles.push(course_title.into());
        }
        self
    }

    /// Adds a course outline (and its title to the catalog).
    pub fn with_outline(mut self, outline: CourseOutline) -> Self {
        if !self.titles.iter().any(|t| *t == outline.title) {
            self.titles.push(outline.title.clone());
        }
        self.outlines.push(outline);
        self
    }

    /// Adds a bare course title to the catalog.
    pub fn with_title(mut self, title: &str) -> Self {
        self.titles.push(title.into());
        self
    }
}

impl CourseIndex for StaticIndex {
    fn search<'a>(
        &'a self,
        _query: &'a str,
        course_name: Option<&'a str>,
        lesson_number: Option<u32>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchHit>, IndexError>> + Send + 'a>> {
        Box::pin(async move {
            Ok(self
                .hits
                .iter()
                .filter(|hit| {
                    course_name.map_or(true, |c| {
                        hit.course_title.to_lowercase().contains(&c.to_lowercase())
                    }) && lesson_number.map_or(true, |n| hit.lesson_number == Some(n))
                })
                .cloned()
                .collect())
        })
    }

    fn outline<'a>(
        &'a self,
        course_title: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CourseOutline>, IndexError>> + Send + 'a>>
    {
        Box::pin(async move {
            let needle = course_title.to_lowercase();
            Ok(self
                .outlines
                .iter()
                .find(|o| o.title.to_lowercase().contains(&needle))
                .cloned())
        })
    }

    fn course_titles(&self) -> Vec<String> {
        self.titles.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LessonRef;

    #[tokio::test]
    async fn test_static_index_filters_by_course_and_lesson() {
        let index = StaticIndex::default()
            .with_hit("Intro to RAG", Some(1), "one")
            .with_hit("Intro to RAG", Some(2), "two")
            .with_hit("Other Course", Some(1), "other");

        let hits = index.search("q", Some("intro"), Some(2)).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "two");
    }

    #[tokio::test]
    async fn test_static_index_outline_partial_match() {
        let index = StaticIndex::default().with_outline(CourseOutline {
            title: "Building RAG Chatbots".into(),
            link: None,
            lessons: vec![LessonRef {
                number: 1,
                title: "Intro".into(),
            }],
        });

        assert!(index.outline("rag").await.unwrap().is_some());
        assert!(index.outline("compilers").await.unwrap().is_none());
    }

    #[test]
    fn test_titles_dedupe_and_order() {
        let index = StaticIndex::default()
            .with_hit("A", None, "x")
            .with_hit("A", None, "y")
            .with_title("B");
        assert_eq!(index.course_titles(), vec!["A", "B"]);
    }

    #[test]
    fn test_response_builders() {
        assert_eq!(text_response("hi").stop, StopSignal::Done);
        let response = tool_call_response(vec![call("c1", "t", serde_json::json!({}))]);
        assert_eq!(response.stop, StopSignal::NeedsTools);
        assert_eq!(response.tool_calls[0].id, "c1");
    }
}
