//! Course outline lookup tool.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{Tool, ToolError};
use crate::adapter::{JsonSchema, ToolDefinition};
use crate::store::{CourseIndex, CourseOutline};

/// Returns the full outline of a course: title, link, and the numbered
/// lesson list.
///
/// A successful lookup records the resolved course title as the single
/// source for the retrieval.
pub struct CourseOutlineTool {
    index: Arc<dyn CourseIndex>,
    sources: Mutex<Vec<String>>,
}

impl CourseOutlineTool {
    /// Tool name as advertised to the model.
    pub const NAME: &'static str = "get_course_outline";

    /// Creates an outline tool over the given index.
    pub fn new(index: Arc<dyn CourseIndex>) -> Self {
        Self {
            index,
            sources: Mutex::new(Vec::new()),
        }
    }

    fn format_outline(outline: &CourseOutline) -> String {
        let mut out = format!("Course: {}", outline.title);
        if let Some(link) = &outline.link {
            out.push_str(&format!("\nCourse Link: {link}"));
        }
        out.push_str("\nLessons:");
        for lesson in &outline.lessons {
            out.push_str(&format!("\n{}. {}", lesson.number, lesson.title));
        }
        out
    }
}

impl Tool for CourseOutlineTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.into(),
            description: "Get the complete outline of a course including its title, link, and all lessons".into(),
            parameters: JsonSchema::new(serde_json::json!({
                "type": "object",
                "properties": {
                    "course_title": {
                        "type": "string",
                        "description": "Course title (partial matches work)"
                    }
                },
                "required": ["course_title"]
            })),
        }
    }

    fn execute<'a>(
        &'a self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(async move {
            let course_title = arguments["course_title"].as_str().ok_or_else(|| {
                ToolError::InvalidArguments {
                    tool: Self::NAME.into(),
                    detail: "missing required string field 'course_title'".into(),
                }
            })?;

            let outline = self
                .index
                .outline(course_title)
                .await
                .map_err(|e| ToolError::Runtime {
                    tool: Self::NAME.into(),
                    detail: e.to_string(),
                })?;

            let Some(outline) = outline else {
                return Ok(format!("No course found matching '{course_title}'"));
            };

            *self.sources.lock().unwrap_or_else(|e| e.into_inner()) =
                vec![outline.title.clone()];

            Ok(Self::format_outline(&outline))
        })
    }

    fn last_sources(&self) -> Vec<String> {
        self.sources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn reset_sources(&self) {
        self.sources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{IndexError, LessonRef, SearchHit};

    struct OutlineIndex {
        outline: Option<CourseOutline>,
    }

    impl CourseIndex for OutlineIndex {
        fn search<'a>(
            &'a self,
            _query: &'a str,
            _course_name: Option<&'a str>,
            _lesson_number: Option<u32>,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchHit>, IndexError>> + Send + 'a>>
        {
            Box::pin(async move { Ok(Vec::new()) })
        }

        fn outline<'a>(
            &'a self,
            _course_title: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Option<CourseOutline>, IndexError>> + Send + 'a>>
        {
            Box::pin(async move { Ok(self.outline.clone()) })
        }

        fn course_titles(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn sample_outline() -> CourseOutline {
        CourseOutline {
            title: "Building RAG Chatbots".into(),
            link: Some("https://example.com/rag".into()),
            lessons: vec![
                LessonRef {
                    number: 1,
                    title: "Introduction".into(),
                },
                LessonRef {
                    number: 2,
                    title: "Vector Stores".into(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_outline_formats_full_structure() {
        let tool = CourseOutlineTool::new(Arc::new(OutlineIndex {
            outline: Some(sample_outline()),
        }));
        let out = tool
            .execute(serde_json::json!({"course_title": "RAG"}))
            .await
            .unwrap();
        assert_eq!(
            out,
            "Course: Building RAG Chatbots\n\
             Course Link: https://example.com/rag\n\
             Lessons:\n\
             1. Introduction\n\
             2. Vector Stores"
        );
        assert_eq!(tool.last_sources(), vec!["Building RAG Chatbots"]);
    }

    #[tokio::test]
    async fn test_outline_without_link() {
        let mut outline = sample_outline();
        outline.link = None;
        let tool = CourseOutlineTool::new(Arc::new(OutlineIndex {
            outline: Some(outline),
        }));
        let out = tool
            .execute(serde_json::json!({"course_title": "RAG"}))
            .await
            .unwrap();
        assert!(!out.contains("Course Link:"));
        assert!(out.starts_with("Course: Building RAG Chatbots\nLessons:"));
    }

    #[tokio::test]
    async fn test_outline_no_match() {
        let tool = CourseOutlineTool::new(Arc::new(OutlineIndex { outline: None }));
        let out = tool
            .execute(serde_json::json!({"course_title": "missing"}))
            .await
            .unwrap();
        assert_eq!(out, "No course found matching 'missing'");
        assert!(tool.last_sources().is_empty());
    }

    #[tokio::test]
    async fn test_outline_missing_title_argument() {
        let tool = CourseOutlineTool::new(Arc::new(OutlineIndex { outline: None }));
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn test_definition_requires_course_title() {
        let tool = CourseOutlineTool::new(Arc::new(OutlineIndex { outline: None }));
        let def = tool.definition();
        assert_eq!(def.name, "get_course_outline");
        assert!(def.parameters.validate(&serde_json::json!({})).is_err());
        assert!(def
            .parameters
            .validate(&serde_json::json!({"course_title": "x"}))
            .is_ok());
    }
}
