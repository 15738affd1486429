//! Semantic course-content search tool.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{Tool, ToolError};
use crate::adapter::{JsonSchema, ToolDefinition};
use crate::store::{CourseIndex, SearchHit};

/// Searches the course index for content relevant to a query, with
/// optional course and lesson filters.
///
/// Each successful search records one source label per hit
/// (`"{course} - Lesson {n}"`), retrievable through
/// [`last_sources`](Tool::last_sources) until the next search or a
/// reset.
pub struct CourseSearchTool {
    index: Arc<dyn CourseIndex>,
    max_results: usize,
    sources: Mutex<Vec<String>>,
}

impl CourseSearchTool {
    /// Tool name as advertised to the model.
    pub const NAME: &'static str = "search_course_content";

    /// Creates a search tool over the given index.
    pub fn new(index: Arc<dyn CourseIndex>, max_results: usize) -> Self {
        Self {
            index,
            max_results,
            sources: Mutex::new(Vec::new()),
        }
    }

    fn format_hits(hits: &[SearchHit]) -> String {
        hits.iter()
            .map(|hit| {
                let header = match hit.lesson_number {
                    Some(n) => format!("[{} - Lesson {}]", hit.course_title, n),
                    None => format!("[{}]", hit.course_title),
                };
                format!("{header}\n{}", hit.content)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn empty_message(course_name: Option<&str>, lesson_number: Option<u32>) -> String {
        let mut message = String::from("No relevant content found");
        if let Some(course) = course_name {
            message.push_str(&format!(" in course '{course}'"));
        }
        if let Some(lesson) = lesson_number {
            message.push_str(&format!(" in lesson {lesson}"));
        }
        message
    }
}

impl Tool for CourseSearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.into(),
            description: "Search course materials with smart course name matching and lesson filtering".into(),
            parameters: JsonSchema::new(serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "What to search for in the course content"
                    },
                    "course_name": {
                        "type": "string",
                        "description": "Course title (partial matches work)"
                    },
                    "lesson_number": {
                        "type": "integer",
                        "description": "Specific lesson number to search within"
                    }
                },
                "required": ["query"]
            })),
        }
    }

    fn execute<'a>(
        &'a self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(async move {
            let query = arguments["query"].as_str().ok_or_else(|| {
                ToolError::InvalidArguments {
                    tool: Self::NAME.into(),
                    detail: "missing required string field 'query'".into(),
                }
            })?;
            let course_name = arguments["course_name"].as_str();
            let lesson_number = match &arguments["lesson_number"] {
                Value::Null => None,
                value => Some(
                    value
                        .as_u64()
                        .and_then(|n| u32::try_from(n).ok())
                        .ok_or_else(|| ToolError::InvalidArguments {
                            tool: Self::NAME.into(),
                            detail: format!(
                                "'lesson_number' must be a non-negative integer no greater \
                                 than {}, got {value}",
                                u32::MAX
                            ),
                        })?,
                ),
            };

            let mut hits = self
                .index
                .search(query, course_name, lesson_number)
                .await
                .map_err(|e| ToolError::Runtime {
                    tool: Self::NAME.into(),
                    detail: e.to_string(),
                })?;
            hits.truncate(self.max_results);

            if hits.is_empty() {
                return Ok(Self::empty_message(course_name, lesson_number));
            }

            let sources: Vec<String> = hits
                .iter()
                .map(|hit| match hit.lesson_number {
                    Some(n) => format!("{} - Lesson {}", hit.course_title, n),
                    None => hit.course_title.clone(),
                })
                .collect();
            *self.sources.lock().unwrap_or_else(|e| e.into_inner()) = sources;

            Ok(Self::format_hits(&hits))
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
