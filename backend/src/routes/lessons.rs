//! Request and response types for the lesson routes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Lesson, LessonPatch};

pub const LIST_LESSONS_PATH: &str = "/lessons";
pub const SEARCH_LESSONS_PATH: &str = "/search";
pub const UPDATE_LESSON_PATH: &str = "/lessons/{id}";

pub const LESSON_UPDATED_MESSAGE: &str = "Lesson updated successfully";

/// Query string of `GET /search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref()
    }
}

/// Body of a successful `PUT /lessons/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonUpdatedResponse {
    pub message: String,
    pub lesson: Lesson,
}

impl LessonUpdatedResponse {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            message: LESSON_UPDATED_MESSAGE.to_string(),
            lesson,
        }
    }
}

/// Turn an update body into a patch.
///
/// Returns `None` when the body is not a JSON object.
pub fn patch_from_body(body: Value) -> Option<LessonPatch> {
    match body {
        Value::Object(map) => Some(LessonPatch::new(map)),
        _ => None,
    }
}
