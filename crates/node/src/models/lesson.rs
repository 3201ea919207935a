//! Lesson domain type.

use campus_core::LessonId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single lesson inside a course.
///
/// A lesson belongs to exactly one course by virtue of living in that
/// course's lesson set; it holds no back-reference to its course.
#[derive(Debug, Clone, Serialize)]
pub struct Lesson {
    /// Unique lesson ID, generated at construction.
    pub id: LessonId,
    /// Lesson name.
    pub name: String,
    /// Module the lesson belongs to.
    pub module: String,
    /// Lesson content.
    pub content: String,
    /// When the lesson was created.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Lesson {
    /// Create a new lesson with a fresh ID.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        module: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: LessonId::generate(),
            name: name.into(),
            module: module.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_wire_shape() {
        let lesson = Lesson::new("Intro", "Basics", "Welcome!");
        let json = serde_json::to_value(&lesson).unwrap();

        assert_eq!(json["name"], "Intro");
        assert_eq!(json["module"], "Basics");
        assert_eq!(json["content"], "Welcome!");
        assert!(json["createdAt"].is_string());
        assert!(json.get("created_at").is_none());
    }
}
