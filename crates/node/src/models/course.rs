//! Course domain type.

use campus_core::{CourseId, LessonId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Lesson;

/// A course offered on the marketplace.
///
/// The `owner` references the creating user but is not validated after
/// creation; there is no cascade between users and their courses.
#[derive(Debug, Clone)]
pub struct Course {
    /// Unique course ID, generated at construction.
    pub id: CourseId,
    /// Course name.
    pub name: String,
    /// ID of the user who created the course.
    pub owner: UserId,
    /// Image URL for the course.
    pub img_url: String,
    /// Course description.
    pub description: String,
    /// When the course was created.
    pub created_at: DateTime<Utc>,
    /// Lessons in insertion order, keyed by lesson id.
    lessons: Vec<Lesson>,
}

/// Wire projection of a [`Course`], excluding its lessons.
#[derive(Debug, Clone, Serialize)]
pub struct CourseSummary {
    pub id: CourseId,
    pub name: String,
    pub owner: UserId,
    pub img_url: String,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Create a new course with a fresh ID and no lessons.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        img_url: impl Into<String>,
        description: impl Into<String>,
        owner: UserId,
    ) -> Self {
        Self {
            id: CourseId::generate(),
            name: name.into(),
            owner,
            img_url: img_url.into(),
            description: description.into(),
            created_at: Utc::now(),
            lessons: Vec::new(),
        }
    }

    /// The wire projection of this course (lessons excluded).
    #[must_use]
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id,
            name: self.name.clone(),
            owner: self.owner,
            img_url: self.img_url.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
        }
    }

    /// Lessons in insertion order.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Add a lesson to the course. Replaces an existing lesson with the
    /// same id instead of duplicating it (lesson ids are fresh per
    /// construction, so this only matters for callers reusing ids).
    pub fn add_lesson(&mut self, lesson: Lesson) {
        if let Some(existing) = self.lessons.iter_mut().find(|l| l.id == lesson.id) {
            *existing = lesson;
        } else {
            self.lessons.push(lesson);
        }
    }

    /// Look up a lesson by id.
    #[must_use]
    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }
}
