//! Course collection.

use std::collections::HashMap;

use campus_core::{CourseId, UserId};

use crate::models::Course;

/// Keyed collection of courses.
#[derive(Debug, Default)]
pub struct CourseStore {
    courses: HashMap<CourseId, Course>,
}

impl CourseStore {
    /// Insert a course under its own id.
    pub fn insert(&mut self, course: Course) {
        self.courses.insert(course.id, course);
    }

    /// Look up a course by id.
    #[must_use]
    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Look up a course by id for mutation.
    pub fn get_mut(&mut self, id: CourseId) -> Option<&mut Course> {
        self.courses.get_mut(&id)
    }

    /// Snapshot of all courses, independent of later store mutation.
    #[must_use]
    pub fn all(&self) -> Vec<Course> {
        self.courses.values().cloned().collect()
    }

    /// Snapshot of the courses created by `owner`.
    #[must_use]
    pub fn owned_by(&self, owner: UserId) -> Vec<Course> {
        self.courses
            .values()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect()
    }

    /// Number of courses in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the store holds no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
