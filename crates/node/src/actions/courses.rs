//! Course and lesson action handlers.

use campus_core::CourseId;
use serde_json::{Value, json};

use crate::models::{Course, Lesson};

use super::{ActionError, ActionExecutor, non_empty_str};

impl ActionExecutor<'_> {
    pub(super) fn create_course(&mut self, fields: &Value) -> Result<Value, ActionError> {
        let creator_address = non_empty_str(fields, "creator_address");
        let creator_id = non_empty_str(fields, "creator_id");
        if creator_address.is_none() && creator_id.is_none() {
            return Err(ActionError::new("creator id or address is required."));
        }

        let (Some(name), Some(img_url), Some(description)) = (
            non_empty_str(fields, "name"),
            non_empty_str(fields, "img_url"),
            non_empty_str(fields, "description"),
        ) else {
            return Err(ActionError::new(
                "course name, img_url, and description are required.",
            ));
        };

        let owner = self
            .lookup_user_id(creator_address, creator_id)
            .ok_or_else(|| ActionError::new("creator not found."))?;

        let course = Course::new(name, img_url, description, owner);
        let summary = course.summary();
        self.store.courses.insert(course);

        Ok(json!({
            "success": true,
            "message": "Course created successfully!",
            "data": summary,
        }))
    }

    pub(super) fn get_courses(&self) -> Result<Value, ActionError> {
        let courses: Vec<_> = self
            .store
            .courses
            .all()
            .iter()
            .map(Course::summary)
            .collect();

        Ok(json!({
            "success": true,
            "message": "Courses retrieved!",
            "data": courses,
        }))
    }

    pub(super) fn get_lessons(&self, course_id: Option<&str>) -> Result<Value, ActionError> {
        let course_id = course_id.ok_or_else(|| ActionError::new("course_id is required."))?;

        let course = self.require_course(course_id)?;

        Ok(json!({
            "success": true,
            "message": "Lessons retrieved!",
            "data": course.lessons(),
        }))
    }

    pub(super) fn create_lessons(&mut self, fields: &Value) -> Result<Value, ActionError> {
        let creator_address = non_empty_str(fields, "creator_address");
        let creator_id = non_empty_str(fields, "creator_id");
        if creator_address.is_none() && creator_id.is_none() {
            return Err(ActionError::new("creator id or address is required."));
        }

        let course_id = non_empty_str(fields, "course_id")
            .ok_or_else(|| ActionError::new("course_id is required."))?;

        let (Some(name), Some(module), Some(content)) = (
            non_empty_str(fields, "name"),
            non_empty_str(fields, "module"),
            non_empty_str(fields, "content"),
        ) else {
            return Err(ActionError::new(
                "lesson name, module, and content are required.",
            ));
        };

        self.lookup_user_id(creator_address, creator_id)
            .ok_or_else(|| ActionError::new("creator not found."))?;

        let course_id = self.require_course(course_id)?.id;

        let lesson = Lesson::new(name, module, content);
        let data = serde_json::to_value(&lesson)
            .map_err(|e| ActionError::new(format!("Failed to serialize lesson: {e}")))?;
        self.require_course_mut(course_id)?.add_lesson(lesson);

        Ok(json!({
            "success": true,
            "message": "Lesson created successfully!",
            "data": data,
        }))
    }

    pub(super) fn get_creator_courses(&self, creator_id: Option<&str>) -> Result<Value, ActionError> {
        let creator_id = creator_id.ok_or_else(|| ActionError::new("creator id is required."))?;

        let owner = self
            .lookup_user_id(None, Some(creator_id))
            .ok_or_else(|| ActionError::new("creator not found."))?;

        let courses: Vec<_> = self
            .store
            .courses
            .owned_by(owner)
            .iter()
            .map(Course::summary)
            .collect();

        Ok(json!({
            "success": true,
            "message": "Courses retrieved!",
            "data": courses,
        }))
    }

    pub(super) fn get_course_by_id(&self, id: Option<&str>) -> Result<Value, ActionError> {
        let id = id.unwrap_or_default();
        let course = self.require_course(id)?;

        Ok(json!({
            "success": true,
            "message": "Course retrieved!",
            "data": course.summary(),
        }))
    }

    /// Look up a course by its raw id string; unparseable ids read as
    /// missing courses, not as errors of their own.
    fn require_course(&self, raw_id: &str) -> Result<&Course, ActionError> {
        raw_id
            .parse::<CourseId>()
            .ok()
            .and_then(|cid| self.store.courses.get(cid))
            .ok_or_else(|| ActionError::new(format!("Course with ID '{raw_id}' not found.")))
    }

    fn require_course_mut(&mut self, id: CourseId) -> Result<&mut Course, ActionError> {
        self.store
            .courses
            .get_mut(id)
            .ok_or_else(|| ActionError::new(format!("Course with ID '{id}' not found.")))
    }
}
