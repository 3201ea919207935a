//! User action handlers.
//!
//! Mutating actions resolve the acting user by `address` (preferred) or
//! `id` and verify every referenced course before touching state, since the
//! store itself enforces no referential integrity.

use campus_core::{CourseId, UserId};
use serde_json::{Value, json};

use crate::models::{Course, CourseSummary, User};

use super::{ActionError, ActionExecutor, non_empty_str};

impl ActionExecutor<'_> {
    pub(super) fn create_user(&mut self, fields: &Value) -> Result<Value, ActionError> {
        let address = non_empty_str(fields, "address")
            .ok_or_else(|| ActionError::new("User address is required."))?;

        let user = User::new(address);
        let summary = user.summary();
        self.store.users.insert(user);

        Ok(json!({
            "success": true,
            "message": "User created successfully!",
            "data": summary,
        }))
    }

    pub(super) fn get_users(&self) -> Result<Value, ActionError> {
        let users: Vec<_> = self.store.users.all().iter().map(User::summary).collect();

        Ok(json!({
            "success": true,
            "message": "Users retrieved!",
            "data": users,
        }))
    }

    pub(super) fn get_user_by_address(&self, address: Option<&str>) -> Result<Value, ActionError> {
        let address =
            address.ok_or_else(|| ActionError::new("User address is required."))?;

        let user = self.store.users.find_by_address(address).ok_or_else(|| {
            ActionError::new(format!("User with address '{address}' not found."))
        })?;

        Ok(json!({
            "success": true,
            "message": "User retrieved!",
            "data": user.summary(),
        }))
    }

    pub(super) fn get_user_by_id(&self, id: Option<&str>) -> Result<Value, ActionError> {
        let id = id.ok_or_else(|| ActionError::new("User ID is required."))?;

        let user = id
            .parse::<UserId>()
            .ok()
            .and_then(|uid| self.store.users.get(uid))
            .ok_or_else(|| ActionError::new(format!("User with ID '{id}' not found.")))?;

        Ok(json!({
            "success": true,
            "message": "User retrieved!",
            "data": user.summary(),
        }))
    }

    pub(super) fn add_to_waitlist(&mut self, fields: &Value) -> Result<Value, ActionError> {
        let (user_id, course_id) = self.resolve_membership(fields)?;
        let user = self.require_user_mut(user_id)?;
        user.add_to_waitlist(course_id);

        Ok(json!({
            "success": true,
            "message": "Course added to waitlist successfully!",
        }))
    }

    pub(super) fn add_to_cart(&mut self, fields: &Value) -> Result<Value, ActionError> {
        let (user_id, course_id) = self.resolve_membership(fields)?;
        let user = self.require_user_mut(user_id)?;
        user.add_to_cart(course_id);

        Ok(json!({
            "success": true,
            "message": "Course added to cart successfully!",
        }))
    }

    pub(super) fn remove_from_cart(&mut self, fields: &Value) -> Result<Value, ActionError> {
        let (user_id, course_id) = self.resolve_membership(fields)?;
        let user = self.require_user_mut(user_id)?;
        user.remove_from_cart(course_id);

        Ok(json!({
            "success": true,
            "message": "Course removed from cart successfully!",
        }))
    }

    pub(super) fn remove_from_waitlist(&mut self, fields: &Value) -> Result<Value, ActionError> {
        let (user_id, course_id) = self.resolve_membership(fields)?;
        let user = self.require_user_mut(user_id)?;
        user.remove_from_waitlist(course_id);

        Ok(json!({
            "success": true,
            "message": "Course removed from waitlist successfully!",
        }))
    }

    pub(super) fn get_user_waitlist(&self, id: Option<&str>) -> Result<Value, ActionError> {
        let user = self.require_user_by_arg(id)?;

        Ok(json!({
            "success": true,
            "message": "Waitlist retrieved successfully!",
            "data": self.course_summaries(user.waitlist()),
        }))
    }

    pub(super) fn get_user_cart(&self, id: Option<&str>) -> Result<Value, ActionError> {
        let user = self.require_user_by_arg(id)?;

        Ok(json!({
            "success": true,
            "message": "Cart retrieved successfully!",
            "data": self.course_summaries(user.cart()),
        }))
    }

    pub(super) fn get_user_enrolled_courses(&self, id: Option<&str>) -> Result<Value, ActionError> {
        let user = self.require_user_by_arg(id)?;

        Ok(json!({
            "success": true,
            "message": "Enrolled courses retrieved successfully!",
            "data": self.course_summaries(user.enrolled()),
        }))
    }

    pub(super) fn enroll_to_course(&mut self, fields: &Value) -> Result<Value, ActionError> {
        let (user_id, course_id) = self.resolve_membership(fields)?;

        // Placeholder for real payment handling: the host attests payment
        // with a boolean flag. Checked before any mutation.
        if fields.get("paid").and_then(Value::as_bool) != Some(true) {
            return Err(ActionError::new("User has not purchased the course."));
        }

        let course_name = self
            .store
            .courses
            .get(course_id)
            .map(|c| c.name.clone())
            .ok_or_else(|| ActionError::new("Course not found."))?;

        let user = self.require_user_mut(user_id)?;
        user.enroll(course_id);

        Ok(json!({
            "success": true,
            "message": format!("User has enrolled in {course_name}."),
        }))
    }

    // -------------------------------------------------------------------------
    // Resolution helpers
    // -------------------------------------------------------------------------

    /// Resolve the acting user by `address` (preferred) or `id`.
    ///
    /// When an address is given, a failed address lookup does not fall back
    /// to the id.
    pub(super) fn lookup_user_id(
        &self,
        address: Option<&str>,
        id: Option<&str>,
    ) -> Option<UserId> {
        if let Some(address) = address {
            return self.store.users.find_by_address(address).map(|u| u.id);
        }
        let parsed = id?.parse::<UserId>().ok()?;
        self.store.users.get(parsed).map(|u| u.id)
    }

    /// Validate and resolve the `{address|id, course_id}` fields shared by
    /// every cart/waitlist/enrollment mutation.
    fn resolve_membership(&self, fields: &Value) -> Result<(UserId, CourseId), ActionError> {
        let address = non_empty_str(fields, "address");
        let id = non_empty_str(fields, "id");
        if address.is_none() && id.is_none() {
            return Err(ActionError::new("User ID or address is required."));
        }

        let course_id = non_empty_str(fields, "course_id")
            .ok_or_else(|| ActionError::new("Course ID is required."))?;

        let user_id = self
            .lookup_user_id(address, id)
            .ok_or_else(|| ActionError::new("User not found."))?;

        let course_id = course_id
            .parse::<CourseId>()
            .ok()
            .filter(|cid| self.store.courses.get(*cid).is_some())
            .ok_or_else(|| ActionError::new("Course not found."))?;

        Ok((user_id, course_id))
    }

    fn require_user_mut(&mut self, id: UserId) -> Result<&mut User, ActionError> {
        self.store
            .users
            .get_mut(id)
            .ok_or_else(|| ActionError::new("User not found."))
    }

    /// Resolve a read accessor's user from its positional `id` argument.
    fn require_user_by_arg(&self, id: Option<&str>) -> Result<&User, ActionError> {
        let id = id.ok_or_else(|| ActionError::new("User ID or address is required."))?;
        id.parse::<UserId>()
            .ok()
            .and_then(|uid| self.store.users.get(uid))
            .ok_or_else(|| ActionError::new("User not found."))
    }

    fn course_summaries(&self, ids: &[CourseId]) -> Vec<CourseSummary> {
        ids.iter()
            .filter_map(|id| self.store.courses.get(*id))
            .map(Course::summary)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::{Action, ActionInput};
    use super::*;
    use crate::store::DomainStore;

    fn seed_user(store: &mut DomainStore, address: &str) -> UserId {
        let user = User::new(address);
        let id = user.id;
        store.users.insert(user);
        id
    }

    fn seed_course(store: &mut DomainStore, name: &str, owner: UserId) -> CourseId {
        let course = crate::models::Course::new(name, "https://img", "desc", owner);
        let id = course.id;
        store.courses.insert(course);
        id
    }

    #[test]
    fn test_create_user_returns_summary() {
        let mut store = DomainStore::new();
        let mut executor = ActionExecutor::new(&mut store);

        let result = executor
            .create_user(&json!({"address": "0xabc"}))
            .unwrap();

        assert_eq!(result["success"], true);
        assert_eq!(result["message"], "User created successfully!");
        assert_eq!(result["data"]["address"], "0xabc");
        assert!(result["data"]["id"].is_string());
        assert!(result["data"]["createdAt"].is_string());
        assert_eq!(store.users.len(), 1);
    }

    #[test]
    fn test_create_user_requires_address() {
        let mut store = DomainStore::new();
        let mut executor = ActionExecutor::new(&mut store);

        let err = executor.create_user(&json!({})).unwrap_err();
        assert_eq!(err.message(), "User address is required.");
        assert!(store.users.is_empty());
    }

    #[test]
    fn test_duplicate_addresses_are_not_rejected() {
        let mut store = DomainStore::new();
        let mut executor = ActionExecutor::new(&mut store);

        executor.create_user(&json!({"address": "0xabc"})).unwrap();
        executor.create_user(&json!({"address": "0xabc"})).unwrap();

        assert_eq!(store.users.len(), 2);
    }

    #[test]
    fn test_get_user_by_address_and_id() {
        let mut store = DomainStore::new();
        let id = seed_user(&mut store, "0xabc");
        let executor = ActionExecutor::new(&mut store);

        let by_address = executor.get_user_by_address(Some("0xabc")).unwrap();
        assert_eq!(by_address["data"]["id"], json!(id));

        let id_string = id.to_string();
        let by_id = executor.get_user_by_id(Some(&id_string)).unwrap();
        assert_eq!(by_id["data"]["address"], "0xabc");
    }

    #[test]
    fn test_get_user_by_address_not_found_message() {
        let mut store = DomainStore::new();
        let executor = ActionExecutor::new(&mut store);

        let err = executor.get_user_by_address(Some("0xmissing")).unwrap_err();
        assert_eq!(err.message(), "User with address '0xmissing' not found.");
    }

    #[test]
    fn test_get_user_by_id_uses_the_id_not_the_address() {
        let mut store = DomainStore::new();
        let id = seed_user(&mut store, "0xabc");
        let executor = ActionExecutor::new(&mut store);

        // The address is not a valid id lookup key
        let err = executor.get_user_by_id(Some("0xabc")).unwrap_err();
        assert_eq!(err.message(), "User with ID '0xabc' not found.");

        let id_string = id.to_string();
        assert!(executor.get_user_by_id(Some(&id_string)).is_ok());
    }

    #[test]
    fn test_add_to_cart_is_idempotent() {
        let mut store = DomainStore::new();
        let user_id = seed_user(&mut store, "0xabc");
        let course_id = seed_course(&mut store, "Rust 101", user_id);
        let mut executor = ActionExecutor::new(&mut store);

        let fields = json!({"id": user_id.to_string(), "course_id": course_id.to_string()});
        executor.add_to_cart(&fields).unwrap();
        executor.add_to_cart(&fields).unwrap();

        assert_eq!(store.users.get(user_id).unwrap().cart(), &[course_id]);
    }

    #[test]
    fn test_membership_validation_messages() {
        let mut store = DomainStore::new();
        let user_id = seed_user(&mut store, "0xabc");
        let mut executor = ActionExecutor::new(&mut store);

        let err = executor.add_to_cart(&json!({})).unwrap_err();
        assert_eq!(err.message(), "User ID or address is required.");

        let err = executor
            .add_to_cart(&json!({"address": "0xabc"}))
            .unwrap_err();
        assert_eq!(err.message(), "Course ID is required.");

        let err = executor
            .add_to_cart(&json!({
                "address": "0xnobody",
                "course_id": CourseId::generate().to_string(),
            }))
            .unwrap_err();
        assert_eq!(err.message(), "User not found.");

        let err = executor
            .add_to_cart(&json!({
                "id": user_id.to_string(),
                "course_id": CourseId::generate().to_string(),
            }))
            .unwrap_err();
        assert_eq!(err.message(), "Course not found.");
    }

    #[test]
    fn test_address_lookup_does_not_fall_back_to_id() {
        let mut store = DomainStore::new();
        let user_id = seed_user(&mut store, "0xabc");
        let course_id = seed_course(&mut store, "Rust 101", user_id);
        let mut executor = ActionExecutor::new(&mut store);

        // Valid id, but the unknown address takes precedence and fails
        let err = executor
            .add_to_cart(&json!({
                "address": "0xnobody",
                "id": user_id.to_string(),
                "course_id": course_id.to_string(),
            }))
            .unwrap_err();
        assert_eq!(err.message(), "User not found.");
    }

    #[test]
    fn test_remove_from_cart_detaches_reference_only() {
        let mut store = DomainStore::new();
        let user_id = seed_user(&mut store, "0xabc");
        let course_id = seed_course(&mut store, "Rust 101", user_id);
        let mut executor = ActionExecutor::new(&mut store);

        let fields = json!({"id": user_id.to_string(), "course_id": course_id.to_string()});
        executor.add_to_cart(&fields).unwrap();
        executor.remove_from_cart(&fields).unwrap();

        assert!(store.users.get(user_id).unwrap().cart().is_empty());
        // The course itself survives
        assert!(store.courses.get(course_id).is_some());
    }

    #[test]
    fn test_enroll_requires_payment() {
        let mut store = DomainStore::new();
        let user_id = seed_user(&mut store, "0xabc");
        let course_id = seed_course(&mut store, "Rust 101", user_id);
        let mut executor = ActionExecutor::new(&mut store);

        let err = executor
            .enroll_to_course(&json!({
                "id": user_id.to_string(),
                "course_id": course_id.to_string(),
                "paid": false,
            }))
            .unwrap_err();
        assert_eq!(err.message(), "User has not purchased the course.");
        assert!(store.users.get(user_id).unwrap().enrolled().is_empty());
    }

    #[test]
    fn test_enroll_with_payment_mentions_course_name() {
        let mut store = DomainStore::new();
        let user_id = seed_user(&mut store, "0xabc");
        let course_id = seed_course(&mut store, "Rust 101", user_id);
        let mut executor = ActionExecutor::new(&mut store);

        let result = executor
            .enroll_to_course(&json!({
                "id": user_id.to_string(),
                "course_id": course_id.to_string(),
                "paid": true,
            }))
            .unwrap();

        assert_eq!(result["message"], "User has enrolled in Rust 101.");
        assert_eq!(store.users.get(user_id).unwrap().enrolled(), &[course_id]);
    }

    #[test]
    fn test_get_user_cart_uses_the_passed_identifier() {
        let mut store = DomainStore::new();
        let shopper = seed_user(&mut store, "0xshopper");
        let other = seed_user(&mut store, "0xother");
        let course_id = seed_course(&mut store, "Rust 101", other);
        let mut executor = ActionExecutor::new(&mut store);

        executor
            .add_to_cart(&json!({
                "id": shopper.to_string(),
                "course_id": course_id.to_string(),
            }))
            .unwrap();

        let shopper_string = shopper.to_string();
        let cart = executor.get_user_cart(Some(&shopper_string)).unwrap();
        assert_eq!(cart["data"].as_array().unwrap().len(), 1);
        assert_eq!(cart["data"][0]["name"], "Rust 101");

        let other_string = other.to_string();
        let empty = executor.get_user_cart(Some(&other_string)).unwrap();
        assert_eq!(empty["data"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_read_accessor_validation() {
        let mut store = DomainStore::new();
        let executor = ActionExecutor::new(&mut store);

        let err = executor.get_user_waitlist(None).unwrap_err();
        assert_eq!(err.message(), "User ID or address is required.");

        let missing = UserId::generate().to_string();
        let err = executor.get_user_cart(Some(&missing)).unwrap_err();
        assert_eq!(err.message(), "User not found.");
    }

    #[test]
    fn test_execute_routes_positional_input_to_accessors() {
        let mut store = DomainStore::new();
        let id = seed_user(&mut store, "0xabc");
        let mut executor = ActionExecutor::new(&mut store);

        let input = ActionInput::Args(vec![id.to_string()]);
        let result = executor
            .execute(Action::GetUserEnrolledCourses, &input)
            .unwrap();
        assert_eq!(result["message"], "Enrolled courses retrieved successfully!");
    }
}
