//! Action registry and executor.
//!
//! Every request names one registered action. The registry is a closed enum
//! resolved once per request: unknown names are an explicit `None`, handled
//! by the dispatch loop as an immediate reject, never a fallthrough.
//!
//! Each action is either advance-kind (authorizes a durable state change,
//! ends in a notice on success) or inspect-kind (read-only, ends in a
//! report). Handlers take the decoded input and return
//! `Result<Value, ActionError>`; the executor borrows the domain store
//! mutably for the duration of one request.

mod courses;
mod error;
mod users;

pub use error::ActionError;

use serde_json::Value;

use crate::store::DomainStore;

/// Whether an action mutates durable state (and reports via notice) or
/// only reads it (and reports via report).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Advance,
    Inspect,
}

/// The closed set of registered action names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // User actions
    CreateUser,
    GetUsers,
    GetUserByAddress,
    GetUserById,
    AddToWaitlist,
    AddToCart,
    RemoveFromCart,
    RemoveFromWaitlist,
    GetUserWaitlist,
    GetUserCart,
    GetUserEnrolledCourses,
    EnrollToCourse,

    // Course actions
    CreateCourse,
    GetCourses,
    GetLessons,
    CreateLessons,
    GetCreatorCourses,
    GetCourseById,
}

impl Action {
    /// Every registered action.
    pub const ALL: [Self; 18] = [
        Self::CreateUser,
        Self::GetUsers,
        Self::GetUserByAddress,
        Self::GetUserById,
        Self::AddToWaitlist,
        Self::AddToCart,
        Self::RemoveFromCart,
        Self::RemoveFromWaitlist,
        Self::GetUserWaitlist,
        Self::GetUserCart,
        Self::GetUserEnrolledCourses,
        Self::EnrollToCourse,
        Self::CreateCourse,
        Self::GetCourses,
        Self::GetLessons,
        Self::CreateLessons,
        Self::GetCreatorCourses,
        Self::GetCourseById,
    ];

    /// Resolve an action by its registered name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "create_user" => Some(Self::CreateUser),
            "get_users" => Some(Self::GetUsers),
            "get_user_by_address" => Some(Self::GetUserByAddress),
            "get_user_by_id" => Some(Self::GetUserById),
            "add_to_waitlist" => Some(Self::AddToWaitlist),
            "add_to_cart" => Some(Self::AddToCart),
            "remove_from_cart" => Some(Self::RemoveFromCart),
            "remove_from_waitlist" => Some(Self::RemoveFromWaitlist),
            "get_user_waitlist" => Some(Self::GetUserWaitlist),
            "get_user_cart" => Some(Self::GetUserCart),
            "get_user_enrolled_courses" => Some(Self::GetUserEnrolledCourses),
            "enroll_to_course" => Some(Self::EnrollToCourse),
            "create_course" => Some(Self::CreateCourse),
            "get_courses" => Some(Self::GetCourses),
            "get_lessons" => Some(Self::GetLessons),
            "create_lessons" => Some(Self::CreateLessons),
            "get_creator_courses" => Some(Self::GetCreatorCourses),
            "get_course_by_id" => Some(Self::GetCourseById),
            _ => None,
        }
    }

    /// The registered name of this action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::GetUsers => "get_users",
            Self::GetUserByAddress => "get_user_by_address",
            Self::GetUserById => "get_user_by_id",
            Self::AddToWaitlist => "add_to_waitlist",
            Self::AddToCart => "add_to_cart",
            Self::RemoveFromCart => "remove_from_cart",
            Self::RemoveFromWaitlist => "remove_from_waitlist",
            Self::GetUserWaitlist => "get_user_waitlist",
            Self::GetUserCart => "get_user_cart",
            Self::GetUserEnrolledCourses => "get_user_enrolled_courses",
            Self::EnrollToCourse => "enroll_to_course",
            Self::CreateCourse => "create_course",
            Self::GetCourses => "get_courses",
            Self::GetLessons => "get_lessons",
            Self::CreateLessons => "create_lessons",
            Self::GetCreatorCourses => "get_creator_courses",
            Self::GetCourseById => "get_course_by_id",
        }
    }

    /// Whether this action advances state or only inspects it.
    #[must_use]
    pub const fn kind(self) -> ActionKind {
        match self {
            Self::CreateUser
            | Self::AddToWaitlist
            | Self::AddToCart
            | Self::RemoveFromCart
            | Self::RemoveFromWaitlist
            | Self::EnrollToCourse
            | Self::CreateCourse
            | Self::CreateLessons => ActionKind::Advance,
            Self::GetUsers
            | Self::GetUserByAddress
            | Self::GetUserById
            | Self::GetUserWaitlist
            | Self::GetUserCart
            | Self::GetUserEnrolledCourses
            | Self::GetCourses
            | Self::GetLessons
            | Self::GetCreatorCourses
            | Self::GetCourseById => ActionKind::Inspect,
        }
    }
}

/// Decoded input handed to an action.
///
/// Advance requests carry a JSON `data` object; inspect requests carry
/// positional path segments. Field-style handlers see a null document when
/// given positional input (and fail their own field validation); positional
/// accessors see no arguments when given a fields document.
#[derive(Debug, Clone)]
pub enum ActionInput {
    /// The `data` object of a decoded advance call.
    Fields(Value),
    /// The positional segments of a decoded inspect path.
    Args(Vec<String>),
}

static NULL_FIELDS: Value = Value::Null;

impl ActionInput {
    /// The fields document, or null for positional input.
    #[must_use]
    pub fn fields(&self) -> &Value {
        match self {
            Self::Fields(value) => value,
            Self::Args(_) => &NULL_FIELDS,
        }
    }

    /// The positional argument at `index`, if present and non-empty.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        match self {
            Self::Args(args) => args
                .get(index)
                .map(String::as_str)
                .filter(|s| !s.is_empty()),
            Self::Fields(_) => None,
        }
    }
}

/// Executes one action against the domain store.
///
/// Borrows the store mutably for the duration of one request; the host
/// serializes requests, so no other access exists while a handler runs.
pub struct ActionExecutor<'a> {
    store: &'a mut DomainStore,
}

impl<'a> ActionExecutor<'a> {
    /// Create an executor over `store`.
    pub fn new(store: &'a mut DomainStore) -> Self {
        Self { store }
    }

    /// Run `action` with `input`, returning the result object to report or
    /// the rejection to route through the report protocol.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when a handler precondition fails or a
    /// referenced entity does not exist.
    pub fn execute(&mut self, action: Action, input: &ActionInput) -> Result<Value, ActionError> {
        match action {
            // User actions
            Action::CreateUser => self.create_user(input.fields()),
            Action::GetUsers => self.get_users(),
            Action::GetUserByAddress => self.get_user_by_address(input.arg(0)),
            Action::GetUserById => self.get_user_by_id(input.arg(0)),
            Action::AddToWaitlist => self.add_to_waitlist(input.fields()),
            Action::AddToCart => self.add_to_cart(input.fields()),
            Action::RemoveFromCart => self.remove_from_cart(input.fields()),
            Action::RemoveFromWaitlist => self.remove_from_waitlist(input.fields()),
            Action::GetUserWaitlist => self.get_user_waitlist(input.arg(0)),
            Action::GetUserCart => self.get_user_cart(input.arg(0)),
            Action::GetUserEnrolledCourses => self.get_user_enrolled_courses(input.arg(0)),
            Action::EnrollToCourse => self.enroll_to_course(input.fields()),

            // Course actions
            Action::CreateCourse => self.create_course(input.fields()),
            Action::GetCourses => self.get_courses(),
            Action::GetLessons => self.get_lessons(input.arg(0)),
            Action::CreateLessons => self.create_lessons(input.fields()),
            Action::GetCreatorCourses => self.get_creator_courses(input.arg(0)),
            Action::GetCourseById => self.get_course_by_id(input.arg(0)),
        }
    }
}

// =============================================================================
// Shared field helpers
// =============================================================================

/// Read a non-empty string field out of a JSON document.
///
/// Absent keys, non-string values, and empty strings all count as missing.
fn non_empty_str<'v>(fields: &'v Value, key: &str) -> Option<&'v str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
