//! In-memory relational store.
//!
//! The store is the single logical owner of every entity for the lifetime of
//! the process. It is constructed explicitly at startup and passed by
//! reference into the dispatch loop and action handlers - there is no
//! ambient global state, so tests can build isolated instances.
//!
//! No collection enforces referential integrity against the others; action
//! handlers verify cross-references (e.g., that a `course_id` exists) before
//! mutating.

pub mod courses;
pub mod users;

pub use courses::CourseStore;
pub use users::UserStore;

/// The node's entire mutable state: keyed collections of users and courses
/// (lessons live inside their course).
#[derive(Debug, Default)]
pub struct DomainStore {
    pub users: UserStore,
    pub courses: CourseStore,
}

impl DomainStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
