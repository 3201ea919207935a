//! User domain type.

use campus_core::{CourseId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A marketplace user.
///
/// The `address` is the user's external identity (e.g., a wallet address).
/// It is not checked for uniqueness; duplicate addresses are possible and
/// address lookups return the first match.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID, generated at construction.
    pub id: UserId,
    /// External identity string.
    pub address: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// Courses in the user's cart, in insertion order.
    cart: Vec<CourseId>,
    /// Courses on the user's waitlist, in insertion order.
    waitlist: Vec<CourseId>,
    /// Courses the user is enrolled in, in insertion order.
    enrolled: Vec<CourseId>,
}

/// Wire projection of a [`User`] (the cart/waitlist/enrolled sets are
/// reported through their own accessors, not inlined here).
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub address: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh ID and empty course sets.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            address: address.into(),
            created_at: Utc::now(),
            cart: Vec::new(),
            waitlist: Vec::new(),
            enrolled: Vec::new(),
        }
    }

    /// The wire projection of this user.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            address: self.address.clone(),
            created_at: self.created_at,
        }
    }

    /// Courses in the cart, in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CourseId] {
        &self.cart
    }

    /// Courses on the waitlist, in insertion order.
    #[must_use]
    pub fn waitlist(&self) -> &[CourseId] {
        &self.waitlist
    }

    /// Courses the user is enrolled in, in insertion order.
    #[must_use]
    pub fn enrolled(&self) -> &[CourseId] {
        &self.enrolled
    }

    /// Add a course to the cart. Re-adding a course already present is a
    /// no-op; the original position is kept.
    pub fn add_to_cart(&mut self, course: CourseId) {
        insert_unique(&mut self.cart, course);
    }

    /// Add a course to the waitlist. No-op if already present.
    pub fn add_to_waitlist(&mut self, course: CourseId) {
        insert_unique(&mut self.waitlist, course);
    }

    /// Enroll the user in a course. No-op if already enrolled.
    pub fn enroll(&mut self, course: CourseId) {
        insert_unique(&mut self.enrolled, course);
    }

    /// Detach a course reference from the cart. The course itself is
    /// untouched.
    pub fn remove_from_cart(&mut self, course: CourseId) {
        self.cart.retain(|c| *c != course);
    }

    /// Detach a course reference from the waitlist.
    pub fn remove_from_waitlist(&mut self, course: CourseId) {
        self.waitlist.retain(|c| *c != course);
    }
}

/// Append `course` unless an entry with the same id already exists.
fn insert_unique(set: &mut Vec<CourseId>, course: CourseId) {
    if !set.contains(&course) {
        set.push(course);
    }
}
