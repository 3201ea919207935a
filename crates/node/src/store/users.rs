//! User collection.

use std::collections::HashMap;

use campus_core::UserId;

use crate::models::User;

/// Keyed collection of users.
///
/// Address lookups are a linear scan; no index is maintained. Duplicate
/// addresses are possible (creation never rejects them) and the scan
/// returns the first match.
#[derive(Debug, Default)]
pub struct UserStore {
    users: HashMap<UserId, User>,
}

impl UserStore {
    /// Insert a user under its own id.
    pub fn insert(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Look up a user by id.
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Look up a user by id for mutation.
    pub fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Find the first user with the given address.
    #[must_use]
    pub fn find_by_address(&self, address: &str) -> Option<&User> {
        self.users.values().find(|u| u.address == address)
    }

    /// Snapshot of all users, independent of later store mutation.
    #[must_use]
    pub fn all(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    /// Number of users in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get_round_trip() {
        let mut store = UserStore::default();
        let user = User::new("0xabc");
        let id = user.id;
        store.insert(user);

        assert_eq!(store.get(id).map(|u| u.address.as_str()), Some("0xabc"));
        assert!(store.get(UserId::generate()).is_none());
    }

    #[test]
    fn test_find_by_address_returns_first_match() {
        let mut store = UserStore::default();
        store.insert(User::new("0xaaa"));
        store.insert(User::new("0xbbb"));

        let found = store.find_by_address("0xbbb");
        assert_eq!(found.map(|u| u.address.as_str()), Some("0xbbb"));
        assert!(store.find_by_address("0xccc").is_none());
    }

    #[test]
    fn test_all_is_a_snapshot() {
        let mut store = UserStore::default();
        store.insert(User::new("0xaaa"));

        let snapshot = store.all();
        store.insert(User::new("0xbbb"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
