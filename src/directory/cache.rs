//! Entity cache: the insertion-ordered, current-believed directory state
//!
//! Every optimistic action mutates this synchronously; confirmation status
//! lives in the tracker, never here.

use crate::directory::user::User;

/// Ordered collection of current-believed user records.
///
/// Ids are unique within the cache at all times. Order is insertion order,
/// except that a rolled-back delete re-appends at the tail rather than
/// re-inserting at the original position.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    users: Vec<User>,
}

impl EntityCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache from an already-ordered set of records
    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Current records in order
    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the cache holds no records
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Replace the record at `id` in place.
    ///
    /// A no-op when no record with that id exists; upsert never inserts.
    pub fn upsert(&mut self, id: u64, user: User) {
        if let Some(slot) = self.users.iter_mut().find(|u| u.id == id) {
            *slot = user;
        }
    }

    /// Remove the record with `id`, if present
    pub fn remove(&mut self, id: u64) {
        self.users.retain(|u| u.id != id);
    }

    /// Append a record at the tail
    pub fn append(&mut self, user: User) {
        self.users.push(user);
    }

    /// Next locally-assigned id: max existing + 1, or 1 when empty
    pub fn next_id(&self) -> u64 {
        self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1
    }

    /// Replace the whole cache with freshly fetched records
    pub fn replace_all(&mut self, users: Vec<User>) {
        self.users = users;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn append_preserves_order() {
        let mut cache = EntityCache::new();
        cache.append(user(1, "A"));
        cache.append(user(2, "B"));
        cache.append(user(3, "C"));

        let ids: Vec<u64> = cache.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut cache = EntityCache::from_users(vec![user(1, "A"), user(2, "B")]);
        cache.upsert(1, user(1, "A2"));

        assert_eq!(cache.list()[0].name, "A2");
        assert_eq!(cache.list()[1].name, "B");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn upsert_absent_id_is_noop() {
        let mut cache = EntityCache::from_users(vec![user(1, "A")]);
        cache.upsert(9, user(9, "Ghost"));

        assert_eq!(cache.len(), 1);
        assert!(cache.get(9).is_none());
    }

    #[test]
    fn remove_then_append_moves_to_tail() {
        let mut cache = EntityCache::from_users(vec![user(1, "A"), user(2, "B"), user(3, "C")]);
        let snapshot = cache.get(2).cloned().unwrap();

        cache.remove(2);
        cache.append(snapshot);

        let ids: Vec<u64> = cache.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn next_id_on_empty_cache() {
        assert_eq!(EntityCache::new().next_id(), 1);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let cache = EntityCache::from_users(vec![user(4, "A"), user(12, "B"), user(2, "C")]);
        assert_eq!(cache.next_id(), 13);
    }
}
