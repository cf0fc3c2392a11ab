//! Mutation tracker: at most one pending descriptor per entity id
//!
//! A descriptor exists exactly while a mutation is unconfirmed. The snapshot
//! recorded at the first `begin` survives overlapping begins on the same id,
//! so rollback always restores true pre-mutation state regardless of how
//! in-flight actions interleave.

use crate::directory::user::User;
use std::collections::HashMap;
use uuid::Uuid;

/// Kind of in-flight mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// Descriptor for one unconfirmed mutation on one entity
#[derive(Debug, Clone)]
pub struct PendingMutation {
    pub kind: MutationKind,

    /// Entity state before the first optimistic change; absent for creates
    pub snapshot: Option<User>,

    /// Bumped on every `begin` for the same id while unresolved
    pub seq: u64,

    /// Correlation token for creates; confirmation resolves by this token,
    /// never by id heuristics
    pub token: Option<Uuid>,
}

/// Mapping from entity id to its pending mutation, if any
#[derive(Debug, Clone, Default)]
pub struct MutationTracker {
    pending: HashMap<u64, PendingMutation>,
    next_seq: u64,
}

impl MutationTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending mutation for `id`.
    ///
    /// A second `begin` while the first is unresolved bumps the sequence
    /// number but keeps the original snapshot: the cache already holds the
    /// first action's optimistic value, which must never become the
    /// rollback target. A pending create additionally keeps its kind and
    /// token — until the server confirms the entity, its remote lifecycle
    /// is the create, confirmation resolves by token, and there is no
    /// pre-mutation state to restore.
    pub fn begin(&mut self, id: u64, kind: MutationKind, snapshot: Option<User>) {
        self.next_seq += 1;
        let seq = self.next_seq;

        match self.pending.get_mut(&id) {
            Some(existing) => {
                if existing.kind != MutationKind::Create {
                    existing.kind = kind;
                }
                existing.seq = seq;
            }
            None => {
                self.pending.insert(
                    id,
                    PendingMutation {
                        kind,
                        snapshot,
                        seq,
                        token: None,
                    },
                );
            }
        }
    }

    /// Record a pending create for `id`, correlated by `token`
    pub fn begin_create(&mut self, id: u64, token: Uuid) {
        self.begin(id, MutationKind::Create, None);
        if let Some(pending) = self.pending.get_mut(&id) {
            pending.token = Some(token);
        }
    }

    /// Remove the descriptor for `id` after a confirmed success
    pub fn resolve(&mut self, id: u64) {
        self.pending.remove(&id);
    }

    /// Remove the descriptor for `id` and hand back its pre-mutation
    /// snapshot; the caller restores cache state from it
    pub fn rollback(&mut self, id: u64) -> Option<User> {
        self.pending.remove(&id).and_then(|p| p.snapshot)
    }

    /// Whether `id` has an unresolved mutation
    pub fn is_pending(&self, id: u64) -> bool {
        self.pending.contains_key(&id)
    }

    /// Look up the descriptor for `id`
    pub fn get(&self, id: u64) -> Option<&PendingMutation> {
        self.pending.get(&id)
    }

    /// Find the entity id whose pending create carries `token`
    pub fn id_for_token(&self, token: Uuid) -> Option<u64> {
        self.pending
            .iter()
            .find(|(_, p)| p.token == Some(token))
            .map(|(id, _)| *id)
    }

    /// Ids with unresolved mutations, ascending
    pub fn pending_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.pending.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of unresolved mutations
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no mutations are unresolved
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
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
    fn begin_then_resolve_clears_entry() {
        let mut tracker = MutationTracker::new();
        tracker.begin(1, MutationKind::Update, Some(user(1, "A")));
        assert!(tracker.is_pending(1));

        tracker.resolve(1);
        assert!(!tracker.is_pending(1));
        assert!(tracker.is_empty());
    }

    #[test]
    fn rollback_returns_snapshot_and_clears() {
        let mut tracker = MutationTracker::new();
        tracker.begin(1, MutationKind::Update, Some(user(1, "A")));

        let snapshot = tracker.rollback(1);
        assert_eq!(snapshot.unwrap().name, "A");
        assert!(!tracker.is_pending(1));
    }

    #[test]
    fn rollback_of_create_has_no_snapshot() {
        let mut tracker = MutationTracker::new();
        tracker.begin_create(11, Uuid::new_v4());

        assert!(tracker.rollback(11).is_none());
    }

    #[test]
    fn second_begin_keeps_original_snapshot() {
        let mut tracker = MutationTracker::new();
        tracker.begin(1, MutationKind::Update, Some(user(1, "A")));

        // The cache now holds the optimistic "A2"; a racing second update
        // must not capture it as the rollback target.
        tracker.begin(1, MutationKind::Update, Some(user(1, "A2")));

        let pending = tracker.get(1).unwrap();
        assert_eq!(pending.seq, 2);
        assert_eq!(tracker.rollback(1).unwrap().name, "A");
    }

    #[test]
    fn begin_on_pending_create_keeps_create_identity() {
        let mut tracker = MutationTracker::new();
        let token = Uuid::new_v4();
        tracker.begin_create(11, token);

        tracker.begin(11, MutationKind::Update, Some(user(11, "Edited")));

        let pending = tracker.get(11).unwrap();
        assert_eq!(pending.kind, MutationKind::Create);
        assert_eq!(pending.seq, 2);
        assert!(pending.snapshot.is_none());
        assert_eq!(tracker.id_for_token(token), Some(11));
    }

    #[test]
    fn token_lookup() {
        let mut tracker = MutationTracker::new();
        let token = Uuid::new_v4();
        tracker.begin_create(11, token);
        tracker.begin(2, MutationKind::Delete, Some(user(2, "B")));

        assert_eq!(tracker.id_for_token(token), Some(11));
        assert_eq!(tracker.id_for_token(Uuid::new_v4()), None);
    }

    #[test]
    fn pending_ids_sorted() {
        let mut tracker = MutationTracker::new();
        tracker.begin(5, MutationKind::Delete, Some(user(5, "E")));
        tracker.begin(2, MutationKind::Update, Some(user(2, "B")));

        assert_eq!(tracker.pending_ids(), vec![2, 5]);
    }
}
