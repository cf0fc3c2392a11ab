//! Directory state: cache + tracker + load status behind one owned value
//!
//! Every optimistic action runs as a `begin_*` / `complete_*` pair. `begin_*`
//! applies the local change synchronously and says whether a remote call is
//! needed; `complete_*` consumes the remote outcome and either resolves the
//! pending mutation or rolls the cache back to the tracked snapshot. The
//! remote call between the two halves is the only suspension point, so no
//! two resolution handlers ever interleave.

use crate::directory::cache::EntityCache;
use crate::directory::tracker::{MutationKind, MutationTracker};
use crate::directory::user::{User, UserFields};
use crate::error::{RoloError, RoloResult, UpdateRejectReason};
use tracing::{debug, warn};
use uuid::Uuid;

/// Overall fetch lifecycle for the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Where an optimistic update goes after the local change is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDispatch {
    /// Seeded entity: issue the remote call with this body
    Remote(User),
    /// Locally-originated entity: never reaches the network, reject in place
    LocalReject,
}

/// Where an optimistic delete goes after the local change is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDispatch {
    /// Seeded entity: issue the remote call
    Remote,
    /// Locally-originated entity: already logically deleted, confirm without
    /// a network call (delete is idempotent)
    AlreadyLocal,
}

/// The single source of truth consumed by presentation layers.
///
/// Owned and injected, never ambient: tests drive it directly without a
/// UI or network harness.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    cache: EntityCache,
    tracker: MutationTracker,
    status: LoadStatus,
    last_error: Option<String>,
}

impl Default for LoadStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl Directory {
    /// Create an empty directory (status idle, fetch-on-load pending)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory hydrated from persisted records.
    ///
    /// A non-empty hydration counts as loaded; an empty one stays idle so
    /// the first activation triggers a full fetch.
    pub fn hydrated(users: Vec<User>) -> Self {
        let status = if users.is_empty() {
            LoadStatus::Idle
        } else {
            LoadStatus::Succeeded
        };
        Self {
            cache: EntityCache::from_users(users),
            tracker: MutationTracker::new(),
            status,
            last_error: None,
        }
    }

    // --- read model ---

    /// Current records in order
    pub fn users(&self) -> &[User] {
        self.cache.list()
    }

    /// Look up a record by id
    pub fn get(&self, id: u64) -> Option<&User> {
        self.cache.get(id)
    }

    /// Ids with unresolved mutations
    pub fn pending_ids(&self) -> Vec<u64> {
        self.tracker.pending_ids()
    }

    /// Whether `id` has an unresolved mutation
    pub fn is_pending(&self, id: u64) -> bool {
        self.tracker.is_pending(id)
    }

    /// The single visible error message, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Overall fetch status
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Whether the directory needs its first full fetch
    pub fn needs_fetch(&self) -> bool {
        self.cache.is_empty() && self.status != LoadStatus::Succeeded
    }

    /// Case-insensitive substring filter over names.
    ///
    /// Pure: never touches the cache, tracker, error, or network.
    pub fn search<'a>(&'a self, term: &str) -> Vec<&'a User> {
        let needle = term.to_lowercase();
        self.cache
            .list()
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Clear the visible error
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // --- fetch lifecycle ---

    /// Enter the loading state ahead of a full list fetch
    pub fn begin_fetch(&mut self) {
        self.last_error = None;
        self.status = LoadStatus::Loading;
        debug!("directory load started");
    }

    /// Apply the outcome of a full list fetch.
    ///
    /// Failure leaves the cache as it was (empty on first load) and is
    /// retried only on the next explicit reload.
    pub fn complete_fetch(&mut self, outcome: RoloResult<Vec<User>>) -> RoloResult<()> {
        match outcome {
            Ok(users) => {
                debug!(count = users.len(), "directory load succeeded");
                self.cache.replace_all(users);
                self.status = LoadStatus::Succeeded;
                Ok(())
            }
            Err(_) => {
                self.status = LoadStatus::Failed;
                let err = RoloError::FetchFailed;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    // --- update ---

    /// Apply an optimistic update and report where it dispatches.
    ///
    /// The cache shows the new values immediately; the tracker holds the
    /// pre-mutation snapshot until `complete_update` runs.
    pub fn begin_update(&mut self, id: u64, fields: UserFields) -> RoloResult<UpdateDispatch> {
        self.last_error = None;

        let snapshot = self
            .cache
            .get(id)
            .cloned()
            .ok_or(RoloError::UserNotFound(id))?;

        self.tracker
            .begin(id, MutationKind::Update, Some(snapshot));
        let updated = fields.into_user(id);
        self.cache.upsert(id, updated.clone());
        debug!(id, "optimistic update applied");

        if User::is_seeded(id) {
            Ok(UpdateDispatch::Remote(updated))
        } else {
            Ok(UpdateDispatch::LocalReject)
        }
    }

    /// Consume the update outcome: resolve on success, restore the
    /// snapshot and surface the rejection on failure.
    pub fn complete_update(
        &mut self,
        id: u64,
        outcome: Result<User, UpdateRejectReason>,
    ) -> RoloResult<()> {
        match outcome {
            Ok(_) => {
                self.tracker.resolve(id);
                debug!(id, "update confirmed");
                Ok(())
            }
            Err(reason) => {
                if let Some(snapshot) = self.tracker.rollback(id) {
                    self.cache.upsert(id, snapshot);
                }
                let err = RoloError::update_rejected(reason);
                self.last_error = Some(err.to_string());
                debug!(id, ?reason, "update rolled back");
                Err(err)
            }
        }
    }

    // --- delete ---

    /// Apply an optimistic delete and report where it dispatches
    pub fn begin_delete(&mut self, id: u64) -> RoloResult<DeleteDispatch> {
        self.last_error = None;

        let snapshot = self
            .cache
            .get(id)
            .cloned()
            .ok_or(RoloError::UserNotFound(id))?;

        self.tracker
            .begin(id, MutationKind::Delete, Some(snapshot));
        self.cache.remove(id);
        debug!(id, "optimistic delete applied");

        if User::is_seeded(id) {
            Ok(DeleteDispatch::Remote)
        } else {
            Ok(DeleteDispatch::AlreadyLocal)
        }
    }

    /// Consume the delete outcome: a failure re-appends the snapshot at
    /// the tail (order deliberately not preserved).
    pub fn complete_delete(&mut self, id: u64, outcome: Result<(), ()>) -> RoloResult<()> {
        match outcome {
            Ok(()) => {
                self.tracker.resolve(id);
                debug!(id, "delete confirmed");
                Ok(())
            }
            Err(()) => {
                if let Some(snapshot) = self.tracker.rollback(id) {
                    self.cache.append(snapshot);
                }
                let err = RoloError::DeleteRejected;
                self.last_error = Some(err.to_string());
                debug!(id, "delete rolled back");
                Err(err)
            }
        }
    }

    // --- create ---

    /// Append an optimistic entity under a locally-assigned temp id and
    /// return the correlation token the confirmation must carry
    pub fn begin_create(&mut self, fields: UserFields) -> (u64, Uuid) {
        self.last_error = None;

        let temp_id = self.cache.next_id();
        let token = Uuid::new_v4();
        self.cache.append(fields.into_user(temp_id));
        self.tracker.begin_create(temp_id, token);
        debug!(temp_id, %token, "optimistic create applied");

        (temp_id, token)
    }

    /// Consume the create outcome, correlated strictly by token.
    ///
    /// Success replaces the token's entity in place with the
    /// server-confirmed record (the server may have assigned a different
    /// id) and reports the id the slot now carries. Failure removes the
    /// temp entity; nothing to restore.
    pub fn complete_create(
        &mut self,
        token: Uuid,
        outcome: Result<User, ()>,
    ) -> RoloResult<Option<u64>> {
        let Some(temp_id) = self.tracker.id_for_token(token) else {
            warn!(%token, "create confirmation for unknown token, ignoring");
            return Ok(None);
        };

        match outcome {
            Ok(confirmed) => {
                let confirmed_id = confirmed.id;
                self.cache.upsert(temp_id, confirmed);
                self.tracker.resolve(temp_id);
                debug!(temp_id, confirmed_id, "create confirmed");
                Ok(Some(confirmed_id))
            }
            Err(()) => {
                self.cache.remove(temp_id);
                self.tracker.resolve(temp_id);
                let err = RoloError::CreateRejected;
                self.last_error = Some(err.to_string());
                debug!(temp_id, "create dropped");
                Err(err)
            }
        }
    }

    /// Number of unresolved mutations (for display)
    pub fn pending_count(&self) -> usize {
        self.tracker.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> UserFields {
        UserFields {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
        }
    }

    fn seeded(id: u64, name: &str) -> User {
        fields(name).into_user(id)
    }

    #[test]
    fn hydrated_empty_needs_fetch() {
        let dir = Directory::hydrated(vec![]);
        assert_eq!(dir.status(), LoadStatus::Idle);
        assert!(dir.needs_fetch());
    }

    #[test]
    fn hydrated_nonempty_is_loaded() {
        let dir = Directory::hydrated(vec![seeded(1, "A")]);
        assert_eq!(dir.status(), LoadStatus::Succeeded);
        assert!(!dir.needs_fetch());
    }

    #[test]
    fn fetch_failure_leaves_cache_empty() {
        let mut dir = Directory::new();
        dir.begin_fetch();
        assert_eq!(dir.status(), LoadStatus::Loading);

        let result = dir.complete_fetch(Err(RoloError::Http("boom".to_string())));
        assert!(result.is_err());
        assert_eq!(dir.status(), LoadStatus::Failed);
        assert!(dir.users().is_empty());
        assert!(dir.last_error().unwrap().contains("Failed to fetch"));
    }

    #[test]
    fn update_visible_then_reverted_on_rejection() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A"), seeded(2, "B")]);

        let dispatch = dir.begin_update(1, fields("A2")).unwrap();
        assert!(matches!(dispatch, UpdateDispatch::Remote(_)));
        assert_eq!(dir.get(1).unwrap().name, "A2");
        assert!(dir.is_pending(1));

        let err = dir
            .complete_update(1, Err(UpdateRejectReason::ServerError))
            .unwrap_err();
        assert!(err.is_mutation_rejection());
        assert_eq!(dir.get(1).unwrap().name, "A");
        assert!(!dir.is_pending(1));
        assert!(dir.last_error().unwrap().contains("Failed to update"));
    }

    #[test]
    fn update_of_local_entity_dispatches_local_reject() {
        let mut dir = Directory::hydrated(vec![seeded(11, "Local")]);

        let dispatch = dir.begin_update(11, fields("Renamed")).unwrap();
        assert_eq!(dispatch, UpdateDispatch::LocalReject);

        let err = dir
            .complete_update(11, Err(UpdateRejectReason::LocallyOnly))
            .unwrap_err();
        assert!(err.to_string().contains("exists only locally"));
        assert_eq!(dir.get(11).unwrap().name, "Local");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A")]);
        let err = dir.begin_update(9, fields("X")).unwrap_err();
        assert!(matches!(err, RoloError::UserNotFound(9)));
        assert!(!dir.is_pending(9));
    }

    #[test]
    fn delete_rollback_reappends_at_tail() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A"), seeded(2, "B"), seeded(3, "C")]);

        assert_eq!(dir.begin_delete(2).unwrap(), DeleteDispatch::Remote);
        assert!(dir.get(2).is_none());
        assert!(dir.is_pending(2));

        dir.complete_delete(2, Err(())).unwrap_err();
        let ids: Vec<u64> = dir.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert!(!dir.is_pending(2));
    }

    #[test]
    fn delete_of_local_entity_is_idempotent_success() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A"), seeded(14, "Local")]);

        assert_eq!(dir.begin_delete(14).unwrap(), DeleteDispatch::AlreadyLocal);
        dir.complete_delete(14, Ok(())).unwrap();

        assert!(dir.get(14).is_none());
        assert!(dir.last_error().is_none());
        assert!(dir.pending_ids().is_empty());
    }

    #[test]
    fn create_on_empty_cache_assigns_id_one() {
        let mut dir = Directory::new();
        let (temp_id, token) = dir.begin_create(fields("C"));
        assert_eq!(temp_id, 1);
        assert!(dir.is_pending(1));

        dir.complete_create(token, Ok(seeded(1, "C"))).unwrap();
        assert_eq!(dir.users().len(), 1);
        assert!(dir.pending_ids().is_empty());
    }

    #[test]
    fn create_confirmation_replaces_slot_in_place() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A"), seeded(2, "B")]);
        let (temp_id, token) = dir.begin_create(fields("C"));
        assert_eq!(temp_id, 3);

        // Server assigned a different id; the same slot is patched, no
        // duplicate entry appears.
        dir.complete_create(token, Ok(seeded(41, "C"))).unwrap();
        let ids: Vec<u64> = dir.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 41]);
    }

    #[test]
    fn concurrent_creates_resolve_by_token_not_position() {
        let mut dir = Directory::new();
        let (first_id, first_token) = dir.begin_create(fields("First"));
        let (second_id, second_token) = dir.begin_create(fields("Second"));
        assert_eq!((first_id, second_id), (1, 2));

        // Confirmations arrive out of order; each patches its own slot.
        dir.complete_create(second_token, Ok(seeded(8, "Second")))
            .unwrap();
        dir.complete_create(first_token, Ok(seeded(7, "First")))
            .unwrap();

        let names: Vec<&str> = dir.users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        let ids: Vec<u64> = dir.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn create_confirmation_survives_interleaved_edit() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A")]);
        let (temp_id, token) = dir.begin_create(fields("C"));
        assert_eq!(temp_id, 2);

        // An edit lands on the temp entity while the create is still in
        // flight; the pending mutation stays a create and the original
        // confirmation still finds its slot by token.
        dir.begin_update(temp_id, fields("C2")).unwrap();
        assert_eq!(dir.get(temp_id).unwrap().name, "C2");

        let confirmed = dir.complete_create(token, Ok(seeded(21, "C"))).unwrap();
        assert_eq!(confirmed, Some(21));
        assert_eq!(dir.get(21).unwrap().name, "C");
        assert!(dir.pending_ids().is_empty());
    }

    #[test]
    fn create_rejection_drops_temp_entity() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A")]);
        let (temp_id, token) = dir.begin_create(fields("C"));
        assert_eq!(temp_id, 2);

        dir.complete_create(token, Err(())).unwrap_err();
        assert_eq!(dir.users().len(), 1);
        assert!(!dir.is_pending(2));
        assert!(dir.last_error().unwrap().contains("Failed to create"));
    }

    #[test]
    fn all_success_sequence_ends_with_empty_tracker() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A"), seeded(2, "B")]);
        let initial = dir.users().len();

        let (_, token) = dir.begin_create(fields("C"));
        dir.complete_create(token, Ok(seeded(3, "C"))).unwrap();

        dir.begin_update(1, fields("A2")).unwrap();
        dir.complete_update(1, Ok(seeded(1, "A2"))).unwrap();

        dir.begin_delete(2).unwrap();
        dir.complete_delete(2, Ok(())).unwrap();

        assert_eq!(dir.pending_count(), 0);
        assert_eq!(dir.users().len(), initial + 1 - 1);
    }

    #[test]
    fn racing_rollback_restores_pre_mutation_truth() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A")]);

        // Two updates race on the same id; the second begins before the
        // first resolves.
        dir.begin_update(1, fields("A2")).unwrap();
        dir.begin_update(1, fields("A3")).unwrap();
        assert_eq!(dir.get(1).unwrap().name, "A3");

        dir.complete_update(1, Err(UpdateRejectReason::ServerError))
            .unwrap_err();
        assert_eq!(dir.get(1).unwrap().name, "A");
    }

    #[test]
    fn search_is_case_insensitive_and_pure() {
        let mut dir = Directory::hydrated(vec![seeded(1, "Leanne Graham"), seeded(2, "Ervin")]);
        dir.begin_update(1, fields("Leanne Graham")).unwrap();
        let pending_before = dir.pending_ids();

        let hits = dir.search("LEANNE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert_eq!(dir.pending_ids(), pending_before);
        assert_eq!(dir.users().len(), 2);
    }

    #[test]
    fn new_action_clears_previous_error() {
        let mut dir = Directory::hydrated(vec![seeded(1, "A")]);
        dir.begin_update(1, fields("A2")).unwrap();
        dir.complete_update(1, Err(UpdateRejectReason::ServerError))
            .unwrap_err();
        assert!(dir.last_error().is_some());

        dir.begin_update(1, fields("A3")).unwrap();
        assert!(dir.last_error().is_none());
        dir.complete_update(1, Ok(seeded(1, "A3"))).unwrap();
    }
}
