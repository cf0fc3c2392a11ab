//! Optimistic-mutation state manager for the user directory
//!
//! Local changes apply before remote confirmation: the [`cache`] holds
//! current-believed state, the [`tracker`] holds at most one pending
//! mutation per entity with its pre-mutation snapshot, and the
//! [`coordinator`] state machine rolls back deterministically when a
//! confirmation fails. [`sync`] ties the state to the remote service and
//! the persisted blob store.

pub mod cache;
pub mod coordinator;
pub mod sync;
pub mod tracker;
pub mod user;

pub use cache::EntityCache;
pub use coordinator::{DeleteDispatch, Directory, LoadStatus, UpdateDispatch};
pub use sync::Coordinator;
pub use tracker::{MutationKind, MutationTracker, PendingMutation};
pub use user::{User, UserFields, SEEDED_ID_MAX};
