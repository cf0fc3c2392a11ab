//! Remote record service abstraction
//!
//! The directory core never talks HTTP directly; it sees this trait. The
//! production implementation is [`HttpRecordService`]; tests substitute
//! scripted fakes.

mod http;

pub use http::HttpRecordService;

use crate::directory::user::{User, UserFields};
use crate::error::RoloResult;
use async_trait::async_trait;

/// Remote CRUD interface for user records.
///
/// Failure is any transport error or non-2xx response; callers map it to
/// the per-operation rejection and discard status detail.
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Fetch the full user list
    async fn fetch_users(&self) -> RoloResult<Vec<User>>;

    /// Update an existing user, returning the server's view of the record
    async fn update_user(&self, user: &User) -> RoloResult<User>;

    /// Delete a user by id
    async fn delete_user(&self, id: u64) -> RoloResult<()>;

    /// Create a user; the server assigns the id
    async fn create_user(&self, fields: &UserFields) -> RoloResult<User>;
}
