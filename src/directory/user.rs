//! User record types and the seeded-id partition

use serde::{Deserialize, Serialize};

/// Highest id known to pre-exist on the remote service.
///
/// Ids above this were assigned locally for not-yet-confirmed creates and
/// are not guaranteed to exist remotely.
pub const SEEDED_ID_MAX: u64 = 10;

/// A user record as held in the directory cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique id, stable once assigned
    pub id: u64,

    pub name: String,

    pub email: String,

    pub phone: String,
}

impl User {
    /// Check whether an id belongs to the seeded partition (pre-exists remotely)
    pub fn is_seeded(id: u64) -> bool {
        id <= SEEDED_ID_MAX
    }
}

/// Field values for a create or update, without an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserFields {
    /// Attach an id, producing a full record
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

impl From<User> for UserFields {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            phone: user.phone,
        }
    }
}
