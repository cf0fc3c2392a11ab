//! Persisted cache blob format

use crate::directory::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key under which the directory cache is persisted
pub const USERS_KEY: &str = "users";

/// Envelope written to the blob store: the cached records plus the last
/// successful sync stamp
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheBlob {
    pub users: Vec<User>,

    /// When the cache last reflected a confirmed remote fetch
    pub synced_at: Option<DateTime<Utc>>,
}

impl CacheBlob {
    /// Envelope for the current cache contents, stamped now
    pub fn now(users: Vec<User>) -> Self {
        Self {
            users,
            synced_at: Some(Utc::now()),
        }
    }

    /// Decode a persisted blob.
    ///
    /// Corruption is not fatal: the directory starts empty and refetches,
    /// matching the absent-blob case.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(blob) => blob,
            Err(err) => {
                warn!("persisted cache blob is corrupt, starting empty: {err}");
                Self::default()
            }
        }
    }

    /// Encode for persistence
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_corrupt_blob_starts_empty() {
        let blob = CacheBlob::decode("not json {{{");
        assert!(blob.users.is_empty());
        assert!(blob.synced_at.is_none());
    }

    #[test]
    fn encode_decode_roundtrip() {
        let user = User {
            id: 1,
            name: "A".to_string(),
            email: "a@example.com".to_string(),
            phone: "555-0100".to_string(),
        };
        let blob = CacheBlob::now(vec![user]);

        let raw = blob.encode().unwrap();
        let decoded = CacheBlob::decode(&raw);
        assert_eq!(decoded.users.len(), 1);
        assert!(decoded.synced_at.is_some());
    }
}
