//! Persisted cache storage
//!
//! The directory hydrates from an opaque key-value blob store at startup
//! and writes back after every committed mutation. The store is pluggable:
//! the CLI uses [`FsBlobStore`] under the state directory, tests use
//! [`MemBlobStore`].

mod blob;

pub use blob::{CacheBlob, USERS_KEY};

use crate::error::{RoloError, RoloResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;
use tracing::debug;

/// Opaque key-value blob store
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`, if any
    async fn get(&self, key: &str) -> RoloResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob
    async fn put(&self, key: &str, value: &str) -> RoloResult<()>;
}

/// File-backed blob store: one `<key>.json` file per key
pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    /// Create a store rooted at `dir` (created on first write)
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> RoloResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| RoloError::io(format!("reading blob {}", path.display()), e))?;
        Ok(Some(content))
    }

    async fn put(&self, key: &str, value: &str) -> RoloResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| RoloError::io("creating blob store directory", e))?;

        let path = self.path_for(key);
        fs::write(&path, value)
            .await
            .map_err(|e| RoloError::io(format!("writing blob {}", path.display()), e))?;

        debug!(key, "blob written");
        Ok(())
    }
}

/// In-memory blob store for tests
#[derive(Default)]
pub struct MemBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemBlobStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemBlobStore {
    async fn get(&self, key: &str) -> RoloResult<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| RoloError::Internal("blob store lock poisoned".to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> RoloResult<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| RoloError::Internal("blob store lock poisoned".to_string()))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
