//! Drives the directory against the remote service and the blob store
//!
//! Each CLI intent maps to one method here: apply the optimistic change,
//! suspend on the remote call if the policy gate allows one, feed the
//! outcome back, persist the cache. The directory itself stays free of
//! I/O so tests can drive it directly.

use crate::directory::coordinator::{DeleteDispatch, Directory, UpdateDispatch};
use crate::directory::user::UserFields;
use crate::error::{RoloResult, UpdateRejectReason};
use crate::remote::RecordService;
use crate::store::{BlobStore, CacheBlob, USERS_KEY};
use tracing::{debug, info};

/// Orchestrates the directory state against its collaborators
pub struct Coordinator<S, B> {
    directory: Directory,
    service: S,
    store: B,
}

impl<S: RecordService, B: BlobStore> Coordinator<S, B> {
    /// Hydrate the directory from the persisted blob.
    ///
    /// An absent or corrupt blob starts the directory empty; the first
    /// intent that needs records triggers a full fetch.
    pub async fn open(service: S, store: B) -> RoloResult<Self> {
        let blob = match store.get(USERS_KEY).await? {
            Some(raw) => CacheBlob::decode(&raw),
            None => CacheBlob::default(),
        };
        debug!(count = blob.users.len(), "directory hydrated from blob");

        Ok(Self {
            directory: Directory::hydrated(blob.users),
            service,
            store,
        })
    }

    /// Read access to the state consumed by presentation
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Fetch the full list if the cache is empty and unloaded
    pub async fn ensure_loaded(&mut self) -> RoloResult<()> {
        if !self.directory.needs_fetch() {
            return Ok(());
        }
        self.refresh().await
    }

    /// Explicit reload: always fetch, replacing the cache on success
    pub async fn refresh(&mut self) -> RoloResult<()> {
        self.directory.begin_fetch();
        let outcome = self.service.fetch_users().await;
        let result = self.directory.complete_fetch(outcome);
        if result.is_ok() {
            self.persist().await?;
            info!(count = self.directory.users().len(), "directory synced");
        }
        result
    }

    /// Create a user: optimistic append, then the remote call (always
    /// issued); the confirmation resolves by correlation token
    pub async fn add_user(&mut self, fields: UserFields) -> RoloResult<u64> {
        let (temp_id, token) = self.directory.begin_create(fields.clone());
        self.persist().await?;

        let outcome = self.service.create_user(&fields).await.map_err(|_| ());
        let result = self
            .directory
            .complete_create(token, outcome)
            .map(|confirmed| confirmed.unwrap_or(temp_id));
        self.persist().await?;
        result
    }

    /// Update a user: optimistic upsert, then the remote call unless the
    /// id is locally originated (local rejection, never sent)
    pub async fn update_user(&mut self, id: u64, fields: UserFields) -> RoloResult<()> {
        let dispatch = self.directory.begin_update(id, fields)?;
        self.persist().await?;

        let outcome = match dispatch {
            UpdateDispatch::Remote(body) => self
                .service
                .update_user(&body)
                .await
                .map_err(|_| UpdateRejectReason::ServerError),
            UpdateDispatch::LocalReject => Err(UpdateRejectReason::LocallyOnly),
        };

        let result = self.directory.complete_update(id, outcome);
        self.persist().await?;
        result
    }

    /// Delete a user: optimistic removal, then the remote call unless the
    /// id is locally originated (already logically deleted, confirmed
    /// without network)
    pub async fn delete_user(&mut self, id: u64) -> RoloResult<()> {
        let dispatch = self.directory.begin_delete(id)?;
        self.persist().await?;

        let outcome = match dispatch {
            DeleteDispatch::Remote => self.service.delete_user(id).await.map_err(|_| ()),
            DeleteDispatch::AlreadyLocal => Ok(()),
        };

        let result = self.directory.complete_delete(id, outcome);
        self.persist().await?;
        result
    }

    async fn persist(&self) -> RoloResult<()> {
        let blob = CacheBlob::now(self.directory.users().to_vec());
        self.store.put(USERS_KEY, &blob.encode()?).await
    }
}
