//! Error types for rolo
//!
//! All modules use `RoloResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rolo operations
pub type RoloResult<T> = Result<T, RoloError>;

/// Why an optimistic update was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateRejectReason {
    /// The remote service returned a non-2xx response or the transport failed
    ServerError,
    /// The entity was created locally and never confirmed by the server,
    /// so there is nothing remote to update
    LocallyOnly,
}

/// All errors that can occur in rolo
#[derive(Error, Debug)]
pub enum RoloError {
    // Mutation errors: each is terminal for its attempt and has already
    // rolled the cache back by the time it surfaces
    #[error("Failed to fetch users. Server error occurred.")]
    FetchFailed,

    #[error("{}", update_reject_message(.reason))]
    UpdateRejected { reason: UpdateRejectReason },

    #[error("Failed to delete user. Server error occurred.")]
    DeleteRejected,

    #[error("Failed to create user. Server error occurred.")]
    CreateRejected,

    #[error("No user with id {0} in the directory")]
    UserNotFound(u64),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Transport errors (wrapped into the mutation errors above before
    // they reach the presentation layer)
    #[error("HTTP request failed: {0}")]
    Http(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

fn update_reject_message(reason: &UpdateRejectReason) -> &'static str {
    match reason {
        UpdateRejectReason::ServerError => "Failed to update user. Server error occurred.",
        UpdateRejectReason::LocallyOnly => {
            "Cannot update user. This user exists only locally and has not been persisted on the server."
        }
    }
}

impl RoloError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an update rejection
    pub fn update_rejected(reason: UpdateRejectReason) -> Self {
        Self::UpdateRejected { reason }
    }

    /// Check if the error is a per-mutation rejection (cache already rolled back)
    pub fn is_mutation_rejection(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed
                | Self::UpdateRejected { .. }
                | Self::DeleteRejected
                | Self::CreateRejected
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::FetchFailed => Some("Check your network connection, then run: rolo sync"),
            Self::UpdateRejected {
                reason: UpdateRejectReason::LocallyOnly,
            } => Some("Local-only users can be edited again after the server confirms them"),
            Self::ConfigInvalid { .. } => Some("Run: rolo config init --force"),
            _ => None,
        }
    }
}
