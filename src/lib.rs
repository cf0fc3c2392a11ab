//! rolo - Terminal user directory with optimistic remote sync
//!
//! Edits apply to the local cache before the remote record service
//! confirms them; failed confirmations roll back deterministically.

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod remote;
pub mod store;
pub mod ui;

pub use error::{RoloError, RoloResult};
