//! Error types
//!
//! The bridge performs no validation, so the only failures it knows about
//! come from the host store.

use thiserror::Error;

/// Failures reported by a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The host refused access to storage (disabled, private mode, no window)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read key {key:?}: {reason}")]
    ReadFailed { key: String, reason: String },

    /// Typically a quota error on the web
    #[error("failed to write key {key:?}: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not a JSON object of strings: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Failures from [`PersistenceBridge::start`](crate::bridge::PersistenceBridge::start).
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("bridge already started")]
    AlreadyStarted,

    #[error(transparent)]
    Store(#[from] StoreError),
}
