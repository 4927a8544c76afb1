//! Host key-value storage
//!
//! Backends:
//! - `MemoryStore`: in-process, for tests and headless runs
//! - `FileStore`: JSON file on disk (native)
//! - `LocalStorage`: `window.localStorage` (web)

mod file;
#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Synchronous string-keyed storage that outlives the process.
///
/// `get` returns `Ok(None)` when the key has never been written; that is the
/// absence sentinel handed to programs on first run.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace whatever is stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
