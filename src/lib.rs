//! Cache Bridge - persisted state hand-off for a self-contained UI program
//!
//! Core modules:
//! - `bridge`: Startup read + outbound save subscription
//! - `storage`: Host key-value stores (memory, file, LocalStorage)
//! - `port`: Ordered synchronous outbound channels
//! - `program`: Contract the UI program is built against
//! - `worker`: Offline worker registration
//! - `bootstrap`: Startup sequencing

pub mod bootstrap;
pub mod bridge;
pub mod counter;
pub mod error;
pub mod port;
pub mod program;
pub mod settings;
pub mod storage;
pub mod worker;

pub use bootstrap::{Bootstrapped, bootstrap};
pub use bridge::{BridgeState, PersistenceBridge};
pub use error::{BridgeError, StoreError};
pub use port::Port;
pub use program::{App, Ports, Program, ProgramConfig};
pub use settings::Settings;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use worker::{NoopRegistrar, WorkerRegistrar};

/// Fixed names shared by every entry point
pub mod consts {
    /// The one key persisted state lives under
    pub const STORAGE_KEY: &str = "cache";

    /// Default mount target
    pub const DEFAULT_NODE: &str = "root";

    pub const DEFAULT_WORKER_SCRIPT: &str = "/service-worker.js";

    /// Native store file, relative to the working directory
    pub const NATIVE_STORE_FILE: &str = "cache.json";

    pub const NATIVE_SETTINGS_FILE: &str = "cache-bridge.json";
}
