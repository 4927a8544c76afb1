//! UI program contract
//!
//! The program itself is opaque. It is built once from a `ProgramConfig` and
//! hands back an `App` whose ports it publishes on for the rest of its life.

use crate::port::Port;

/// Construction input for a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramConfig {
    /// Where the program renders. Opaque here (a DOM id on the web).
    pub node: String,
    /// Persisted blob from the previous run, `None` on first run
    pub flags: Option<String>,
}

/// Outbound channels a running program exposes
#[derive(Clone, Default)]
pub struct Ports {
    /// Serialized state the program wants persisted
    pub store: Port<String>,
}

/// Handle to a running program
#[derive(Clone, Default)]
pub struct App {
    pub ports: Ports,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }
}

pub trait Program {
    /// Start the program. Called exactly once.
    fn init(self, config: ProgramConfig) -> App;
}
