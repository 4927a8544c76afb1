//! Application startup sequencing
//!
//! 1. Start the persistence bridge (read, construct program, subscribe)
//! 2. Register the offline worker, once, without waiting on it. Whether a
//!    worker exists at all is the registrar's call.

use crate::bridge::PersistenceBridge;
use crate::error::BridgeError;
use crate::program::{App, Program};
use crate::settings::Settings;
use crate::storage::KeyValueStore;
use crate::worker::WorkerRegistrar;

/// A started application
pub struct Bootstrapped<S> {
    pub app: App,
    pub bridge: PersistenceBridge<S>,
}

pub fn bootstrap<S, P, R>(
    store: S,
    program: P,
    settings: &Settings,
    registrar: &R,
) -> Result<Bootstrapped<S>, BridgeError>
where
    S: KeyValueStore + 'static,
    P: Program,
    R: WorkerRegistrar + ?Sized,
{
    let mut bridge = PersistenceBridge::new(store);
    let app = bridge.start(program, &settings.node)?;

    registrar.register();

    Ok(Bootstrapped { app, bridge })
}
