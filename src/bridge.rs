//! Persistence bridge
//!
//! Reads the persisted blob once, hands it to the program as its flags, then
//! writes every value the program publishes on its `store` port back to the
//! same key. The blob is never parsed or validated in either direction.
//!
//! State machine:
//! - `Uninitialized`: nothing read yet
//! - `Listening`: program constructed and subscribed; lasts until the process
//!   exits (there is no unsubscribe)

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::consts::STORAGE_KEY;
use crate::error::BridgeError;
use crate::program::{App, Program, ProgramConfig};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    Listening,
}

pub struct PersistenceBridge<S> {
    store: Rc<RefCell<S>>,
    state: BridgeState,
    failed_writes: Rc<Cell<u64>>,
}

impl<S: KeyValueStore + 'static> PersistenceBridge<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
            state: BridgeState::Uninitialized,
            failed_writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Shared handle on the underlying store
    pub fn store(&self) -> Rc<RefCell<S>> {
        Rc::clone(&self.store)
    }

    /// Writes the store rejected since startup. They are not retried.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.get()
    }

    /// Read the persisted blob, construct `program` with it and subscribe to
    /// its `store` port.
    ///
    /// A read failure is returned as-is and leaves the bridge uninitialized.
    /// Values the program sends from inside `init` are not seen, since the
    /// subscription only exists once `init` has returned.
    pub fn start<P: Program>(&mut self, program: P, node: &str) -> Result<App, BridgeError> {
        if self.state != BridgeState::Uninitialized {
            return Err(BridgeError::AlreadyStarted);
        }

        let flags = self.store.borrow().get(STORAGE_KEY)?;
        match &flags {
            Some(blob) => log::info!("Loaded persisted state ({} bytes)", blob.len()),
            None => log::info!("No persisted state, first run"),
        }

        let app = program.init(ProgramConfig {
            node: node.to_string(),
            flags,
        });

        let store = Rc::clone(&self.store);
        let failed = Rc::clone(&self.failed_writes);
        app.ports.store.subscribe(move |payload: &String| {
            let Ok(mut store) = store.try_borrow_mut() else {
                failed.set(failed.get() + 1);
                log::error!("Failed to persist state: store is borrowed");
                return;
            };
            match store.set(STORAGE_KEY, payload) {
                Ok(()) => log::debug!("Persisted state ({} bytes)", payload.len()),
                Err(e) => {
                    failed.set(failed.get() + 1);
                    log::error!("Failed to persist state: {}", e);
                }
            }
        });

        self.state = BridgeState::Listening;
        log::info!("Persistence bridge listening on key {:?}", STORAGE_KEY);
        Ok(app)
    }
}
