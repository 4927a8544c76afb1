//! In-memory store

use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::StoreError;

/// HashMap-backed store that keeps a log of every write.
///
/// Can be told to reject reads or writes to simulate a host that has storage
/// disabled or is over quota.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: Vec<(String, String)>,
    reject_reads: bool,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry (a "subsequent run")
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Every successful `set`, in order
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reject_reads(&mut self, reject: bool) {
        self.reject_reads = reject;
    }

    pub fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.reject_reads {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}
