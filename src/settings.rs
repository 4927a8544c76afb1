//! Bootstrap settings
//!
//! Everything here is about where things live. The storage key is not
//! configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_NODE, DEFAULT_WORKER_SCRIPT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mount target handed to the program
    pub node: String,
    /// URL of the offline worker script
    pub worker_script: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node: DEFAULT_NODE.to_string(),
            worker_script: DEFAULT_WORKER_SCRIPT.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.node, "root");
        assert_eq!(s.worker_script, "/service-worker.js");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"worker_script": "/sw.js"}"#).unwrap();
        assert_eq!(s.worker_script, "/sw.js");
        assert_eq!(s.node, "root");
    }

    #[test]
    fn test_load_invalid_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        assert_eq!(Settings::load(&dir.path().join("missing.json")), Settings::default());
    }
}
