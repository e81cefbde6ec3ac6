//! Logging configuration from TOML (`[logging]` section)

use super::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving structured wizard events
    pub event_log: Option<String>,
    /// Directory for daily rolling diagnostic logs
    pub log_dir: Option<String>,
}

impl FileLoggingConfig {
    pub fn event_log(&self) -> Option<PathBuf> {
        self.event_log.as_deref().map(expand_home)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log_dir.as_deref().map(expand_home)
    }
}
