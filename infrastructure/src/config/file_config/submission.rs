//! Submission configuration from TOML (`[submission]` section)

use super::expand_home;
use quote_domain::SubmissionMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const OUTBOX_FILE: &str = "outbox.jsonl";

/// Raw submission configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSubmissionConfig {
    /// Where finished leads go
    pub mode: SubmissionMode,
    /// Endpoint URL for `mode = "http"`
    pub endpoint: Option<String>,
    /// Request timeout for `mode = "http"`
    pub timeout_seconds: u64,
    /// JSONL file for `mode = "outbox"`
    pub outbox_path: Option<String>,
}

impl Default for FileSubmissionConfig {
    fn default() -> Self {
        Self {
            mode: SubmissionMode::default(),
            endpoint: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            outbox_path: None,
        }
    }
}

impl FileSubmissionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Configured endpoint, ignoring blank values.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Outbox file location.
    ///
    /// Falls back to `<data dir>/quote-wizard/outbox.jsonl`, or the current
    /// directory when the platform has no data dir.
    pub fn outbox_path(&self) -> PathBuf {
        match &self.outbox_path {
            Some(path) => expand_home(path),
            None => dirs::data_dir()
                .map(|d| d.join("quote-wizard").join(OUTBOX_FILE))
                .unwrap_or_else(|| PathBuf::from(OUTBOX_FILE)),
        }
    }
}
