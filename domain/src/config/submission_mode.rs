//! Submission mode value object

use serde::{Deserialize, Serialize};

/// Where finished quotes and contact requests are sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    /// Append to a local JSONL outbox file (default)
    #[default]
    Outbox,
    /// POST as JSON to an HTTP endpoint
    Http,
}

impl SubmissionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionMode::Outbox => "outbox",
            SubmissionMode::Http => "http",
        }
    }
}

impl std::fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_outbox() {
        assert_eq!(SubmissionMode::default(), SubmissionMode::Outbox);
    }

    #[test]
    fn test_deserialize_lowercase() {
        let mode: SubmissionMode = serde_json::from_str("\"http\"").unwrap();
        assert_eq!(mode, SubmissionMode::Http);
    }
}
