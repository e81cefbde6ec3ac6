//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod catalog;
mod logging;
mod output;
mod repl;
mod submission;
mod wizard;

pub use catalog::FileCatalogConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use submission::FileSubmissionConfig;
pub use wizard::FileWizardConfig;

use quote_domain::{ConfigIssue, ConfigIssueCode, SubmissionMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Wizard timing
    pub wizard: FileWizardConfig,
    /// Lead delivery settings
    pub submission: FileSubmissionConfig,
    /// Quote options source
    pub catalog: FileCatalogConfig,
    /// Diagnostic and event log destinations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. HTTP submission has an endpoint and is compiled in
    /// 2. Submission timeout is non-zero
    /// 3. A configured catalog file exists
    /// 4. Reset delay is non-zero
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. HTTP submission
        if self.submission.mode == SubmissionMode::Http {
            if self.submission.endpoint().is_none() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingEndpoint,
                    "submission.mode is \"http\" but submission.endpoint is not set",
                ));
            }
            if !cfg!(feature = "http") {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::HttpUnavailable,
                    "submission.mode is \"http\" but this build has no HTTP support",
                ));
            }
        }

        // 2. Timeout
        if self.submission.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "submission.timeout_seconds cannot be 0",
            ));
        }

        // 3. Catalog file
        if let Some(path) = self.catalog.path()
            && !path.exists()
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::CatalogNotFound,
                format!("catalog.path: {} does not exist", path.display()),
            ));
        }

        // 4. Reset delay
        if self.wizard.reset_delay_ms == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroResetDelay,
                "wizard.reset_delay_ms is 0; the confirmation will not be visible",
            ));
        }

        issues
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_domain::{OutputFormat, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[wizard]
reset_delay_ms = 5000

[submission]
mode = "outbox"
outbox_path = "/tmp/leads.jsonl"

[catalog]
path = "options.json"

[logging]
event_log = "/tmp/events.jsonl"
log_dir = "/tmp/logs"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/quote-wizard/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.wizard.reset_delay_ms, 5000);
        assert_eq!(config.submission.mode, SubmissionMode::Outbox);
        assert_eq!(
            config.submission.outbox_path(),
            PathBuf::from("/tmp/leads.jsonl")
        );
        assert_eq!(config.catalog.path(), Some(PathBuf::from("options.json")));
        assert_eq!(
            config.logging.event_log(),
            Some(PathBuf::from("/tmp/events.jsonl"))
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[submission]
timeout_seconds = 30
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.submission.timeout_seconds, 30);
        // Defaults should apply
        assert_eq!(config.submission.mode, SubmissionMode::Outbox);
        assert_eq!(config.wizard.reset_delay_ms, 3000);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_http_without_endpoint() {
        let mut config = FileConfig::default();
        config.submission.mode = SubmissionMode::Http;

        let issues = config.validate();
        assert!(ConfigIssue::has_errors(&issues));
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::MissingEndpoint)
        );
    }

    #[test]
    fn test_validate_zero_values() {
        let mut config = FileConfig::default();
        config.wizard.reset_delay_ms = 0;

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].code, ConfigIssueCode::ZeroResetDelay);

        config.submission.timeout_seconds = 0;
        assert!(ConfigIssue::has_errors(&config.validate()));
    }

    #[test]
    fn test_validate_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FileConfig::default();
        config.catalog.path = Some(dir.path().join("nope.json").display().to_string());

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::CatalogNotFound);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("rel/path"), PathBuf::from("rel/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.txt"), home.join("x.txt"));
        }
    }
}
