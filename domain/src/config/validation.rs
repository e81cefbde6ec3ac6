//! Configuration validation issues.
//!
//! Config loaders report problems as a list of [`ConfigIssue`]s instead of
//! failing on the first one, so the host can print every issue and decide
//! whether to continue based on [`Severity`].

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// HTTP submission selected but no endpoint configured.
    MissingEndpoint,
    /// HTTP submission selected but the binary was built without HTTP support.
    HttpUnavailable,
    /// A reset delay of zero makes the confirmation disappear immediately.
    ZeroResetDelay,
    /// Configured catalog file does not exist.
    CatalogNotFound,
    /// Submission timeout of zero seconds.
    ZeroTimeout,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_errors() {
        let warning = ConfigIssue::warning(ConfigIssueCode::ZeroResetDelay, "zero delay");
        assert!(!ConfigIssue::has_errors(std::slice::from_ref(&warning)));

        let error = ConfigIssue::error(ConfigIssueCode::MissingEndpoint, "no endpoint");
        assert!(ConfigIssue::has_errors(&[warning, error]));
    }
}
