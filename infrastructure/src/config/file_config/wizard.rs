//! Wizard configuration from TOML (`[wizard]` section)

use quote_application::{DEFAULT_RESET_DELAY, WizardParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw wizard configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWizardConfig {
    /// Milliseconds between a successful submission and the automatic reset
    pub reset_delay_ms: u64,
}

impl Default for FileWizardConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: u64::try_from(DEFAULT_RESET_DELAY.as_millis()).unwrap_or(3000),
        }
    }
}

impl FileWizardConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn to_params(&self) -> WizardParams {
        WizardParams::default().with_reset_delay(self.reset_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_application_default() {
        let config = FileWizardConfig::default();
        assert_eq!(config.reset_delay_ms, 3000);
        assert_eq!(config.to_params(), WizardParams::default());
    }

    #[test]
    fn test_reset_delay_deserialize() {
        let toml_str = r#"
[wizard]
reset_delay_ms = 1500
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.wizard.reset_delay(), Duration::from_millis(1500));
    }
}
