//! Wizard parameters: use case timing control.
//!
//! [`WizardParams`] groups the static parameters that control
//! [`QuoteWizard`](crate::use_cases::quote_wizard::QuoteWizard) side effects.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between a successful submission and the automatic reset.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(3);

/// Wizard timing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardParams {
    /// How long the "thank you" state lasts before the wizard returns to step 1.
    pub reset_delay: Duration,
}

impl Default for WizardParams {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl WizardParams {
    // ==================== Builder Methods ====================

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn with_reset_delay_ms(self, millis: u64) -> Self {
        self.with_reset_delay(Duration::from_millis(millis))
    }
}
