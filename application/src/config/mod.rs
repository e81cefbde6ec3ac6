//! Application-level configuration.
//!
//! [`WizardParams`] carries wizard behaviour that is not domain policy, such
//! as the delay before the post-submission reset.

pub mod wizard_params;

pub use wizard_params::{DEFAULT_RESET_DELAY, WizardParams};
