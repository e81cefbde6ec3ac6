//! The multi-step quote request wizard.
//!
//! - [`step::Step`]: the four ordered screens
//! - [`answers::WizardAnswers`]: input accumulated across steps
//! - [`state::WizardState`]: the step-gating state machine

pub mod answers;
pub mod state;
pub mod step;
