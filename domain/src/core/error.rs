//! Domain error types

use crate::wizard::step::Step;
use thiserror::Error;

/// Failures of wizard transitions.
///
/// All of these are recoverable: the wizard state is unchanged when one is
/// returned. The host UI normally disables the matching control, so seeing
/// one usually means programmatic misuse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardError {
    #[error("Step {} ({}) is incomplete", .step.number(), .step.label())]
    StepIncomplete { step: Step },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Already at the final step; submit instead")]
    AtFinalStep,

    #[error("Submit is only possible from the final step (currently on step {})", .current.number())]
    WrongStep { current: Step },

    #[error("Quote already submitted; waiting for reset")]
    AlreadySubmitted,
}

impl WizardError {
    /// Whether the error is a boundary misuse rather than missing input.
    pub fn is_boundary(&self) -> bool {
        !matches!(self, WizardError::StepIncomplete { .. })
    }
}

/// A field name that does not name any wizard or contact form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field: {0}")]
pub struct UnknownFieldError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_incomplete_display() {
        let error = WizardError::StepIncomplete {
            step: Step::ProjectDetails,
        };
        assert_eq!(error.to_string(), "Step 2 (Project Details) is incomplete");
    }

    #[test]
    fn test_wrong_step_display() {
        let error = WizardError::WrongStep {
            current: Step::Timeline,
        };
        assert!(error.to_string().contains("step 3"));
    }

    #[test]
    fn test_is_boundary() {
        assert!(WizardError::AtFirstStep.is_boundary());
        assert!(WizardError::AtFinalStep.is_boundary());
        assert!(
            !WizardError::StepIncomplete {
                step: Step::Service
            }
            .is_boundary()
        );
    }
}
