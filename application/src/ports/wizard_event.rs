//! Wizard events and snapshots emitted by `QuoteWizard` for the host UI
//!
//! Every state mutation publishes a [`WizardEvent`]; the host re-renders from
//! a [`WizardSnapshot`]. This keeps the wizard free of any rendering framework.

use quote_domain::{AnswerField, Step, WizardAnswers, WizardState};
use serde::Serialize;
use std::time::Duration;

/// Why the wizard returned to its initial state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    /// Scheduled reset after a successful submission
    AfterSubmit,
    /// Explicit reset requested by the host
    Manual,
}

/// Events emitted by QuoteWizard for the presentation layer to render
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// A text field was overwritten
    FieldChanged { field: AnswerField, value: String },
    /// A feature was added to or removed from the selection
    FeatureToggled { feature: String, selected: bool },
    /// The current step changed through advance or retreat
    StepChanged { from: Step, to: Step },
    /// The answers were finalized; a reset is scheduled after `reset_in`
    Submitted {
        answers: WizardAnswers,
        reset_in: Duration,
    },
    /// The wizard returned to step 1 with empty answers
    Reset { reason: ResetReason },
}

impl WizardEvent {
    /// Stable identifier used in structured logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            WizardEvent::FieldChanged { .. } => "field_changed",
            WizardEvent::FeatureToggled { .. } => "feature_toggled",
            WizardEvent::StepChanged { .. } => "step_changed",
            WizardEvent::Submitted { .. } => "submitted",
            WizardEvent::Reset { .. } => "reset",
        }
    }
}

/// Read-only view of the wizard used for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub current_step: Step,
    pub answers: WizardAnswers,
    pub submitted: bool,
    /// Validity of steps 1..=4, index 0 is step 1
    pub step_validity: [bool; 4],
}

impl WizardSnapshot {
    pub fn of(state: &WizardState) -> Self {
        Self {
            current_step: state.current_step(),
            answers: state.answers().clone(),
            submitted: state.is_submitted(),
            step_validity: Step::ALL.map(|step| state.is_step_valid(step.number())),
        }
    }

    pub fn is_step_valid(&self, step: Step) -> bool {
        self.step_validity[usize::from(step.number() - 1)]
    }

    /// Whether the host should enable its "next" control.
    pub fn can_advance(&self) -> bool {
        !self.current_step.is_last() && self.is_step_valid(self.current_step)
    }

    /// Whether the host should enable its "submit" control.
    pub fn can_submit(&self) -> bool {
        self.current_step.is_last() && self.is_step_valid(self.current_step) && !self.submitted
    }
}
