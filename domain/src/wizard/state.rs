//! Quote wizard state machine.
//!
//! [`WizardState`] enforces a strict linear four-step progression and gates
//! advancement on per-step completeness. It is a plain value: scheduling the
//! post-submission reset is the owner's job (see the application layer's
//! `QuoteWizard`), this type only provides [`WizardState::reset`].
//!
//! # State Transitions
//!
//! ```text
//! Service ──advance──> ProjectDetails ──advance──> Timeline ──advance──> Contact
//!    ^ <────retreat─────────  <────retreat──────────  <────retreat────────  │
//!    │                                                                    submit
//!    └──────────────────────────── reset ───────────── Submitted <──────────┘
//! ```

use crate::core::error::WizardError;
use crate::wizard::answers::{AnswerField, WizardAnswers};
use crate::wizard::step::Step;
use serde::{Deserialize, Serialize};

/// Whether the answers satisfy the required fields of step `number`.
///
/// Pure function of `answers`; each step is judged independently. Only
/// presence is checked, never format. Numbers outside `1..=4` are invalid.
pub fn is_step_valid(answers: &WizardAnswers, number: u8) -> bool {
    match Step::from_number(number) {
        Some(step) => step_complete(answers, step),
        None => false,
    }
}

/// Required fields of each step.
pub fn required_fields(step: Step) -> &'static [AnswerField] {
    match step {
        Step::Service => &[AnswerField::ServiceType],
        Step::ProjectDetails => &[AnswerField::ProjectType, AnswerField::Budget],
        Step::Timeline => &[AnswerField::Timeline],
        Step::Contact => &[AnswerField::Name, AnswerField::Email],
    }
}

/// Required fields of `step` that are still empty.
pub fn missing_fields(answers: &WizardAnswers, step: Step) -> Vec<AnswerField> {
    required_fields(step)
        .iter()
        .copied()
        .filter(|field| answers.get(*field).is_empty())
        .collect()
}

fn step_complete(answers: &WizardAnswers, step: Step) -> bool {
    required_fields(step)
        .iter()
        .all(|field| !answers.get(*field).is_empty())
}

/// Current step, accumulated answers and the submitted flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    current_step: Step,
    answers: WizardAnswers,
    submitted: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn answers(&self) -> &WizardAnswers {
        &self.answers
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    // ==================== Edits ====================

    /// Overwrite a text field unconditionally.
    pub fn set_field(&mut self, field: AnswerField, value: impl Into<String>) {
        self.answers.set(field, value);
    }

    /// Toggle a feature in the multi-select. Returns whether it is now selected.
    pub fn toggle_feature(&mut self, feature: impl AsRef<str>) -> bool {
        self.answers.toggle_feature(feature)
    }

    // ==================== Validation ====================

    /// See [`is_step_valid`]. Does not depend on the current step.
    pub fn is_step_valid(&self, number: u8) -> bool {
        is_step_valid(&self.answers, number)
    }

    pub fn is_current_step_valid(&self) -> bool {
        step_complete(&self.answers, self.current_step)
    }

    // ==================== Navigation ====================

    /// Move to the next step if the current one is complete.
    ///
    /// Returns the new step.
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        let Some(next) = self.current_step.next() else {
            return Err(WizardError::AtFinalStep);
        };
        if !self.is_current_step_valid() {
            return Err(WizardError::StepIncomplete {
                step: self.current_step,
            });
        }
        self.current_step = next;
        Ok(next)
    }

    /// Move to the previous step. No validity check is needed going back.
    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        let previous = self.current_step.previous().ok_or(WizardError::AtFirstStep)?;
        self.current_step = previous;
        Ok(previous)
    }

    /// Finalize the answers from the last step.
    ///
    /// Marks the state as submitted and returns a snapshot of the answers.
    /// The answers themselves stay in place until [`WizardState::reset`].
    pub fn submit(&mut self) -> Result<WizardAnswers, WizardError> {
        if !self.current_step.is_last() {
            return Err(WizardError::WrongStep {
                current: self.current_step,
            });
        }
        if !self.is_current_step_valid() {
            return Err(WizardError::StepIncomplete {
                step: self.current_step,
            });
        }
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        self.submitted = true;
        Ok(self.answers.clone())
    }

    /// Return to the initial state: step 1, default answers, not submitted.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
