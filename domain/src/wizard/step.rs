//! Wizard step value object

use serde::{Deserialize, Serialize};

/// One of the four sequential screens of the quote wizard.
///
/// Steps are strictly ordered: `Service -> ProjectDetails -> Timeline -> Contact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Step 1: which service is needed
    Service,
    /// Step 2: project type and budget
    ProjectDetails,
    /// Step 3: timeline and optional features
    Timeline,
    /// Step 4: contact information
    Contact,
}

impl Step {
    /// All steps in wizard order.
    pub const ALL: [Step; 4] = [
        Step::Service,
        Step::ProjectDetails,
        Step::Timeline,
        Step::Contact,
    ];

    pub const FIRST: Step = Step::Service;
    pub const LAST: Step = Step::Contact;

    /// 1-based step number as shown to the user.
    pub fn number(self) -> u8 {
        match self {
            Step::Service => 1,
            Step::ProjectDetails => 2,
            Step::Timeline => 3,
            Step::Contact => 4,
        }
    }

    /// Resolve a 1-based step number. Returns `None` outside `1..=4`.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Step::Service),
            2 => Some(Step::ProjectDetails),
            3 => Some(Step::Timeline),
            4 => Some(Step::Contact),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Short label used in the progress header.
    pub fn label(self) -> &'static str {
        match self {
            Step::Service => "Service",
            Step::ProjectDetails => "Project Details",
            Step::Timeline => "Timeline",
            Step::Contact => "Contact Info",
        }
    }

    /// Prompt shown above the step's inputs.
    pub fn title(self) -> &'static str {
        match self {
            Step::Service => "Which service do you need?",
            Step::ProjectDetails => "Tell us more about your project",
            Step::Timeline => "When do you need it and what features?",
            Step::Contact => "How can we reach you?",
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_roundtrip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(5), None);
    }

    #[test]
    fn test_next_and_previous() {
        assert_eq!(Step::Service.next(), Some(Step::ProjectDetails));
        assert_eq!(Step::Contact.next(), None);
        assert_eq!(Step::Service.previous(), None);
        assert_eq!(Step::Timeline.previous(), Some(Step::ProjectDetails));
    }

    #[test]
    fn test_default_is_first() {
        assert!(Step::default().is_first());
        assert!(Step::LAST.is_last());
    }
}
