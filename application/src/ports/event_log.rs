//! Port for structured wizard event logging.
//!
//! Defines the [`WizardEventLog`] trait for recording wizard and lead events
//! (field edits, step changes, submissions, resets, contact requests) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable record (JSONL).

use crate::ports::wizard_event::WizardEvent;
use serde_json::{Value, json};

/// A structured event for logging.
pub struct EventRecord {
    /// Event type identifier (e.g., "step_changed", "submitted", "contact_sent").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl EventRecord {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

impl From<&WizardEvent> for EventRecord {
    fn from(event: &WizardEvent) -> Self {
        let payload = match event {
            WizardEvent::FieldChanged { field, value } => json!({
                "field": field.as_str(),
                "value": value,
            }),
            WizardEvent::FeatureToggled { feature, selected } => json!({
                "feature": feature,
                "selected": selected,
            }),
            WizardEvent::StepChanged { from, to } => json!({
                "from": from.number(),
                "to": to.number(),
            }),
            WizardEvent::Submitted { answers, reset_in } => json!({
                "answers": answers,
                "reset_in_ms": u64::try_from(reset_in.as_millis()).unwrap_or(u64::MAX),
            }),
            WizardEvent::Reset { reason } => json!({ "reason": reason }),
        };
        Self::new(event.event_type(), payload)
    }
}

/// Port for logging events to a structured log.
///
/// The `log` method is synchronous and non-fallible so it never disrupts a
/// wizard operation; implementations swallow their own write failures.
pub trait WizardEventLog: Send + Sync {
    /// Record an event.
    fn log(&self, event: EventRecord);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLog;

impl WizardEventLog for NoEventLog {
    fn log(&self, _event: EventRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_domain::{AnswerField, Step};

    #[test]
    fn test_step_changed_record() {
        let record = EventRecord::from(&WizardEvent::StepChanged {
            from: Step::Service,
            to: Step::ProjectDetails,
        });
        assert_eq!(record.event_type, "step_changed");
        assert_eq!(record.payload["from"], 1);
        assert_eq!(record.payload["to"], 2);
    }

    #[test]
    fn test_field_changed_record_uses_camel_case_name() {
        let record = EventRecord::from(&WizardEvent::FieldChanged {
            field: AnswerField::ServiceType,
            value: "web".into(),
        });
        assert_eq!(record.payload["field"], "serviceType");
    }
}
