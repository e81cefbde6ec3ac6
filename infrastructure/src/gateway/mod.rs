//! Lead gateway adapters
//!
//! Implementations of the [`LeadGateway`](quote_application::LeadGateway)
//! port:
//!
//! | Adapter | Channel | Delivery |
//! |---------|---------|----------|
//! | [`OutboxLeadGateway`] | `outbox` | Appends a JSON line per lead to a local file |
//! | `HttpLeadGateway` | `http` | POSTs JSON to a configured endpoint (feature `http`) |

#[cfg(feature = "http")]
mod http;
mod outbox;

#[cfg(feature = "http")]
pub use http::HttpLeadGateway;
pub use outbox::OutboxLeadGateway;

use quote_application::LeadKind;
use serde::Serialize;
use serde_json::Value;

/// Flatten a lead into a single JSON object tagged with its kind.
pub(crate) fn lead_body(kind: LeadKind, lead: &impl Serialize) -> Result<Value, serde_json::Error> {
    let mut body = serde_json::to_value(lead)?;
    if let Value::Object(map) = &mut body {
        map.insert("kind".to_string(), Value::String(kind.as_str().to_string()));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_domain::{AnswerField, WizardAnswers};

    #[test]
    fn test_lead_body_is_tagged_camel_case() {
        let mut answers = WizardAnswers::default();
        answers.set(AnswerField::ServiceType, "web");
        answers.toggle_feature("Blog");

        let body = lead_body(LeadKind::Quote, &answers).unwrap();
        assert_eq!(body["kind"], "quote");
        assert_eq!(body["serviceType"], "web");
        assert_eq!(body["features"][0], "Blog");
    }
}
