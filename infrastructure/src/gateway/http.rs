//! HTTP lead gateway
//!
//! POSTs each lead as a JSON object to a configured endpoint. Any 2xx
//! response counts as delivered; the receipt reference is the `id` field of
//! the response body when present, otherwise the status code.

use super::lead_body;
use async_trait::async_trait;
use quote_application::{GatewayError, LeadGateway, LeadKind, SubmissionReceipt};
use quote_domain::{ContactForm, WizardAnswers};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const CHANNEL: &str = "http";
const USER_AGENT: &str = concat!("quote-wizard/", env!("CARGO_PKG_VERSION"));

/// Gateway that delivers leads over HTTP
pub struct HttpLeadGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLeadGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        let endpoint = endpoint.into();
        info!(endpoint = %endpoint, "HttpLeadGateway initialized");
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, kind: LeadKind, lead: &impl Serialize) -> Result<SubmissionReceipt, GatewayError> {
        let body = lead_body(kind, lead)?;
        debug!(kind = %kind, endpoint = %self.endpoint, "Posting lead");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
            });
        }

        // The body is informational; a 2xx without JSON is still delivered
        let reference = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|value| reference_from(&value))
            .unwrap_or_else(|| status.as_u16().to_string());

        Ok(SubmissionReceipt::new(reference, CHANNEL))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(e.to_string())
    }
}

/// Extract an `id` from a response body, accepting strings and numbers.
fn reference_from(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl LeadGateway for HttpLeadGateway {
    fn channel(&self) -> &'static str {
        CHANNEL
    }

    async fn send_quote(&self, answers: &WizardAnswers) -> Result<SubmissionReceipt, GatewayError> {
        self.post(LeadKind::Quote, answers).await
    }

    async fn send_contact(&self, form: &ContactForm) -> Result<SubmissionReceipt, GatewayError> {
        self.post(LeadKind::Contact, form).await
    }
}
