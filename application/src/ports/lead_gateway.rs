//! Lead gateway port
//!
//! Defines the interface for handing finished quote requests and contact
//! requests to whatever delivers them (HTTP endpoint, local outbox, ...).

use async_trait::async_trait;
use quote_domain::{ContactForm, WizardAnswers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while delivering a lead
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request rejected with status {status}")]
    Rejected { status: u16 },

    #[error("Timeout")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Transport(_) | GatewayError::Timeout => true,
            GatewayError::Rejected { status } => *status >= 500,
            _ => false,
        }
    }
}

/// What kind of lead is being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadKind {
    Quote,
    Contact,
}

impl LeadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadKind::Quote => "quote",
            LeadKind::Contact => "contact",
        }
    }
}

impl std::fmt::Display for LeadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof of delivery returned by a gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Gateway-specific reference (record id, line number, ...)
    pub reference: String,
    /// Which channel delivered the lead (e.g. "http", "outbox")
    pub channel: String,
}

impl SubmissionReceipt {
    pub fn new(reference: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            channel: channel.into(),
        }
    }
}

/// Gateway for lead delivery
///
/// This port defines how the application layer hands leads to the outside
/// world. Implementations (adapters) live in the infrastructure layer and own
/// transmission, retries and error surfacing.
#[async_trait]
pub trait LeadGateway: Send + Sync {
    /// Channel name reported in receipts and progress output
    fn channel(&self) -> &'static str;

    /// Deliver a finished quote request
    async fn send_quote(&self, answers: &WizardAnswers) -> Result<SubmissionReceipt, GatewayError>;

    /// Deliver a contact request
    async fn send_contact(&self, form: &ContactForm) -> Result<SubmissionReceipt, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(GatewayError::Timeout.is_transient());
        assert!(GatewayError::Rejected { status: 503 }.is_transient());
        assert!(!GatewayError::Rejected { status: 422 }.is_transient());
        assert!(!GatewayError::Unavailable("offline".into()).is_transient());
    }
}
