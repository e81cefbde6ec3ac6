//! Application layer for quote-wizard
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_RESET_DELAY, WizardParams};
pub use ports::{
    event_log::{EventRecord, NoEventLog, WizardEventLog},
    lead_gateway::{GatewayError, LeadGateway, LeadKind, SubmissionReceipt},
    progress::{NoProgress, ProgressNotifier},
    wizard_event::{ResetReason, WizardEvent, WizardSnapshot},
};
pub use use_cases::quote_wizard::QuoteWizard;
pub use use_cases::send_contact::{ContactFormError, SendContactUseCase};
pub use use_cases::submit_quote::{SubmitQuoteError, SubmitQuoteOutput, SubmitQuoteUseCase};
