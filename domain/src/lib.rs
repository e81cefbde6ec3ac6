//! Domain layer for quote-wizard
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Quote Wizard
//!
//! A four-step form (service, project details, timeline and features,
//! contact info). Advancing is gated on the current step's required fields;
//! going back never is. Only presence is checked, never format.
//!
//! ## Contact Form
//!
//! A single-step form that, unlike the wizard, validates email and phone
//! shape.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod core;
pub mod wizard;

// Re-export commonly used types
pub use catalog::{BudgetOption, Choice, ProjectTypeOption, QuoteOptions, ServiceOption, TimelineOption};
pub use config::{
    OutputFormat, SubmissionMode,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use contact::{ContactErrors, ContactField, ContactForm};
pub use core::error::{UnknownFieldError, WizardError};
pub use wizard::{
    answers::{AnswerField, WizardAnswers},
    state::{WizardState, is_step_valid, missing_fields, required_fields},
    step::Step,
};
