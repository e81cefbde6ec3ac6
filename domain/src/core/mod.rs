//! Core domain concepts shared across all subdomains.
//!
//! - [`error::WizardError`]: wizard transition failures
//! - [`error::UnknownFieldError`]: host-side field name parse failures

pub mod error;
