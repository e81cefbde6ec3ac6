//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod quote_wizard;
pub mod send_contact;
pub mod submit_quote;
