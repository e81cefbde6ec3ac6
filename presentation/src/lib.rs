//! Presentation layer for quote-wizard
//!
//! This crate contains CLI definitions, output formatters, progress
//! reporters, the interactive quote REPL and the contact form prompt.

pub mod cli;
pub mod config;
pub mod contact;
pub mod input;
pub mod output;
pub mod progress;
pub mod wizard;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use contact::prompt::{ContactOutcome, ContactPrompt};
pub use input::{Input, LineSource, ReedlineSource, ScriptedInput};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use wizard::repl::WizardRepl;
