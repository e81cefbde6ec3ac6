//! Logging infrastructure: structured wizard event logging.
//!
//! Provides [`JsonlEventLog`], a JSONL file writer that implements
//! the [`WizardEventLog`](quote_application::WizardEventLog) port.

mod jsonl_logger;

pub(crate) use jsonl_logger::stamp;
pub use jsonl_logger::JsonlEventLog;
