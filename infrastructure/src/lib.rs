//! Infrastructure layer for quote-wizard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod gateway;
pub mod logging;

// Re-export commonly used types
pub use catalog::{CatalogError, CatalogLoader};
pub use config::{
    ConfigLoader, FileCatalogConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, FileSubmissionConfig, FileWizardConfig,
};
#[cfg(feature = "http")]
pub use gateway::HttpLeadGateway;
pub use gateway::OutboxLeadGateway;
pub use logging::JsonlEventLog;
