//! Configuration file loading for quote-wizard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `QUOTE_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./quote.toml` or `./.quote.toml`
//! 4. Global: `~/.config/quote-wizard/config.toml` (platform config dir)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileCatalogConfig, FileConfig, FileLoggingConfig, FileOutputConfig, FileReplConfig,
    FileSubmissionConfig, FileWizardConfig, expand_home,
};
pub use loader::ConfigLoader;
