//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for a submitted quote request
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary with catalog labels
    Summary,
    /// The raw answers as JSON
    Json,
}

impl From<OutputFormat> for quote_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => quote_domain::OutputFormat::Summary,
            OutputFormat::Json => quote_domain::OutputFormat::Json,
        }
    }
}

/// What to run
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fill in the four-step quote request (default)
    Quote {
        /// Submit prepared answers from a JSON file instead of prompting
        #[arg(long, value_name = "PATH")]
        answers: Option<PathBuf>,
    },
    /// Send a single-step contact request
    Contact,
    /// Print the available services, project types, budgets, timelines and features
    Options,
}

impl Default for Command {
    fn default() -> Self {
        Command::Quote { answers: None }
    }
}

/// CLI arguments for quote-wizard
#[derive(Parser, Debug)]
#[command(name = "quote-wizard")]
#[command(author, version, about = "Step-by-step project quote requests from the terminal")]
#[command(long_about = r#"
Quote Wizard walks you through a project quote request in four steps:

1. Service:          what kind of work you need
2. Project details:  project type and budget range
3. Timeline:         when you need it, plus optional features
4. Contact:          your name and email (company, phone and details optional)

Each step must be complete before moving on. After submitting, the wizard
shows a confirmation and starts over a few seconds later.

Configuration files are loaded from (in priority order):
1. QUOTE_* env vars      e.g. QUOTE_SUBMISSION__MODE=http
2. --config <path>       Explicit config file
3. ./quote.toml          Project-level config
4. ~/.config/quote-wizard/config.toml   Global config

Example:
  quote-wizard
  quote-wizard quote --answers answers.json --output json
  quote-wizard contact
  quote-wizard options
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Quote options catalog (JSON); overrides [catalog] path
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// How to print the submitted answers
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The selected command, `quote` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}
