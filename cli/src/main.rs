//! CLI entrypoint for quote-wizard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use quote_application::{
    LeadGateway, NoEventLog, NoProgress, ProgressNotifier, QuoteWizard, SendContactUseCase,
    SubmitQuoteError, SubmitQuoteUseCase, WizardEventLog,
};
use quote_domain::{ConfigIssue, QuoteOptions, Severity, SubmissionMode, WizardAnswers};
use quote_infrastructure::config::expand_home;
use quote_infrastructure::{CatalogLoader, ConfigLoader, FileConfig, JsonlEventLog, OutboxLeadGateway};
use quote_presentation::{
    Cli, Command, ContactOutcome, ContactPrompt, ConsoleFormatter, OutputConfig, ProgressReporter,
    ReedlineSource, ReplConfig, SimpleProgress, WizardRepl,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("failed to load configuration: {e}"))?
    };

    let _log_guard = init_tracing(cli.verbose, config.logging.log_dir().as_deref());

    info!("Starting quote-wizard");

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("config: {}", issue.message),
            Severity::Error => eprintln!("config error: {}", issue.message),
        }
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("invalid configuration");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let catalog_path = cli.catalog.clone().or_else(|| config.catalog.path());
    let options = CatalogLoader::load(catalog_path.as_deref())?;

    // === Dependency Injection ===
    let gateway = build_gateway(&config)?;
    info!("Delivering leads via {}", gateway.channel());

    let event_log: Arc<dyn WizardEventLog> = match config.logging.event_log() {
        Some(path) => match JsonlEventLog::new(&path) {
            Some(log) => Arc::new(log),
            None => Arc::new(NoEventLog),
        },
        None => Arc::new(NoEventLog),
    };

    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
    };
    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress,
        history_file: config.repl.history_file.as_deref().map(expand_home),
    };
    let show_progress = !cli.quiet && repl_config.show_progress;
    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    match cli.command() {
        Command::Options => {
            println!("{}", ConsoleFormatter::format_options(&options));
        }
        Command::Quote {
            answers: Some(path),
        } => {
            let wizard =
                QuoteWizard::new(config.wizard.to_params()).with_event_log(event_log.clone());
            let use_case = SubmitQuoteUseCase::new(gateway).with_event_log(event_log);
            run_scripted(wizard, use_case, &path, &options, &output, progress.as_ref()).await?;
        }
        Command::Quote { answers: None } => {
            let wizard =
                QuoteWizard::new(config.wizard.to_params()).with_event_log(event_log.clone());
            let use_case = SubmitQuoteUseCase::new(gateway).with_event_log(event_log);
            let mut input = match repl_config.history_path() {
                Some(path) => ReedlineSource::with_history(&path),
                None => ReedlineSource::new(),
            };
            let mut repl = WizardRepl::new(wizard, use_case, options)
                .with_output(output)
                .with_progress(show_progress);
            repl.run(&mut input).await?;
        }
        Command::Contact => {
            let use_case = SendContactUseCase::new(gateway).with_event_log(event_log);
            let mut input = ReedlineSource::new();
            let mut prompt = ContactPrompt::new(use_case).with_progress(show_progress);
            match prompt.run(&mut input).await? {
                ContactOutcome::Sent(receipt) => {
                    println!("{}", ConsoleFormatter::format_receipt(&receipt));
                }
                ContactOutcome::Cancelled => bail!("contact request not sent"),
            }
        }
    }

    Ok(())
}

/// Install the stderr subscriber, plus a daily log file when `log_dir` is set.
///
/// `RUST_LOG` takes precedence over `-v` flags. The returned guard must be
/// held until exit so buffered file output is flushed.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "quote-wizard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn build_gateway(config: &FileConfig) -> Result<Arc<dyn LeadGateway>> {
    match config.submission.mode {
        SubmissionMode::Outbox => {
            let path = config.submission.outbox_path();
            let gateway = OutboxLeadGateway::open(&path)
                .with_context(|| format!("cannot open outbox {}", path.display()))?;
            Ok(Arc::new(gateway))
        }
        #[cfg(feature = "http")]
        SubmissionMode::Http => {
            let endpoint = config
                .submission
                .endpoint()
                .context("submission.endpoint is not set")?;
            let gateway =
                quote_infrastructure::HttpLeadGateway::new(endpoint, config.submission.timeout())?;
            Ok(Arc::new(gateway))
        }
        #[cfg(not(feature = "http"))]
        SubmissionMode::Http => bail!("this build has no HTTP support"),
    }
}

/// Submit answers read from a JSON file without prompting.
async fn run_scripted(
    mut wizard: QuoteWizard,
    use_case: SubmitQuoteUseCase,
    path: &Path,
    options: &QuoteOptions,
    output: &OutputConfig,
    progress: &dyn ProgressNotifier,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read answers file {}", path.display()))?;
    let answers: WizardAnswers = serde_json::from_str(&raw)
        .with_context(|| format!("invalid answers file {}", path.display()))?;

    match use_case.execute_scripted(&mut wizard, &answers, progress).await {
        Ok(result) => {
            println!(
                "{}",
                ConsoleFormatter::format(&result.answers, options, output.format)
            );
            println!("{}", ConsoleFormatter::format_receipt(&result.receipt));
            Ok(())
        }
        Err(SubmitQuoteError::Wizard(e)) => {
            eprintln!("{}", ConsoleFormatter::format_wizard_error(&e, &wizard.answers()));
            bail!("quote request not submitted");
        }
        Err(SubmitQuoteError::Gateway { source, answers }) => {
            eprintln!("{}", ConsoleFormatter::format_delivery_failure(&source, &answers));
            Err(anyhow!(source).context("quote request could not be delivered"))
        }
    }
}
