//! Progress reporting for lead delivery

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use quote_application::{LeadKind, ProgressNotifier};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during delivery with a spinner
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn display_name(kind: LeadKind) -> &'static str {
        match kind {
            LeadKind::Quote => "Sending quote request",
            LeadKind::Contact => "Sending message",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_send_start(&self, kind: LeadKind, channel: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::display_name(kind));
        pb.set_message(format!("via {}", channel));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_send_complete(&self, _kind: LeadKind, success: bool) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            if success {
                pb.finish_with_message(format!("{}", "done".green()));
            } else {
                pb.abandon_with_message(format!("{}", "failed".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_send_start(&self, kind: LeadKind, channel: &str) {
        println!(
            "{} {} via {}",
            "->".cyan(),
            ProgressReporter::display_name(kind).bold(),
            channel
        );
    }

    fn on_send_complete(&self, _kind: LeadKind, success: bool) {
        if success {
            println!("  {} delivered", "v".green());
        } else {
            println!("  {} failed", "x".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_send_start(LeadKind::Quote, "outbox");
        assert!(reporter.spinner.lock().unwrap().is_some());
        reporter.on_send_complete(LeadKind::Quote, true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_complete_without_start_is_noop() {
        let reporter = ProgressReporter::new();
        reporter.on_send_complete(LeadKind::Contact, false);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
