//! Prompted entry of the contact form
//!
//! Asks for every field once, then re-asks only the fields that failed
//! validation, showing their messages, until the form is delivered or the
//! user gives up.

use crate::input::{Input, LineSource};
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use quote_application::{
    ContactFormError, NoProgress, ProgressNotifier, SendContactUseCase, SubmissionReceipt,
};
use quote_domain::{ContactErrors, ContactField, ContactForm};
use std::io;

/// How a prompt session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent(SubmissionReceipt),
    Cancelled,
}

/// Interactive contact form
pub struct ContactPrompt {
    use_case: SendContactUseCase,
    form: ContactForm,
    errors: ContactErrors,
    show_progress: bool,
}

impl ContactPrompt {
    pub fn new(use_case: SendContactUseCase) -> Self {
        Self {
            use_case,
            form: ContactForm::new(),
            errors: ContactErrors::default(),
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Messages from the last validation, minus fields edited since.
    pub fn errors(&self) -> &ContactErrors {
        &self.errors
    }

    /// Run until the form is delivered or input ends
    pub async fn run(&mut self, input: &mut dyn LineSource) -> io::Result<ContactOutcome> {
        println!();
        println!("{}", "Get in touch".cyan().bold());
        println!(
            "{}",
            "Fields marked * are required. Ctrl-D cancels.".dimmed()
        );

        let mut pending: Vec<ContactField> = ContactField::ALL.to_vec();

        loop {
            for field in pending {
                if !self.ask(input, field)? {
                    println!("Cancelled.");
                    return Ok(ContactOutcome::Cancelled);
                }
            }

            let reporter;
            let progress: &dyn ProgressNotifier = if self.show_progress {
                reporter = ProgressReporter::new();
                &reporter
            } else {
                &NoProgress
            };

            match self.use_case.execute_with_progress(&mut self.form, progress).await {
                Ok(receipt) => {
                    println!(
                        "{} {}",
                        "Message sent successfully!".green().bold(),
                        format!("(ref {} via {})", receipt.reference, receipt.channel).dimmed()
                    );
                    return Ok(ContactOutcome::Sent(receipt));
                }
                Err(ContactFormError::Invalid(errors)) => {
                    println!("{}", ConsoleFormatter::format_contact_errors(&errors));
                    pending = errors.iter().map(|(field, _)| field).collect();
                    self.errors = errors;
                }
                Err(ContactFormError::Gateway(e)) => {
                    eprintln!("{} {}", "Could not send your message:".red().bold(), e);
                    match input.read_line("retry? [Y/n]")? {
                        Input::Line(answer) if !answer.trim().eq_ignore_ascii_case("n") => {
                            pending = Vec::new();
                        }
                        _ => {
                            println!("Cancelled.");
                            return Ok(ContactOutcome::Cancelled);
                        }
                    }
                }
            }
        }
    }

    /// Ask for one field. Returns false when the user cancels.
    ///
    /// An empty answer keeps the current value when re-asking.
    fn ask(&mut self, input: &mut dyn LineSource, field: ContactField) -> io::Result<bool> {
        let current = self.form.get(field).to_string();
        let mut label = ConsoleFormatter::contact_prompt(field);
        if !current.is_empty() {
            label = format!("{} [{}]", label, current);
        }

        loop {
            match input.read_line(&label)? {
                Input::Line(value) => {
                    let value = value.trim();
                    if !value.is_empty() || current.is_empty() {
                        self.form.set(field, value);
                    }
                    // Editing a field clears its message
                    self.errors.clear(field);
                    return Ok(true);
                }
                Input::Interrupted => continue,
                Input::Eof => return Ok(false),
            }
        }
    }
}
