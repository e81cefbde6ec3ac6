//! REPL (Read-Eval-Print Loop) for the quote wizard

use crate::config::OutputConfig;
use crate::input::{Input, LineSource};
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use crate::wizard::command::{HELP, ReplCommand, parse_command, primary_field};
use colored::Colorize;
use quote_application::{
    NoProgress, ProgressNotifier, QuoteWizard, ResetReason, SubmitQuoteError, SubmitQuoteUseCase,
    WizardEvent,
};
use quote_domain::{AnswerField, QuoteOptions};
use std::io;
use tokio::sync::mpsc;
use tracing::debug;

/// Result of handling one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandResult {
    Continue,
    Exit,
}

/// Interactive quote wizard REPL
pub struct WizardRepl {
    wizard: QuoteWizard,
    events: mpsc::UnboundedReceiver<WizardEvent>,
    submit: SubmitQuoteUseCase,
    options: QuoteOptions,
    output: OutputConfig,
    show_progress: bool,
}

impl WizardRepl {
    /// Create a REPL driving `wizard`; its events are routed to this REPL.
    pub fn new(wizard: QuoteWizard, submit: SubmitQuoteUseCase, options: QuoteOptions) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            wizard: wizard.with_events(tx),
            events,
            submit,
            options,
            output: OutputConfig::default(),
            show_progress: true,
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn wizard(&self) -> &QuoteWizard {
        &self.wizard
    }

    /// Run the interactive REPL until `/quit` or end of input
    pub async fn run(&mut self, input: &mut dyn LineSource) -> io::Result<()> {
        self.print_welcome();
        self.render();

        loop {
            self.drain_events();

            let snapshot = self.wizard.snapshot();
            let prompt = format!("quote {}/4", snapshot.current_step.number());

            match input.read_line(&prompt)? {
                Input::Line(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    match parse_command(line) {
                        Ok(command) => {
                            if self.execute(command).await == CommandResult::Exit {
                                break;
                            }
                        }
                        Err(message) => println!("{}", message),
                    }
                }
                Input::Interrupted => {
                    println!("^C");
                    continue;
                }
                Input::Eof => {
                    println!("Bye!");
                    break;
                }
            }
        }

        self.wizard.dispose();
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "╭─────────────────────────────────────────────╮".cyan());
        println!("{}", "│          Quote Wizard - Get a Quote         │".cyan());
        println!("{}", "╰─────────────────────────────────────────────╯".cyan());
        println!();
        println!("{}", "Four quick steps; type /help for commands.".dimmed());
    }

    fn render(&self) {
        println!();
        print!(
            "{}",
            ConsoleFormatter::step_screen(&self.wizard.snapshot(), &self.options)
        );
    }

    /// Handle events published since the last prompt.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(event = event.event_type(), "Wizard event");
            if let WizardEvent::Reset {
                reason: ResetReason::AfterSubmit,
            } = event
            {
                println!();
                println!("{}", "Starting a new quote request.".cyan());
                self.render();
            }
        }
    }

    /// Edits and navigation wait until the confirmation has been cleared.
    fn refuse_while_submitted(&self) -> bool {
        if self.wizard.is_submitted() {
            println!(
                "{}",
                "Already submitted. The wizard starts over shortly; /reset to start now."
                    .yellow()
            );
            true
        } else {
            false
        }
    }

    async fn execute(&mut self, command: ReplCommand) -> CommandResult {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return CommandResult::Exit;
            }
            ReplCommand::Help => println!("\n{}\n", HELP),
            ReplCommand::Status => self.render(),
            ReplCommand::Options => print!("{}", ConsoleFormatter::format_options(&self.options)),
            ReplCommand::Reset => {
                self.wizard.reset();
                self.render();
            }
            ReplCommand::Submit => self.submit().await,
            _ if self.refuse_while_submitted() => {}
            ReplCommand::Set { field, value } => self.set(field, value),
            ReplCommand::Pick { field, position } => self.pick(field, position),
            ReplCommand::Toggle(arg) => self.toggle(&arg),
            ReplCommand::Next => match self.wizard.advance() {
                Ok(_) => self.render(),
                Err(e) => self.print_wizard_error(&e),
            },
            ReplCommand::Back => match self.wizard.retreat() {
                Ok(_) => self.render(),
                Err(e) => self.print_wizard_error(&e),
            },
        }
        CommandResult::Continue
    }

    fn set(&mut self, field: AnswerField, value: String) {
        let unknown = !value.is_empty()
            && !self.options.choices(field).is_empty()
            && self.options.choices(field).iter().all(|c| c.id != value);

        self.wizard.set_field(field, value.clone());

        if value.is_empty() {
            println!("{} {} cleared", "✓".green(), field);
        } else {
            println!("{} {} = {}", "✓".green(), field, value);
        }
        if unknown {
            println!("  {}", "(not in the options catalog)".dimmed());
        }
    }

    fn pick(&mut self, field: Option<AnswerField>, position: usize) {
        let step = self.wizard.current_step();
        let Some(field) = field.or_else(|| primary_field(step)) else {
            println!("Nothing to pick on this step; use /set <field> <value>");
            return;
        };
        let Some(id) = self.options.choice_at(field, position).map(str::to_string) else {
            println!("No option {} for {}", position, field);
            return;
        };
        let label = self.options.label_for(&id).unwrap_or(&id).to_string();
        self.wizard.set_field(field, id);
        println!("{} {} = {}", "✓".green(), field, label.bold());
    }

    fn toggle(&mut self, arg: &str) {
        let feature = match arg.parse::<usize>() {
            Ok(n) => match self.options.feature_at(n) {
                Some(feature) => feature.to_string(),
                None => {
                    println!("No feature {}", n);
                    return;
                }
            },
            // Match catalog spelling when the name differs only in case
            Err(_) => self
                .options
                .features
                .iter()
                .find(|f| f.eq_ignore_ascii_case(arg))
                .cloned()
                .unwrap_or_else(|| arg.to_string()),
        };

        if self.wizard.toggle_feature(feature.clone()) {
            println!("{} {} {}", "[x]".green(), feature, "added".dimmed());
        } else {
            println!("[ ] {} {}", feature, "removed".dimmed());
        }
    }

    async fn submit(&mut self) {
        let reporter;
        let progress: &dyn ProgressNotifier = if self.show_progress {
            reporter = ProgressReporter::new();
            &reporter
        } else {
            &NoProgress
        };

        match self
            .submit
            .execute_with_progress(&mut self.wizard, progress)
            .await
        {
            Ok(output) => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format(&output.answers, &self.options, self.output.format)
                );
                println!();
                println!("{}", ConsoleFormatter::format_receipt(&output.receipt));
                println!(
                    "{}",
                    format!(
                        "Starting over in {} seconds.",
                        self.wizard.params().reset_delay.as_secs_f32()
                    )
                    .dimmed()
                );
            }
            Err(SubmitQuoteError::Wizard(e)) => self.print_wizard_error(&e),
            Err(SubmitQuoteError::Gateway { source, answers }) => {
                eprintln!("{}", ConsoleFormatter::format_delivery_failure(&source, &answers));
            }
        }
    }

    fn print_wizard_error(&self, error: &quote_domain::WizardError) {
        println!(
            "{}",
            ConsoleFormatter::format_wizard_error(error, &self.wizard.answers())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use async_trait::async_trait;
    use quote_application::{GatewayError, LeadGateway, SubmissionReceipt, WizardParams};
    use quote_domain::{ContactForm, Step, WizardAnswers};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeGateway {
        quotes: Mutex<Vec<WizardAnswers>>,
    }

    #[async_trait]
    impl LeadGateway for FakeGateway {
        fn channel(&self) -> &'static str {
            "fake"
        }

        async fn send_quote(
            &self,
            answers: &WizardAnswers,
        ) -> Result<SubmissionReceipt, GatewayError> {
            self.quotes.lock().unwrap().push(answers.clone());
            Ok(SubmissionReceipt::new("1", "fake"))
        }

        async fn send_contact(
            &self,
            _form: &ContactForm,
        ) -> Result<SubmissionReceipt, GatewayError> {
            Ok(SubmissionReceipt::new("1", "fake"))
        }
    }

    fn options() -> QuoteOptions {
        serde_json::from_str(
            r#"{
                "services": [{"id": "web", "name": "Web Development"}, {"id": "seo", "name": "SEO"}],
                "projectTypes": [{"id": "new", "name": "New Project"}],
                "budgetRanges": [{"id": "small", "range": "$1k"}, {"id": "mid", "range": "$5k"}],
                "timelines": [{"id": "fast", "name": "ASAP"}],
                "features": ["Blog", "Payments"]
            }"#,
        )
        .unwrap()
    }

    fn repl(gateway: Arc<FakeGateway>) -> WizardRepl {
        WizardRepl::new(
            QuoteWizard::new(WizardParams::default()),
            SubmitQuoteUseCase::new(gateway),
            options(),
        )
        .with_progress(false)
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_session_submits_answers() {
        let gateway = Arc::new(FakeGateway::default());
        let mut repl = repl(gateway.clone());
        let mut input = ScriptedInput::new([
            "/pick 2",
            "/next",
            "/pick 1",
            "/pick budget 2",
            "/next",
            "/pick 1",
            "/toggle 2",
            "/toggle blog",
            "/next",
            "/set name Ann Lee",
            "/set email ann@example.com",
            "/submit",
            "/quit",
        ]);

        repl.run(&mut input).await.unwrap();

        let quotes = gateway.quotes.lock().unwrap();
        assert_eq!(quotes.len(), 1);
        let answers = &quotes[0];
        assert_eq!(answers.service_type, "seo");
        assert_eq!(answers.project_type, "new");
        assert_eq!(answers.budget, "mid");
        assert_eq!(answers.timeline, "fast");
        assert_eq!(answers.features(), ["Payments".to_string(), "Blog".to_string()]);
        assert_eq!(answers.name, "Ann Lee");
        assert!(repl.wizard().is_submitted());
        assert!(repl.wizard().is_disposed());
    }

    #[tokio::test]
    async fn test_incomplete_step_does_not_advance() {
        let gateway = Arc::new(FakeGateway::default());
        let mut repl = repl(gateway.clone());
        let mut input = ScriptedInput::new(["/next", "/back", "/submit", "/pick 9"]);

        repl.run(&mut input).await.unwrap();

        assert_eq!(repl.wizard().current_step(), Step::Service);
        assert!(repl.wizard().answers().is_empty());
        assert!(gateway.quotes.lock().unwrap().is_empty());
        // Prompt shows the step; input ended with EOF after four commands
        assert_eq!(input.prompts.len(), 5);
        assert!(input.prompts.iter().all(|p| p == "quote 1/4"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_refused_after_submit_until_reset() {
        let gateway = Arc::new(FakeGateway::default());
        let mut repl = repl(gateway.clone());
        let mut input = ScriptedInput::new([
            "/set serviceType web",
            "/next",
            "/set projectType new",
            "/set budget mid",
            "/next",
            "/set timeline fast",
            "/next",
            "/set name Ann",
            "/set email a@x.com",
            "/submit",
            "/set name Bob",
            "/back",
            "/reset",
            "/set name Cy",
        ]);

        repl.run(&mut input).await.unwrap();

        assert_eq!(gateway.quotes.lock().unwrap().len(), 1);
        let answers = repl.wizard().answers();
        assert_eq!(answers.name, "Cy");
        assert_eq!(answers.service_type, "");
        assert_eq!(repl.wizard().current_step(), Step::Service);
    }
}
