//! Console output formatter for the quote wizard

use colored::Colorize;
use quote_application::{GatewayError, SubmissionReceipt, WizardSnapshot};
use quote_domain::{
    AnswerField, Choice, ContactErrors, ContactField, OutputFormat, QuoteOptions, Step,
    WizardAnswers, WizardError, missing_fields,
};

/// Text fields collected on the contact step, in display order
const CONTACT_STEP_FIELDS: [AnswerField; 5] = [
    AnswerField::Name,
    AnswerField::Email,
    AnswerField::Phone,
    AnswerField::Company,
    AnswerField::ProjectDetails,
];

/// Formats wizard screens and results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    // ==================== Wizard Screens ====================

    /// Progress line: one marker per step, current step highlighted.
    pub fn progress(snapshot: &WizardSnapshot) -> String {
        Step::ALL
            .iter()
            .map(|&step| {
                let marker = if snapshot.is_step_valid(step) {
                    "✓".green().to_string()
                } else {
                    step.number().to_string()
                };
                let label = format!("{} {}", marker, step.label());
                if step == snapshot.current_step {
                    format!("[{}]", label).cyan().bold().to_string()
                } else {
                    label.dimmed().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ─ ")
    }

    /// Full screen for the current step.
    pub fn step_screen(snapshot: &WizardSnapshot, options: &QuoteOptions) -> String {
        let step = snapshot.current_step;
        let answers = &snapshot.answers;
        let mut output = String::new();

        output.push_str(&Self::header(&format!(
            "Step {} of {}: {}",
            step.number(),
            Step::LAST.number(),
            step.label()
        )));
        output.push('\n');
        output.push_str(&Self::progress(snapshot));
        output.push_str("\n\n");
        output.push_str(&format!("{}\n", step.title().bold()));

        match step {
            Step::Service => {
                output.push_str(&Self::choice_list(
                    "Service",
                    &options.choices(AnswerField::ServiceType),
                    answers.get(AnswerField::ServiceType),
                ));
            }
            Step::ProjectDetails => {
                output.push_str(&Self::choice_list(
                    "Project Type",
                    &options.choices(AnswerField::ProjectType),
                    answers.get(AnswerField::ProjectType),
                ));
                output.push_str(&Self::choice_list(
                    "Budget Range",
                    &options.choices(AnswerField::Budget),
                    answers.get(AnswerField::Budget),
                ));
            }
            Step::Timeline => {
                output.push_str(&Self::choice_list(
                    "Timeline",
                    &options.choices(AnswerField::Timeline),
                    answers.get(AnswerField::Timeline),
                ));
                output.push_str(&Self::feature_list(options, answers));
            }
            Step::Contact => {
                output.push_str(&Self::section_header("Contact Info"));
                for field in CONTACT_STEP_FIELDS {
                    let required = if Self::is_required(field, step) { "*" } else { " " };
                    let value = answers.get(field);
                    let shown = if value.is_empty() {
                        "(empty)".dimmed().to_string()
                    } else {
                        value.to_string()
                    };
                    output.push_str(&format!(
                        "  {}{:<16} {}\n",
                        required.red(),
                        field.as_str(),
                        shown
                    ));
                }
            }
        }

        let missing = missing_fields(answers, step);
        output.push('\n');
        if snapshot.submitted {
            output.push_str(&format!("{}\n", "Submitted.".green().bold()));
        } else if missing.is_empty() {
            let next = if step.is_last() { "/submit" } else { "/next" };
            output.push_str(&format!(
                "{} {}\n",
                "Step complete.".green(),
                format!("Type {} to continue.", next).dimmed()
            ));
        } else {
            let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
            output.push_str(&format!(
                "{} {}\n",
                "Required:".yellow(),
                names.join(", ")
            ));
        }

        output
    }

    fn is_required(field: AnswerField, step: Step) -> bool {
        quote_domain::required_fields(step).contains(&field)
    }

    fn choice_list(title: &str, choices: &[Choice<'_>], selected: &str) -> String {
        let mut output = Self::section_header(title);
        if choices.is_empty() {
            output.push_str(&format!("  {}\n", "(no options in catalog)".dimmed()));
        }
        for (i, choice) in choices.iter().enumerate() {
            let line = format!("{:>3}. {}", i + 1, choice.label);
            if choice.id == selected {
                output.push_str(&format!("{} {}\n", "●".green(), line.green().bold()));
            } else {
                output.push_str(&format!("  {}\n", line));
            }
        }
        output
    }

    fn feature_list(options: &QuoteOptions, answers: &WizardAnswers) -> String {
        let mut output = Self::section_header("Features (optional)");
        for (i, feature) in options.features.iter().enumerate() {
            let mark = if answers.has_feature(feature) {
                "[x]".green().to_string()
            } else {
                "[ ]".to_string()
            };
            output.push_str(&format!("  {} {:>2}. {}\n", mark, i + 1, feature));
        }
        // Selected features missing from the catalog are still shown
        for feature in answers
            .features()
            .iter()
            .filter(|f| !options.features.contains(f))
        {
            output.push_str(&format!("  {}     {}\n", "[x]".green(), feature));
        }
        output
    }

    // ==================== Results ====================

    /// Format submitted answers in the requested format
    pub fn format(answers: &WizardAnswers, options: &QuoteOptions, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => Self::format_summary(answers, options),
            OutputFormat::Json => Self::format_json(answers),
        }
    }

    /// Human readable summary, resolving ids to catalog labels
    pub fn format_summary(answers: &WizardAnswers, options: &QuoteOptions) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Quote Request"));
        output.push('\n');

        let label = |field: AnswerField| {
            let id = answers.get(field);
            options.label_for(id).unwrap_or(id).to_string()
        };

        let rows = [
            ("Service", label(AnswerField::ServiceType)),
            ("Project Type", label(AnswerField::ProjectType)),
            ("Budget", label(AnswerField::Budget)),
            ("Timeline", label(AnswerField::Timeline)),
            ("Features", answers.features().join(", ")),
            ("Name", answers.name.clone()),
            ("Email", answers.email.clone()),
            ("Phone", answers.phone.clone()),
            ("Company", answers.company.clone()),
        ];
        for (title, value) in rows {
            if !value.is_empty() {
                output.push_str(&format!("{} {}\n", format!("{:<13}", title).cyan().bold(), value));
            }
        }

        if !answers.project_details.is_empty() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Project Details:".cyan().bold(),
                Self::indent(&answers.project_details, "  ")
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(answers: &WizardAnswers) -> String {
        serde_json::to_string_pretty(answers).unwrap_or_else(|_| "{}".to_string())
    }

    /// Confirmation shown after delivery
    pub fn format_receipt(receipt: &SubmissionReceipt) -> String {
        format!(
            "{} {}",
            "Thank you! We'll get back to you within 24 hours.".green().bold(),
            format!("(ref {} via {})", receipt.reference, receipt.channel).dimmed()
        )
    }

    /// Delivery failure followed by the submitted answers as JSON
    pub fn format_delivery_failure(error: &GatewayError, answers: &WizardAnswers) -> String {
        format!(
            "{} {}\n{}\n{}",
            "Could not deliver your request:".red().bold(),
            error,
            "Your answers, for reference:".dimmed(),
            Self::format_json(answers)
        )
    }

    /// Explain a refused wizard operation
    pub fn format_wizard_error(error: &WizardError, answers: &WizardAnswers) -> String {
        let mut output = format!("{} {}", "!".yellow().bold(), error);
        if let WizardError::StepIncomplete { step } = error {
            let names: Vec<&str> = missing_fields(answers, *step)
                .iter()
                .map(|f| f.as_str())
                .collect();
            output.push_str(&format!(" (missing: {})", names.join(", ")));
        }
        output
    }

    /// Per-field contact form errors
    pub fn format_contact_errors(errors: &ContactErrors) -> String {
        errors
            .iter()
            .map(|(field, message)| format!("  {} {:<8} {}", "✗".red(), field.as_str(), message.red()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prompt label for a contact form field
    pub fn contact_prompt(field: ContactField) -> String {
        if field.is_required() {
            format!("{}*", field.as_str())
        } else {
            format!("{} (optional)", field.as_str())
        }
    }

    // ==================== Catalog ====================

    /// Everything the catalog offers
    pub fn format_options(options: &QuoteOptions) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Quote Options"));
        output.push('\n');

        output.push_str(&Self::section_header("Services"));
        for s in &options.services {
            output.push_str(&format!("  {} {:<12} {}", s.icon, s.id.dimmed(), s.name.bold()));
            if !s.description.is_empty() {
                output.push_str(&format!(" - {}", s.description));
            }
            output.push('\n');
        }

        output.push_str(&Self::section_header("Project Types"));
        for p in &options.project_types {
            output.push_str(&format!("  {} {:<12} {}", p.icon, p.id.dimmed(), p.name.bold()));
            if !p.description.is_empty() {
                output.push_str(&format!(" - {}", p.description));
            }
            output.push('\n');
        }

        output.push_str(&Self::section_header("Budget Ranges"));
        for b in &options.budget_ranges {
            output.push_str(&format!("  {} {:<12} {}\n", b.icon, b.id.dimmed(), b.range.bold()));
        }

        output.push_str(&Self::section_header("Timelines"));
        for t in &options.timelines {
            output.push_str(&format!("  {} {:<12} {}\n", t.icon, t.id.dimmed(), t.name.bold()));
        }

        output.push_str(&Self::section_header("Features"));
        for f in &options.features {
            output.push_str(&format!("  * {}\n", f));
        }

        output.push_str(&Self::footer());
        output
    }

    // ==================== Helpers ====================

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
