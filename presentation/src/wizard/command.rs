//! Slash commands accepted by the quote REPL

use quote_domain::{AnswerField, Step};

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `/set <field> [value...]`; an empty value clears the field
    Set { field: AnswerField, value: String },
    /// `/pick [field] <n>`; without a field, the step's primary choice
    Pick {
        field: Option<AnswerField>,
        position: usize,
    },
    /// `/toggle <feature|n>`
    Toggle(String),
    Next,
    Back,
    Submit,
    Reset,
    Status,
    Options,
    Help,
    Quit,
}

/// Parse one line starting with `/`.
///
/// Errors carry a message suitable for printing.
pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let Some(body) = line.strip_prefix('/') else {
        return Err("Commands start with '/'. Type /help for the list.".to_string());
    };

    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };

    match name {
        "set" | "s" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("Usage: /set <field> <value>".to_string());
            }
            let field = field.parse::<AnswerField>().map_err(|e| e.to_string())?;
            Ok(ReplCommand::Set {
                field,
                value: value.to_string(),
            })
        }
        "pick" | "p" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            let (field, position) = match args.as_slice() {
                [n] => (None, *n),
                [field, n] => (
                    Some(field.parse::<AnswerField>().map_err(|e| e.to_string())?),
                    *n,
                ),
                _ => return Err("Usage: /pick [field] <n>".to_string()),
            };
            let position = position
                .parse::<usize>()
                .map_err(|_| format!("Not a number: {}", position))?;
            Ok(ReplCommand::Pick { field, position })
        }
        "toggle" | "t" => {
            if rest.is_empty() {
                return Err("Usage: /toggle <feature|n>".to_string());
            }
            Ok(ReplCommand::Toggle(rest.to_string()))
        }
        "next" | "n" => Ok(ReplCommand::Next),
        "back" | "b" => Ok(ReplCommand::Back),
        "submit" => Ok(ReplCommand::Submit),
        "reset" => Ok(ReplCommand::Reset),
        "status" => Ok(ReplCommand::Status),
        "options" => Ok(ReplCommand::Options),
        "help" | "h" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        other => Err(format!(
            "Unknown command: /{}\nType /help for available commands",
            other
        )),
    }
}

/// The single-select field `/pick <n>` targets on each step.
pub fn primary_field(step: Step) -> Option<AnswerField> {
    match step {
        Step::Service => Some(AnswerField::ServiceType),
        Step::ProjectDetails => Some(AnswerField::ProjectType),
        Step::Timeline => Some(AnswerField::Timeline),
        Step::Contact => None,
    }
}

pub const HELP: &str = "\
Commands:
  /set <field> <value>  Set a text field (e.g. /set name Ann Lee)
  /pick [field] <n>     Choose the n-th option (e.g. /pick 2, /pick budget 3)
  /toggle <feature|n>   Add or remove a feature
  /next, /n             Go to the next step (current step must be complete)
  /back, /b             Go to the previous step
  /submit               Send the request (last step only)
  /reset                Start over
  /status               Show the current step again
  /options              Show the full options catalog
  /help, /h, /?         Show this help
  /quit, /exit, /q      Leave

Fields: serviceType, projectType, budget, timeline, name, email, phone,
        company, projectDetails (snake_case also accepted)";
