//! Line input for interactive sessions
//!
//! [`LineSource`] decouples the REPL and the contact prompt from the
//! terminal so a session can be replayed from a script.

use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::collections::VecDeque;
use std::io;
use std::path::Path;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// What the user did at a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C: abandon the current entry
    Interrupted,
    /// Ctrl-D: leave the session
    Eof,
}

/// Source of user input lines
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input>;
}

/// Terminal input via reedline
pub struct ReedlineSource {
    editor: Reedline,
}

impl ReedlineSource {
    pub fn new() -> Self {
        Self {
            editor: Reedline::create(),
        }
    }

    /// Editor with a persistent history file.
    ///
    /// Falls back to in-memory history when the file cannot be opened.
    pub fn with_history(path: &Path) -> Self {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.to_path_buf()) {
            Ok(history) => Self {
                editor: Reedline::create().with_history(Box::new(history)),
            },
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }
}

impl Default for ReedlineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for ReedlineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(prompt.to_string()),
            DefaultPromptSegment::Empty,
        );
        #[allow(unreachable_patterns)]
        let input = match self.editor.read_line(&prompt)? {
            Signal::Success(line) => Input::Line(line),
            Signal::CtrlC => Input::Interrupted,
            Signal::CtrlD => Input::Eof,
            _ => Input::Interrupted,
        };
        Ok(input)
    }
}

/// Pre-recorded input; reports EOF once exhausted
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<Input>,
    /// Prompts shown so far, in order
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(|l| Input::Line(l.into())).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn push(&mut self, input: Input) {
        self.lines.push_back(input);
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().unwrap_or(Input::Eof))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_ends_with_eof() {
        let mut input = ScriptedInput::new(["a", "b"]);
        input.push(Input::Interrupted);
        assert_eq!(input.read_line("p1").unwrap(), Input::Line("a".into()));
        assert_eq!(input.read_line("p2").unwrap(), Input::Line("b".into()));
        assert_eq!(input.read_line("p3").unwrap(), Input::Interrupted);
        assert_eq!(input.read_line("p4").unwrap(), Input::Eof);
        assert_eq!(input.prompts, vec!["p1", "p2", "p3", "p4"]);
    }
}
