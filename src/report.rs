//! Operator I/O
//!
//! Narrow reporting and confirmation interfaces injected into every command
//! handler, so nothing reads a global stdin singleton or calls ambient
//! logging functions. Test doubles live at the bottom.

use is_terminal::IsTerminal;

use crate::error::{ShipwayError, ShipwayResult};

/// Narrow reporting interface.
pub trait Reporter {
    /// Progress and result messages.
    fn info(&self, message: &str);
    /// Non-fatal cautions.
    fn warn(&self, message: &str);
    /// Failures.
    fn error(&self, message: &str);
}

/// Yes/no confirmation gate.
pub trait Prompter {
    /// Ask the operator a yes/no question. Defaults to "no".
    fn confirm(&self, question: &str) -> ShipwayResult<bool>;
}

/// Reporter writing to stdout/stderr with terminal-gated styling.
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            color: std::io::stderr().is_terminal(),
        }
    }

    fn paint(&self, symbol: &str, color: crossterm::style::Color) -> String {
        if self.color {
            use crossterm::style::Stylize;
            symbol.with(color).to_string()
        } else {
            symbol.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {}", self.paint("⚠", crossterm::style::Color::Yellow), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", self.paint("✗", crossterm::style::Color::Red), message);
    }
}

/// Interactive prompter backed by dialoguer.
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn confirm(&self, question: &str) -> ShipwayResult<bool> {
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| ShipwayError::Io(std::io::Error::other(e.to_string())))
    }
}

/// Prompter for `--yes`: every gate answers affirmatively.
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, _question: &str) -> ShipwayResult<bool> {
        Ok(true)
    }
}

/// Recording reporter for tests.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("info: {}", message));
    }

    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("warn: {}", message));
    }

    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("error: {}", message));
    }
}

/// Scripted prompter for tests: replays queued answers, records questions.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::sync::Mutex<std::collections::VecDeque<bool>>,
    pub questions: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: std::sync::Mutex::new(answers.iter().copied().collect()),
            questions: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str) -> ShipwayResult<bool> {
        self.questions.lock().unwrap().push(question.to_string());
        // running out of scripted answers means the test asked for fewer
        // gates than the code hit; answer "no" so the failure is visible
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assume_yes_always_confirms() {
        assert!(AssumeYes.confirm("destroy everything?").unwrap());
    }

    #[test]
    fn scripted_prompter_replays_answers_in_order() {
        let prompter = ScriptedPrompter::new(&[true, false]);
        assert!(prompter.confirm("first?").unwrap());
        assert!(!prompter.confirm("second?").unwrap());
        assert!(!prompter.confirm("third?").unwrap());
        assert_eq!(prompter.asked(), vec!["first?", "second?", "third?"]);
    }

    #[test]
    fn recording_reporter_tags_levels() {
        let reporter = RecordingReporter::new();
        reporter.info("hello");
        reporter.warn("careful");
        reporter.error("boom");
        assert_eq!(reporter.lines(), vec!["info: hello", "warn: careful", "error: boom"]);
        assert!(reporter.contains("careful"));
    }
}
