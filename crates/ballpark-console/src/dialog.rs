//! Blocking confirmation and notice dialogs

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Confirmation prompts and notices shown to the administrator
///
/// Screens call these synchronously between requests; a confirmation that
/// returns `false` aborts the action before anything is sent.
pub trait Dialog: Send {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a notice
    fn notify(&mut self, message: &str);
}

/// Dialog on the controlling terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalDialog {
    assume_yes: bool,
}

impl TerminalDialog {
    /// Create a terminal dialog; `assume_yes` skips every prompt
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn read_answer(message: &str) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{message} [y/N] ")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(is_yes(&line))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl Dialog for TerminalDialog {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            println!("{message} [y/N] y");
            return true;
        }
        match Self::read_answer(message) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation, treating as no");
                false
            }
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Dialog with pre-recorded answers that remembers everything it was shown
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialog {
    answers: VecDeque<bool>,
    fallback: bool,
    prompts: Vec<String>,
    notices: Vec<String>,
}

impl ScriptedDialog {
    /// Answer every prompt the same way
    #[must_use]
    pub fn always(answer: bool) -> Self {
        Self {
            fallback: answer,
            ..Self::default()
        }
    }

    /// Answer prompts in order, then fall back to "no"
    #[must_use]
    pub fn answering<I: IntoIterator<Item = bool>>(answers: I) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Notices shown so far
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Most recent notice
    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }
}

impl Dialog for ScriptedDialog {
    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.fallback)
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
