//! Interactive line prompt for terminal sessions.

use askback_input::line::{LineEvent, LineSource};
use inquire::{InquireError, Text};

/// `inquire`-backed line source for interactive terminals. Esc and Ctrl+C
/// surface as [`LineEvent::Interrupted`]: the human ending the session
/// early is a normal outcome, not an error.
pub struct PromptLineSource {
    prompt: &'static str,
}

impl PromptLineSource {
    pub fn new(prompt: &'static str) -> Self {
        Self { prompt }
    }
}

impl LineSource for PromptLineSource {
    fn next_line(&mut self) -> std::io::Result<LineEvent> {
        match Text::new(self.prompt).prompt() {
            Ok(line) => Ok(LineEvent::Line(line)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(LineEvent::Interrupted)
            }
            Err(InquireError::IO(e)) => Err(e),
            Err(e) => Err(std::io::Error::other(e.to_string())),
        }
    }
}
