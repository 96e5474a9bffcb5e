//! Styled stdout block for collected feedback.
//!
//! The printed lines are the machine-observable contract: the invoking
//! agent parses them to recover the item list, so the per-kind prefixes
//! stay stable. `console` drops the styling when stdout is not a terminal,
//! leaving the plain lines for the parser.

use std::fmt::Display;

use console::{Term, style};

/// Terminal output helper for consistent styled output.
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Plain message without any prefix.
    pub fn print(&self, message: impl Display) {
        drop(self.term.write_line(&message.to_string()));
    }

    pub fn newline(&self) {
        drop(self.term.write_line(""));
    }

    /// Header with emphasis.
    pub fn header(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&style(message).bold().cyan().to_string()),
        );
    }

    /// Warning with a yellow warning sign.
    pub fn warning(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("⚠").yellow().bold(), message)),
        );
    }

    pub fn divider(&self, width: usize) {
        drop(
            self.term
                .write_line(&style("═".repeat(width)).dim().to_string()),
        );
    }

    /// One collected text item.
    pub fn text_item(&self, content: impl Display) {
        drop(self.term.write_line(&format!("💬 {content}")));
    }

    /// One collected image item, showing the saved file's path.
    pub fn image_item(&self, path: impl Display) {
        drop(self.term.write_line(&format!("🖼 Image: {path}")));
    }
}
