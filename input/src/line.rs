//! Line-based input sources for the terminal front-end.
//!
//! [`LineSource`] abstracts where lines come from: an interactive prompt, a
//! pipe, or a mock in tests. Interrupts (Ctrl+C, Esc) and end-of-input are
//! reported as events rather than errors because both are normal ways to
//! finish a collection session.
//!
//! # Cross-platform EOF
//!
//! - **Unix**: Ctrl+D at the start of a line sends EOF
//! - **Windows**: Ctrl+Z followed by Enter sends EOF
//!
//! [`ReaderLineSource`] uses `BufRead::read_line`, which reports EOF as a
//! zero-byte read on both.

use std::collections::VecDeque;
use std::io::{self, BufRead as _, Read};

/// One read from a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A line of input, without its trailing newline.
    Line(String),
    /// The human aborted the session (Ctrl+C or equivalent).
    Interrupted,
    /// No more input.
    Eof,
}

pub trait LineSource {
    fn next_line(&mut self) -> io::Result<LineEvent>;
}

/// Reads lines from any `Read` via a buffer: piped stdin in production,
/// cursors in tests.
pub struct ReaderLineSource<R: Read> {
    reader: io::BufReader<R>,
}

impl<R: Read> ReaderLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: io::BufReader::new(reader),
        }
    }
}

impl<R: Read> LineSource for ReaderLineSource<R> {
    fn next_line(&mut self) -> io::Result<LineEvent> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(LineEvent::Eof);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(LineEvent::Line(line))
    }
}

/// Mock line source replaying predetermined events.
#[derive(Debug, Default)]
pub struct MockLineSource {
    events: VecDeque<LineEvent>,
    fail_after_events: bool,
}

impl MockLineSource {
    /// Replays `lines` then EOF.
    pub fn lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            events: lines
                .iter()
                .map(|l| LineEvent::Line(l.as_ref().to_owned()))
                .collect(),
            fail_after_events: false,
        }
    }

    pub fn with_events(events: Vec<LineEvent>) -> Self {
        Self {
            events: events.into(),
            fail_after_events: false,
        }
    }

    /// Makes the source return an I/O error once its events are exhausted,
    /// instead of EOF.
    pub fn fail_after_events(&mut self) {
        self.fail_after_events = true;
    }
}

impl LineSource for MockLineSource {
    fn next_line(&mut self) -> io::Result<LineEvent> {
        match self.events.pop_front() {
            Some(event) => Ok(event),
            None if self.fail_after_events => {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock failure"))
            }
            None => Ok(LineEvent::Eof),
        }
    }
}
