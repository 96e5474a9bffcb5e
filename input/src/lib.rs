//! Input sources for askback.
//!
//! Two acquisition channels feed the feedback front-ends: image payloads
//! from the system clipboard ([`clipboard`]) and lines of text from a
//! terminal or pipe ([`line`]). Both are trait-based so tests can substitute
//! mock implementations for the real system resources.

pub mod clipboard;
pub mod line;

pub use clipboard::{ClipboardError, ClipboardImagePayload, ClipboardProvider, SystemClipboard};
pub use line::{LineEvent, LineSource, MockLineSource, ReaderLineSource};
