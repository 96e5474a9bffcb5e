//! The line-based terminal front-end.
//!
//! Reads lines from a [`LineSource`] until a sentinel token, interrupt, or
//! end of input. Interrupt and EOF are normal termination paths: whatever
//! was accumulated up to that point is the session result, never an error.

use askback_input::line::{LineEvent, LineSource};

use crate::item::FeedbackItem;

/// Input tokens that end collection without being recorded, compared
/// case-insensitively against the trimmed line.
pub const SENTINELS: &[&str] = &["end", "done", "exit", "quit"];

pub fn is_sentinel(line: &str) -> bool {
    SENTINELS.iter().any(|t| line.eq_ignore_ascii_case(t))
}

/// Runs the collection loop over `source`.
///
/// Every non-empty, non-sentinel line becomes one text item, stamped when
/// it is accepted. Empty lines are skipped. An I/O error from the source is
/// treated like an interrupt: the loop ends with what it has.
pub fn collect_text_feedback<S: LineSource>(source: &mut S) -> Vec<FeedbackItem> {
    let mut items = Vec::new();
    loop {
        match source.next_line() {
            Ok(LineEvent::Line(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if is_sentinel(line) {
                    break;
                }
                items.push(FeedbackItem::text(line));
            }
            Ok(LineEvent::Interrupted | LineEvent::Eof) => break,
            Err(e) => {
                log::debug!("line source failed, ending collection: {e}");
                break;
            }
        }
    }
    items
}
