//! Core feedback-collection state for askback.
//!
//! A collection session gathers zero or more typed items (text, image) from
//! a human and hands the ordered, timestamped list back to the caller. Two
//! front-ends feed this state: the sentinel-terminated terminal loop in
//! [`text`] and the windowed form in the `askback-ui` crate, which drives a
//! [`session::FeedbackSession`].

pub mod item;
pub mod session;
pub mod text;

pub use item::{FeedbackItem, ItemKind};
pub use session::{FeedbackSession, SessionError, SubmitDecision};
pub use text::{SENTINELS, collect_text_feedback};
