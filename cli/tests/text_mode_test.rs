//! Integration tests for the text front-end over piped input.
//!
//! The collection loop is driven through the same `ReaderLineSource` the
//! binary uses for non-terminal stdin, backed by in-memory cursors.

use std::io::Cursor;

use askback_core::{ItemKind, collect_text_feedback};
use askback_input::ReaderLineSource;

fn collect_from(input: &str) -> Vec<(ItemKind, String)> {
    let mut source = ReaderLineSource::new(Cursor::new(input.as_bytes().to_vec()));
    collect_text_feedback(&mut source)
        .into_iter()
        .map(|item| (item.kind, item.content))
        .collect()
}

#[test]
fn piped_lines_become_text_items_in_order() {
    let items = collect_from("hello\n\nworld\nend\n");
    assert_eq!(
        items,
        vec![
            (ItemKind::Text, "hello".to_owned()),
            (ItemKind::Text, "world".to_owned()),
        ]
    );
}

#[test]
fn sentinel_case_is_ignored() {
    let items = collect_from("only item\nQUIT\nnot reached\n");
    assert_eq!(items, vec![(ItemKind::Text, "only item".to_owned())]);
}

#[test]
fn closed_pipe_without_sentinel_returns_what_was_read() {
    let items = collect_from("first\nsecond");
    assert_eq!(
        items,
        vec![
            (ItemKind::Text, "first".to_owned()),
            (ItemKind::Text, "second".to_owned()),
        ]
    );
}

#[test]
fn empty_pipe_yields_no_items() {
    assert!(collect_from("").is_empty());
}

#[test]
fn timestamps_are_non_decreasing_in_input_order() {
    let items: Vec<_> = {
        let mut source = ReaderLineSource::new(Cursor::new(b"a\nb\nc\nend\n".to_vec()));
        collect_text_feedback(&mut source)
    };
    assert_eq!(items.len(), 3);
    for pair in items.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "items are stamped as they are accepted"
        );
    }
}
