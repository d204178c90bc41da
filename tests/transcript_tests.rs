// Tests for transcript accumulation and export.
//
// The rendered transcript must always equal the space-joined concatenation
// of appended fragments, in append order, since the last clear.

use speechpad::transcript::{TranscriptSink, EXPORT_FILENAME};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_render_joins_fragments_in_append_order() {
    let mut sink = TranscriptSink::new();
    sink.append("the quick");
    sink.append("brown fox");
    sink.append("jumps");

    assert_eq!(sink.render(), "the quick brown fox jumps");
}

#[test]
fn test_new_sink_is_empty_and_export_disabled() {
    let sink = TranscriptSink::new();

    assert!(sink.is_empty());
    assert!(!sink.can_export());
    assert_eq!(sink.render(), "");
}

#[test]
fn test_first_append_enables_export() {
    let mut sink = TranscriptSink::new();
    sink.append("hello");

    assert!(!sink.is_empty());
    assert!(sink.can_export());
}

#[test]
fn test_clear_empties_and_disables_export() {
    let mut sink = TranscriptSink::new();
    sink.append("hello");
    sink.append("world");

    sink.clear();

    assert!(sink.is_empty());
    assert!(!sink.can_export());
    assert_eq!(sink.render(), "");
}

#[test]
fn test_append_after_clear_starts_fresh() {
    let mut sink = TranscriptSink::new();
    sink.append("old content");
    sink.clear();
    sink.append("new");
    sink.append("content");

    assert_eq!(sink.render(), "new content");
}

#[test]
fn test_export_writes_rendered_text() {
    let mut sink = TranscriptSink::new();
    sink.append("first fragment");
    sink.append("second fragment");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(EXPORT_FILENAME);
    sink.export_to(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "first fragment second fragment");
}

#[test]
fn test_export_after_clear_is_empty_content() {
    let mut sink = TranscriptSink::new();
    sink.append("something");
    sink.clear();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(EXPORT_FILENAME);
    sink.export_to(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_fragments_keep_arrival_order() {
    let mut sink = TranscriptSink::new();
    sink.append("a");
    sink.append("b");
    sink.append("c");

    let texts: Vec<&str> = sink
        .fragments()
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}
