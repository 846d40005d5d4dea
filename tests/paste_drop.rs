//! Paste and drag-and-drop tests

mod common;

use common::{assert_field_invariants, field_with, resources_field, type_str};
use guarded_input::editable::{FieldKind, FieldMsg, MoveTarget, Selection, Signal};

// ========================================================================
// Paste
// ========================================================================

#[test]
fn test_paste_is_trimmed_and_collapsed() {
    let mut field = resources_field();
    let outcome = field.on_paste("  Lab    Manual  ", 10, 10);

    assert_eq!(outcome.value, "Resources_Lab Manual");
    assert_eq!(outcome.caret(), 20);
    assert!(outcome.signals.is_empty());
    assert!(outcome.changed);
}

#[test]
fn test_paste_fifty_chars_truncates_to_limit() {
    let mut field = resources_field();
    let outcome = field.on_paste(&"a".repeat(50), 10, 10);

    assert_eq!(field.editable_value(), "a".repeat(30));
    assert_eq!(outcome.caret(), 40);
    assert!(outcome.has_signal(&Signal::LimitReached));
    assert_field_invariants(&field);
}

#[test]
fn test_paste_reports_invalid_chars() {
    let mut field = field_with(FieldKind::Subject, "");
    let outcome = field.on_paste("C++ & Java!", 0, 0);

    assert_eq!(outcome.value, "C Java");
    assert_eq!(outcome.invalid_chars(), &['+', '&', '!']);
}

#[test]
fn test_paste_replaces_selection_in_middle() {
    let mut field = field_with(FieldKind::Subject, "Data XXX Lab");
    let outcome = field.on_paste("Structures", 5, 8);

    assert_eq!(outcome.value, "Data Structures Lab");
    assert_eq!(outcome.caret(), 15);
}

#[test]
fn test_paste_at_limit_truncates_tail() {
    let mut field = field_with(FieldKind::Subject, &"b".repeat(28));
    let outcome = field.on_paste("cdef", 0, 0);

    assert_eq!(outcome.value, format!("cdef{}", "b".repeat(26)));
    assert_eq!(outcome.caret(), 4);
    assert!(outcome.has_signal(&Signal::LimitReached));
}

#[test]
fn test_paste_range_inside_prefix_is_clamped() {
    let mut field = resources_field();
    type_str(&mut field, "old");
    let outcome = field.on_paste("new", 2, 13);

    assert_eq!(outcome.value, "Resources_new");
    assert_eq!(outcome.caret(), 13);
}

#[test]
fn test_paste_only_invalid_chars_changes_nothing() {
    let mut field = resources_field();
    let outcome = field.on_paste("@#$%", 10, 10);

    assert_eq!(outcome.value, "Resources_");
    assert!(!outcome.changed);
    assert_eq!(outcome.invalid_chars(), &['@', '#', '$', '%']);
}

#[test]
fn test_paste_forming_forbidden_word_on_name() {
    let mut field = field_with(FieldKind::Name, "Ad");
    let outcome = field.on_paste("min", 2, 2);

    assert_eq!(outcome.value, "");
    assert_eq!(outcome.caret(), 0);
}

#[test]
fn test_paste_via_update() {
    let mut field = resources_field();
    let outcome = field.update(FieldMsg::Paste {
        text: "notes".to_string(),
        start: 10,
        end: 10,
    });
    assert_eq!(outcome.value, "Resources_notes");
    assert_eq!(outcome.selection, Selection::collapsed(15));
}

// ========================================================================
// Drop
// ========================================================================

#[test]
fn test_drop_appends_regardless_of_hint() {
    let mut field = resources_field();
    type_str(&mut field, "Lab");
    field.move_caret(MoveTarget::LineStart, false);

    // Dropped text is trimmed before it is appended
    let outcome = field.on_drop(" Notes ", Some(10));
    assert_eq!(outcome.value, "Resources_LabNotes");
    assert_eq!(outcome.caret(), 18);
}

#[test]
fn test_drop_truncates_and_signals() {
    let mut field = field_with(FieldKind::Subject, &"z".repeat(25));
    let outcome = field.on_drop("abcdefghij", None);

    assert_eq!(outcome.value.chars().count(), 30);
    assert!(outcome.value.ends_with("abcde"));
    assert_eq!(outcome.caret(), 30);
    assert!(outcome.has_signal(&Signal::LimitReached));
}

#[test]
fn test_drop_invalid_text() {
    let mut field = field_with(FieldKind::Name, "Ann");
    let outcome = field.update(FieldMsg::Drop {
        text: "e-Marie".to_string(),
        hint: None,
    });

    assert_eq!(outcome.value, "Annemarie");
    assert_eq!(outcome.invalid_chars(), &['-']);
}
