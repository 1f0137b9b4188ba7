//! Inline editing tests
//!
//! Edit mode gating, buffers, commit coercion and cancel.

mod common;

use common::engine_with_people;
use tabula::{TableEngine, Value};

fn name_of(engine: &TableEngine, id: &str) -> String {
    engine.model().rows.get(id).unwrap().display("name")
}

#[test]
fn test_uncommitted_buffer_discarded_when_edit_mode_turns_off() {
    let mut engine = TableEngine::default();
    engine.set_edit_mode(true);
    engine.begin_edit("1");
    engine.set_edit_buffer("1", "name", "Zed");
    engine.set_edit_mode(false);

    assert_eq!(name_of(&engine, "1"), "John Doe");
    assert_eq!(engine.model().edits.editing_count(), 0);
    assert!(engine.model().edits.buffer("1").is_none());
}

#[test]
fn test_begin_edit_requires_edit_mode() {
    let mut engine = TableEngine::default();
    engine.begin_edit("1");
    assert!(!engine.model().edits.is_editing("1"));

    engine.toggle_edit_mode();
    engine.begin_edit("1");
    assert!(engine.model().edits.is_editing("1"));
}

#[test]
fn test_several_rows_edit_at_once() {
    let mut engine = engine_with_people(5);
    engine.set_edit_mode(true);
    engine.begin_edit("2");
    engine.begin_edit("4");
    engine.begin_edit("2");
    assert_eq!(engine.model().edits.editing_rows(), vec!["2", "4"]);
}

#[test]
fn test_commit_writes_fields_and_leaves_edit() {
    let mut engine = TableEngine::default();
    engine.set_edit_mode(true);
    engine.begin_edit("3");
    engine.commit_edit("3", [("name", "Michael Johnson"), ("age", "36")]);

    let row = engine.model().rows.get("3").unwrap();
    assert_eq!(row.display("name"), "Michael Johnson");
    assert_eq!(row.get("age"), Some(&Value::Number(36.0)));
    assert!(!engine.model().edits.is_editing("3"));
}

#[test]
fn test_commit_bad_number_reverts_silently() {
    let mut engine = TableEngine::default();
    engine.set_edit_mode(true);
    engine.begin_edit("1");
    engine.commit_edit("1", [("age", "twenty-nine"), ("role", "Lead")]);

    let row = engine.model().rows.get("1").unwrap();
    assert_eq!(row.get("age"), Some(&Value::Number(28.0)));
    assert_eq!(row.display("role"), "Lead");
    assert!(engine.notification().is_none());
}

#[test]
fn test_commit_buffer_only() {
    let mut engine = TableEngine::default();
    engine.set_edit_mode(true);
    engine.begin_edit("2");
    engine.set_edit_buffer("2", "location", "Oakland");
    engine.commit_edit("2", Vec::<(String, String)>::new());

    let row = engine.model().rows.get("2").unwrap();
    assert_eq!(row.display("location"), "Oakland");
}

#[test]
fn test_commit_unregistered_field_is_stored_as_text() {
    let mut engine = TableEngine::default();
    engine.set_edit_mode(true);
    engine.begin_edit("2");
    engine.commit_edit("2", [("nickname", "JJ")]);
    assert_eq!(
        engine.model().rows.get("2").unwrap().get("nickname"),
        Some(&Value::text("JJ"))
    );
}

#[test]
fn test_cancel_keeps_row() {
    let mut engine = TableEngine::default();
    engine.set_edit_mode(true);
    engine.begin_edit("4");
    engine.set_edit_buffer("4", "name", "Nobody");
    engine.cancel_edit("4");
    engine.commit_edit("4", [("name", "Still nobody")]);

    assert_eq!(name_of(&engine, "4"), "Sarah Wilson");
    assert!(!engine.model().edits.is_editing("4"));
}

#[test]
fn test_deleting_row_under_edit_drops_its_edit() {
    let mut engine = TableEngine::default();
    engine.set_edit_mode(true);
    engine.begin_edit("5");
    engine.delete_row("5");
    assert_eq!(engine.model().edits.editing_count(), 0);
    assert!(engine.model().rows.get("5").is_none());
}

#[test]
fn test_import_drops_edits_for_replaced_rows() {
    let mut engine = TableEngine::default();
    engine.set_edit_mode(true);
    engine.begin_edit("1");
    engine.import_csv("name\nAnn\n").unwrap();
    assert_eq!(engine.model().edits.editing_count(), 0);
    assert!(engine.model().edits.is_enabled());
}
