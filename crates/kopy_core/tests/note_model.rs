use kopy_core::{Note, NoteValidationError, Notebook, NotebookValidationError};
use uuid::Uuid;

#[test]
fn note_new_sets_defaults() {
    let note = Note::new("First", "hello");

    assert!(!note.uuid.is_nil());
    assert_eq!(note.title, "First");
    assert_eq!(note.content, "hello");
    assert_eq!(note.notebook, None);
    assert!(!note.starred);
    assert!(note.is_active());
}

#[test]
fn soft_delete_and_restore_work() {
    let mut note = Note::new("Trash me", "body");

    note.soft_delete();
    assert!(note.is_deleted);
    assert!(!note.is_active());

    note.restore();
    assert!(!note.is_deleted);
    assert!(note.is_active());
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Note::with_id(Uuid::nil(), "invalid", "body").unwrap_err();
    assert_eq!(err, NoteValidationError::NilUuid);
}

#[test]
fn note_serialization_uses_expected_wire_fields() {
    let note_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let notebook_id = Uuid::parse_str("99999999-8888-4777-8666-555555555555").unwrap();
    let mut note = Note::with_id(note_id, "Proposal", "# Project Phoenix").unwrap();
    note.notebook = Some(notebook_id);
    note.starred = true;

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["uuid"], note_id.to_string());
    assert_eq!(json["title"], "Proposal");
    assert_eq!(json["content"], "# Project Phoenix");
    assert_eq!(json["notebook"], notebook_id.to_string());
    assert_eq!(json["starred"], true);
    assert_eq!(json["is_deleted"], false);

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn notebook_rejects_blank_name() {
    let err = Notebook::new("   ").unwrap_err();
    assert_eq!(err, NotebookValidationError::EmptyName);
}

#[test]
fn notebook_rejects_nil_uuid() {
    let err = Notebook::with_id(Uuid::nil(), "Meeting Notes").unwrap_err();
    assert_eq!(err, NotebookValidationError::NilUuid);
}
