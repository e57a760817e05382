use kopy_core::db::open_db_in_memory;
use kopy_core::{
    NoteListQuery, NoteService, NoteServiceError, NoteVisibility, SqliteNoteRepository,
};
use rusqlite::params;

#[test]
fn create_and_update_note_round_trips_title_and_content() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);

    let created = service
        .create_note("Initial Project Proposal", "# Project Phoenix\n\nGoals.")
        .unwrap();
    assert_eq!(created.title, "Initial Project Proposal");
    assert!(created.content.contains("Goals."));
    assert!(created.tags.is_empty());

    let updated = service
        .update_note(created.note_id, "Revised Proposal", "# Phoenix v2")
        .unwrap();
    assert_eq!(updated.title, "Revised Proposal");
    assert_eq!(updated.content, "# Phoenix v2");
}

#[test]
fn create_untitled_uses_default_title_and_template() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);

    let created = service.create_untitled().unwrap();
    assert_eq!(created.title, "Untitled Note");
    assert!(created.content.starts_with("# New Note"));
}

#[test]
fn notes_list_returns_stable_update_order() {
    let mut conn = open_db_in_memory().unwrap();
    let (first_id, second_id) = {
        let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        let service = NoteService::new(repo);
        let first = service.create_note("first", "first note").unwrap();
        let second = service.create_note("second", "second note").unwrap();
        (first.note_id.to_string(), second.note_id.to_string())
    };

    conn.execute(
        "UPDATE notes SET updated_at = 2000 WHERE uuid = ?1;",
        params![first_id],
    )
    .unwrap();
    conn.execute(
        "UPDATE notes SET updated_at = 1000 WHERE uuid = ?1;",
        params![second_id],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);
    let listed = service.list_notes(NoteListQuery::default()).unwrap();
    assert_eq!(listed.items.len(), 2);
    assert_eq!(listed.items[0].note_id.to_string(), first_id);
    assert_eq!(listed.items[1].note_id.to_string(), second_id);
}

#[test]
fn set_note_tags_replaces_full_set_with_lowercase_normalization() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);
    let created = service.create_note("tag target", "body").unwrap();

    let after_first = service
        .set_note_tags(
            created.note_id,
            vec![
                "Work".to_string(),
                "IMPORTANT".to_string(),
                "work".to_string(),
            ],
        )
        .unwrap();
    assert_eq!(
        after_first.tags,
        vec!["important".to_string(), "work".to_string()]
    );

    let after_replace = service
        .set_note_tags(created.note_id, vec!["Personal".to_string()])
        .unwrap();
    assert_eq!(after_replace.tags, vec!["personal".to_string()]);
}

#[test]
fn set_note_tags_rejects_blank_tag_values() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);
    let created = service.create_note("tag target", "body").unwrap();

    let err = service
        .set_note_tags(created.note_id, vec!["ok".to_string(), "   ".to_string()])
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::InvalidTag(_)));
}

#[test]
fn notes_list_supports_single_tag_filter() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);
    let note_work = service.create_note("work note", "w").unwrap();
    let note_other = service.create_note("other note", "o").unwrap();
    service
        .set_note_tags(note_work.note_id, vec!["Work".to_string()])
        .unwrap();
    service
        .set_note_tags(note_other.note_id, vec!["Personal".to_string()])
        .unwrap();

    let filtered = service
        .list_notes(NoteListQuery {
            tag: Some("WORK".to_string()),
            ..NoteListQuery::default()
        })
        .unwrap();
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].note_id, note_work.note_id);
}

#[test]
fn list_tags_returns_sorted_normalized_names() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);
    let created = service.create_note("tagged", "body").unwrap();
    service
        .set_note_tags(
            created.note_id,
            vec!["Research".to_string(), "ideas".to_string()],
        )
        .unwrap();

    let tags = service.list_tags().unwrap();
    assert_eq!(tags, vec!["ideas".to_string(), "research".to_string()]);
}

#[test]
fn starred_filter_returns_only_starred_notes() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);
    let starred = service.create_note("starred", "s").unwrap();
    service.create_note("plain", "p").unwrap();

    let flagged = service.set_starred(starred.note_id, true).unwrap();
    assert!(flagged.starred);

    let listed = service
        .list_notes(NoteListQuery {
            starred_only: true,
            ..NoteListQuery::default()
        })
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].note_id, starred.note_id);
}

#[test]
fn trash_hides_note_and_restore_brings_it_back() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);
    let created = service.create_note("disposable", "body").unwrap();

    service.trash_note(created.note_id).unwrap();
    assert!(service.get_note(created.note_id).unwrap().is_none());

    let trashed = service
        .list_notes(NoteListQuery {
            visibility: NoteVisibility::Trashed,
            ..NoteListQuery::default()
        })
        .unwrap();
    assert_eq!(trashed.items.len(), 1);
    assert_eq!(trashed.items[0].note_id, created.note_id);

    let restored = service.restore_note(created.note_id).unwrap();
    assert_eq!(restored.note_id, created.note_id);
    assert!(service.get_note(created.note_id).unwrap().is_some());
}

#[test]
fn trashing_twice_reports_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);
    let created = service.create_note("once", "body").unwrap();

    service.trash_note(created.note_id).unwrap();
    let err = service.trash_note(created.note_id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
}

#[test]
fn updating_trashed_note_reports_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);
    let created = service.create_note("gone", "body").unwrap();
    service.trash_note(created.note_id).unwrap();

    let err = service
        .update_note(created.note_id, "new title", "new body")
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
}

#[test]
fn list_limit_is_normalized_and_reported() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);
    for index in 0..3 {
        service
            .create_note(format!("note {index}"), "body")
            .unwrap();
    }

    let default_limit = service.list_notes(NoteListQuery::default()).unwrap();
    assert_eq!(default_limit.applied_limit, 20);

    let clamped = service
        .list_notes(NoteListQuery {
            limit: Some(10_000),
            ..NoteListQuery::default()
        })
        .unwrap();
    assert_eq!(clamped.applied_limit, 100);

    let capped = service
        .list_notes(NoteListQuery {
            limit: Some(2),
            ..NoteListQuery::default()
        })
        .unwrap();
    assert_eq!(capped.items.len(), 2);
}
