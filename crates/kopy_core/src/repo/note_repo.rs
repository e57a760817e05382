//! Note/tag repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide note persistence APIs (CRUD, star, notebook move, trash).
//! - Own tag-link replacement logic (`set_note_tags`) with atomic semantics.
//!
//! # Invariants
//! - Default queries are constrained to `is_deleted=0`; the trash view is an
//!   explicit visibility opt-in.
//! - `set_note_tags` replaces the whole tag set in a single transaction.
//! - Tag names are normalized to lowercase before persistence.

use crate::model::note::{Note, NoteId};
use crate::model::notebook::NotebookId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::collections::BTreeSet;
use uuid::Uuid;

const NOTES_DEFAULT_LIMIT: u32 = 20;
const NOTES_LIMIT_MAX: u32 = 100;

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    content,
    notebook_uuid,
    starred,
    is_deleted,
    created_at,
    updated_at
FROM notes";

/// Read model for note list/detail use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    /// Stable note id.
    pub note_id: NoteId,
    /// User-facing title.
    pub title: String,
    /// Raw markdown source text.
    pub content: String,
    /// Owning notebook, when filed.
    pub notebook: Option<NotebookId>,
    /// Starred flag.
    pub starred: bool,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Update timestamp in epoch milliseconds.
    pub updated_at: i64,
    /// Note tags, normalized to lowercase.
    pub tags: Vec<String>,
}

/// Which tombstone state a list query targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteVisibility {
    /// Live notes (the default everywhere except the trash view).
    #[default]
    Active,
    /// Soft-deleted notes shown in the trash view.
    Trashed,
}

/// Query options for note list use-cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListQuery {
    /// Optional notebook filter.
    pub notebook: Option<NotebookId>,
    /// Optional single-tag exact match filter.
    pub tag: Option<String>,
    /// Restrict to starred notes.
    pub starred_only: bool,
    /// Active vs trashed rows.
    pub visibility: NoteVisibility,
    /// Maximum rows to return. Defaults to 20 and clamps to 100.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Creates one note and returns its stable id.
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title and body of an active note.
    fn update_note_content(&self, note_id: NoteId, title: &str, content: &str) -> RepoResult<()>;
    /// Gets one active note by id.
    fn get_note(&self, note_id: NoteId) -> RepoResult<Option<NoteRecord>>;
    /// Lists notes using filters + pagination.
    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<NoteRecord>>;
    /// Replaces all tags for the given note in one transaction.
    fn set_note_tags(&mut self, note_id: NoteId, tags: &[String]) -> RepoResult<()>;
    /// Returns all known tags sorted by name.
    fn list_tags(&self) -> RepoResult<Vec<String>>;
    /// Sets the starred flag on an active note.
    fn set_starred(&self, note_id: NoteId, starred: bool) -> RepoResult<()>;
    /// Files an active note under a notebook (or un-files it).
    fn move_to_notebook(&self, note_id: NoteId, notebook: Option<NotebookId>) -> RepoResult<()>;
    /// Soft-deletes an active note (moves it to trash).
    fn trash_note(&self, note_id: NoteId) -> RepoResult<()>;
    /// Restores a trashed note.
    fn restore_note(&self, note_id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn.execute(
            "INSERT INTO notes (uuid, title, content, notebook_uuid, starred, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.uuid.to_string(),
                note.title.as_str(),
                note.content.as_str(),
                note.notebook.map(|id| id.to_string()),
                bool_to_int(note.starred),
                bool_to_int(note.is_deleted),
            ],
        )?;

        Ok(note.uuid)
    }

    fn update_note_content(&self, note_id: NoteId, title: &str, content: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                content = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![note_id.to_string(), title, content],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note_id));
        }

        Ok(())
    }

    fn get_note(&self, note_id: NoteId) -> RepoResult<Option<NoteRecord>> {
        let uuid = note_id.to_string();
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE uuid = ?1
               AND is_deleted = 0;"
        ))?;

        let mut rows = stmt.query([uuid.as_str()])?;
        if let Some(row) = rows.next()? {
            let mut record = parse_note_row(row)?;
            record.tags = load_tags_for_note(self.conn, uuid.as_str())?;
            return Ok(Some(record));
        }

        Ok(None)
    }

    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<NoteRecord>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE is_deleted = ?");
        let mut bind_values: Vec<Value> = vec![Value::Integer(match query.visibility {
            NoteVisibility::Active => 0,
            NoteVisibility::Trashed => 1,
        })];

        if let Some(notebook) = query.notebook {
            sql.push_str(" AND notebook_uuid = ?");
            bind_values.push(Value::Text(notebook.to_string()));
        }

        if query.starred_only {
            sql.push_str(" AND starred = 1");
        }

        if let Some(tag) = query.tag.as_ref() {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM note_tags nt
                    INNER JOIN tags t ON t.id = nt.tag_id
                    WHERE nt.note_uuid = notes.uuid
                      AND t.name = ? COLLATE NOCASE
                )",
            );
            bind_values.push(Value::Text(tag.clone()));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");
        let limit = normalize_note_limit(query.limit);
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if query.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = parse_note_row(row)?;
            record.tags = load_tags_for_note(self.conn, record.note_id.to_string().as_str())?;
            notes.push(record);
        }

        Ok(notes)
    }

    fn set_note_tags(&mut self, note_id: NoteId, tags: &[String]) -> RepoResult<()> {
        let note_id_text = note_id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !note_exists_in_tx(&tx, note_id_text.as_str())? {
            return Err(RepoError::NotFound(note_id));
        }

        tx.execute(
            "DELETE FROM note_tags WHERE note_uuid = ?1;",
            [note_id_text.as_str()],
        )?;

        for tag in tags {
            tx.execute(
                "INSERT OR IGNORE INTO tags (name) VALUES (?1);",
                [tag.as_str()],
            )?;
            tx.execute(
                "INSERT INTO note_tags (note_uuid, tag_id)
                 SELECT ?1, id
                 FROM tags
                 WHERE name = ?2 COLLATE NOCASE;",
                params![note_id_text.as_str(), tag.as_str()],
            )?;
        }

        tx.execute(
            "UPDATE notes
             SET updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            [note_id_text.as_str()],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn list_tags(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM tags ORDER BY name COLLATE NOCASE ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get("name")?;
            tags.push(value.to_lowercase());
        }
        Ok(tags)
    }

    fn set_starred(&self, note_id: NoteId, starred: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET starred = ?2
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![note_id.to_string(), bool_to_int(starred)],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note_id));
        }

        Ok(())
    }

    fn move_to_notebook(&self, note_id: NoteId, notebook: Option<NotebookId>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET notebook_uuid = ?2
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![note_id.to_string(), notebook.map(|id| id.to_string())],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note_id));
        }

        Ok(())
    }

    fn trash_note(&self, note_id: NoteId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET is_deleted = 1
             WHERE uuid = ?1
               AND is_deleted = 0;",
            [note_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note_id));
        }

        Ok(())
    }

    fn restore_note(&self, note_id: NoteId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET is_deleted = 0
             WHERE uuid = ?1
               AND is_deleted = 1;",
            [note_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note_id));
        }

        Ok(())
    }
}

/// Normalizes list limit according to the notes contract.
pub fn normalize_note_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => NOTES_DEFAULT_LIMIT,
        Some(value) if value > NOTES_LIMIT_MAX => NOTES_LIMIT_MAX,
        Some(value) => value,
        None => NOTES_DEFAULT_LIMIT,
    }
}

/// Normalizes one tag value according to the notes contract.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates tag values.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            unique.insert(value);
        }
    }
    unique.into_iter().collect()
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<NoteRecord> {
    let uuid_text: String = row.get("uuid")?;
    let note_id = parse_uuid(&uuid_text, "notes.uuid")?;

    let notebook = match row.get::<_, Option<String>>("notebook_uuid")? {
        Some(value) => Some(parse_uuid(&value, "notes.notebook_uuid")?),
        None => None,
    };

    Ok(NoteRecord {
        note_id,
        title: row.get("title")?,
        content: row.get("content")?,
        notebook,
        starred: parse_flag(row.get("starred")?, "notes.starred")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        tags: Vec::new(),
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn parse_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

fn load_tags_for_note(conn: &Connection, note_uuid: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT t.name
         FROM note_tags nt
         INNER JOIN tags t ON t.id = nt.tag_id
         WHERE nt.note_uuid = ?1
         ORDER BY t.name COLLATE NOCASE ASC;",
    )?;
    let mut rows = stmt.query([note_uuid])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        tags.push(value.to_lowercase());
    }
    Ok(tags)
}

fn note_exists_in_tx(tx: &Transaction<'_>, note_uuid: &str) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM notes
            WHERE uuid = ?1
              AND is_deleted = 0
        );",
        [note_uuid],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in ["notes", "tags", "note_tags"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in ["uuid", "title", "content", "starred", "is_deleted"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    for column in ["note_uuid", "tag_id"] {
        if !table_has_column(conn, "note_tags", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "note_tags",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &'static str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
