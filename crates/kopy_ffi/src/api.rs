//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI shell via FRB.
//! - Keep error semantics simple for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Return values are UTF-8 strings/envelopes with stable meaning.

use kopy_core::db::open_db;
use kopy_core::{
    core_version as core_version_inner, export_file_name, html_document,
    init_logging as init_logging_inner, ping as ping_inner, render_markdown as render_inner,
    search_notes, ExportFormat, NoteListQuery, NoteRecord, NoteService, NoteVisibility,
    SearchQuery, SqliteNoteRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const ENTRY_DEFAULT_LIMIT: u32 = 20;
const ENTRY_LIMIT_MAX: u32 = 50;
const ENTRY_DB_FILE_NAME: &str = "kopy_entry.sqlite3";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Renders a markdown string to an HTML fragment for the preview panel.
///
/// # FFI contract
/// - Sync call, CPU-only, total over all inputs.
/// - Never panics; empty input yields an empty string.
#[flutter_rust_bridge::frb(sync)]
pub fn render_markdown(source: String) -> String {
    render_inner(source.as_str())
}

/// Export artifact for the export menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Sanitized download file name including extension.
    pub file_name: String,
    /// Media type matching the export format.
    pub media_type: String,
    /// Artifact body.
    pub body: String,
}

/// Builds a standalone HTML export document from title + markdown.
///
/// # FFI contract
/// - Sync call, CPU-only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn export_html(title: String, source: String) -> ExportArtifact {
    let fragment = render_inner(source.as_str());
    ExportArtifact {
        file_name: export_file_name(title.as_str(), ExportFormat::Html),
        media_type: ExportFormat::Html.media_type().to_string(),
        body: html_document(title.as_str(), fragment.as_str()),
    }
}

/// Note item returned by list/search envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    /// Stable note ID in string form.
    pub note_id: String,
    /// User-facing title.
    pub title: String,
    /// Starred flag.
    pub starred: bool,
    /// Update timestamp in epoch milliseconds.
    pub updated_at: i64,
    /// Lowercase tag names.
    pub tags: Vec<String>,
}

/// List response envelope for the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    /// Items sorted by `updated_at DESC, uuid ASC`.
    pub items: Vec<NoteListItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
    /// Effective applied list limit.
    pub applied_limit: u32,
}

/// Search item returned by the search envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSearchItem {
    /// Stable note ID in string form.
    pub note_id: String,
    /// Note title.
    pub title: String,
    /// Short snippet summary for result display.
    pub snippet: String,
}

/// Search response envelope for the sidebar search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSearchResponse {
    /// Search results (empty when no hits).
    pub items: Vec<NoteSearchItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
    /// Effective applied search limit.
    pub applied_limit: u32,
}

/// Generic action response envelope for note mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Optional affected note ID.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: String) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Creates one note from title + markdown content.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result and created note ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(title: String, content: String) -> NoteActionResponse {
    match with_note_service(|service| {
        service
            .create_note(title.trim().to_string(), content)
            .map_err(|err| err.to_string())
    }) {
        Ok(record) => NoteActionResponse::success("Note created.", record.note_id.to_string()),
        Err(err) => NoteActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Creates a blank note with the default title and starter template.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create_untitled() -> NoteActionResponse {
    match with_note_service(|service| service.create_untitled().map_err(|err| err.to_string())) {
        Ok(record) => NoteActionResponse::success("Note created.", record.note_id.to_string()),
        Err(err) => NoteActionResponse::failure(format!("note_create_untitled failed: {err}")),
    }
}

/// Replaces title and content of one note.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(note_id: String, title: String, content: String) -> NoteActionResponse {
    let Some(parsed_id) = parse_note_id(note_id.as_str()) else {
        return NoteActionResponse::failure(format!("invalid note id: {note_id}"));
    };
    match with_note_service(|service| {
        service
            .update_note(parsed_id, title, content)
            .map_err(|err| err.to_string())
    }) {
        Ok(record) => NoteActionResponse::success("Note updated.", record.note_id.to_string()),
        Err(err) => NoteActionResponse::failure(format!("note_update failed: {err}")),
    }
}

/// Sets the starred flag on one note.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_set_starred(note_id: String, starred: bool) -> NoteActionResponse {
    let Some(parsed_id) = parse_note_id(note_id.as_str()) else {
        return NoteActionResponse::failure(format!("invalid note id: {note_id}"));
    };
    match with_note_service(|service| {
        service
            .set_starred(parsed_id, starred)
            .map_err(|err| err.to_string())
    }) {
        Ok(record) => NoteActionResponse::success("Note updated.", record.note_id.to_string()),
        Err(err) => NoteActionResponse::failure(format!("note_set_starred failed: {err}")),
    }
}

/// Moves one note to the trash.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_trash(note_id: String) -> NoteActionResponse {
    let Some(parsed_id) = parse_note_id(note_id.as_str()) else {
        return NoteActionResponse::failure(format!("invalid note id: {note_id}"));
    };
    match with_note_service(|service| {
        service
            .trash_note(parsed_id)
            .map(|()| parsed_id)
            .map_err(|err| err.to_string())
    }) {
        Ok(id) => NoteActionResponse::success("Note moved to trash.", id.to_string()),
        Err(err) => NoteActionResponse::failure(format!("note_trash failed: {err}")),
    }
}

/// Lists notes for the sidebar with optional starred filter.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures yield an empty list plus a message.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(starred_only: bool, limit: Option<u32>) -> NotesListResponse {
    let applied_limit = normalize_entry_limit(limit);
    let query = NoteListQuery {
        starred_only,
        visibility: NoteVisibility::Active,
        limit: Some(applied_limit),
        ..NoteListQuery::default()
    };

    match with_note_service(|service| service.list_notes(query).map_err(|err| err.to_string())) {
        Ok(result) => NotesListResponse {
            items: result.items.into_iter().map(to_note_list_item).collect(),
            message: "ok".to_string(),
            applied_limit,
        },
        Err(err) => NotesListResponse {
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
            applied_limit,
        },
    }
}

/// Searches notes for the sidebar search box.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures yield an empty list plus a message.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_search(text: String, limit: Option<u32>) -> NoteSearchResponse {
    let applied_limit = normalize_entry_limit(limit);
    let db_path = resolve_entry_db_path();

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            return NoteSearchResponse {
                items: Vec::new(),
                message: format!("notes_search failed: entry DB open failed: {err}"),
                applied_limit,
            };
        }
    };

    let mut query = SearchQuery::new(text);
    query.limit = applied_limit;
    match search_notes(&conn, &query) {
        Ok(hits) => NoteSearchResponse {
            items: hits
                .into_iter()
                .map(|hit| NoteSearchItem {
                    note_id: hit.note_id.to_string(),
                    title: hit.title,
                    snippet: hit.snippet,
                })
                .collect(),
            message: "ok".to_string(),
            applied_limit,
        },
        Err(err) => NoteSearchResponse {
            items: Vec::new(),
            message: format!("notes_search failed: {err}"),
            applied_limit,
        },
    }
}

fn normalize_entry_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => ENTRY_DEFAULT_LIMIT,
        Some(value) if value > ENTRY_LIMIT_MAX => ENTRY_LIMIT_MAX,
        Some(value) => value,
        None => ENTRY_DEFAULT_LIMIT,
    }
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("KOPY_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
        })
        .clone()
}

fn parse_note_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

fn with_note_service<T>(
    f: impl FnOnce(&mut NoteService<SqliteNoteRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_entry_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("entry DB open failed: {err}"))?;
    let repo = SqliteNoteRepository::try_new(&mut conn)
        .map_err(|err| format!("entry repo init failed: {err}"))?;
    let mut service = NoteService::new(repo);
    f(&mut service)
}

fn to_note_list_item(record: NoteRecord) -> NoteListItem {
    NoteListItem {
        note_id: record.note_id.to_string(),
        title: record.title,
        starred: record.starred,
        updated_at: record.updated_at,
        tags: record.tags,
    }
}
