//! Note use-case service.
//!
//! # Responsibility
//! - Provide note-specific create/update/star/move/tag/trash/list APIs.
//! - Feed the markdown renderer for preview and export projections.
//!
//! # Invariants
//! - `update_note` uses full content replacement semantics.
//! - Note list is always sorted by `updated_at DESC, uuid ASC`.
//! - Tag names are normalized to lowercase and deduplicated.

use crate::markdown::export::{export_file_name, html_document, ExportFormat};
use crate::markdown::renderer::render_markdown;
use crate::model::note::{Note, NoteId};
use crate::model::notebook::NotebookId;
use crate::repo::note_repo::{
    normalize_note_limit, normalize_tag, normalize_tags, NoteListQuery, NoteRecord, NoteRepository,
};
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title applied by the "New Note" action before the user renames it.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled Note";

const NEW_NOTE_TEMPLATE: &str = "# New Note\n\nStart writing your thoughts here...";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Tag input contains empty values.
    InvalidTag(String),
    /// Target note does not exist (or is not in the expected trash state).
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::NoteNotFound(note_id) => write!(f, "note not found: {note_id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResult {
    /// List items sorted by `updated_at DESC, uuid ASC`.
    pub items: Vec<NoteRecord>,
    /// Effective normalized limit used by the query.
    pub applied_limit: u32,
}

/// Rendered preview projection for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    /// Stable note id.
    pub note_id: NoteId,
    /// Note title at render time.
    pub title: String,
    /// HTML fragment produced by the markdown renderer.
    pub html: String,
}

/// Export artifact for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteExport {
    /// Sanitized download file name including extension.
    pub file_name: String,
    /// Media type matching the export format.
    pub media_type: &'static str,
    /// Artifact body (raw markdown or a standalone HTML document).
    pub body: String,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note from title and markdown content.
    pub fn create_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<NoteRecord, NoteServiceError> {
        let note = Note::new(title, content);
        let note_id = self.repo.create_note(&note)?;
        self.repo
            .get_note(note_id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Creates a blank note with the default title and starter template.
    pub fn create_untitled(&self) -> Result<NoteRecord, NoteServiceError> {
        self.create_note(DEFAULT_NOTE_TITLE, NEW_NOTE_TEMPLATE)
    }

    /// Replaces note title and content fully.
    pub fn update_note(
        &self,
        note_id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<NoteRecord, NoteServiceError> {
        let title = title.into();
        let content = content.into();
        self.repo
            .update_note_content(note_id, title.as_str(), content.as_str())?;
        self.read_back(note_id, "updated note not found in read-back")
    }

    /// Sets the starred flag.
    pub fn set_starred(
        &self,
        note_id: NoteId,
        starred: bool,
    ) -> Result<NoteRecord, NoteServiceError> {
        self.repo.set_starred(note_id, starred)?;
        self.read_back(note_id, "starred note not found in read-back")
    }

    /// Files the note under a notebook, or un-files it.
    pub fn move_to_notebook(
        &self,
        note_id: NoteId,
        notebook: Option<NotebookId>,
    ) -> Result<NoteRecord, NoteServiceError> {
        self.repo.move_to_notebook(note_id, notebook)?;
        self.read_back(note_id, "moved note not found in read-back")
    }

    /// Atomically replaces the full tag set for one note.
    pub fn set_note_tags(
        &mut self,
        note_id: NoteId,
        tags: Vec<String>,
    ) -> Result<NoteRecord, NoteServiceError> {
        for tag in &tags {
            if tag.trim().is_empty() {
                return Err(NoteServiceError::InvalidTag(tag.clone()));
            }
        }

        let normalized = normalize_tags(&tags);
        self.repo.set_note_tags(note_id, &normalized)?;
        self.read_back(note_id, "note missing after tag replacement")
    }

    /// Moves one note to the trash.
    pub fn trash_note(&self, note_id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.trash_note(note_id)?;
        Ok(())
    }

    /// Restores one note from the trash.
    pub fn restore_note(&self, note_id: NoteId) -> Result<NoteRecord, NoteServiceError> {
        self.repo.restore_note(note_id)?;
        self.read_back(note_id, "restored note not found in read-back")
    }

    /// Gets one active note by stable ID.
    pub fn get_note(&self, note_id: NoteId) -> RepoResult<Option<NoteRecord>> {
        self.repo.get_note(note_id)
    }

    /// Lists notes after normalizing tag filter and limit.
    pub fn list_notes(&self, mut query: NoteListQuery) -> Result<NotesListResult, NoteServiceError> {
        let applied_limit = normalize_note_limit(query.limit);
        query.tag = query.tag.and_then(|value| normalize_tag(value.as_str()));
        query.limit = Some(applied_limit);
        let items = self.repo.list_notes(&query)?;
        Ok(NotesListResult {
            items,
            applied_limit,
        })
    }

    /// Lists normalized tags known by storage.
    pub fn list_tags(&self) -> RepoResult<Vec<String>> {
        self.repo.list_tags()
    }

    /// Renders one note's markdown body for the preview surfaces.
    pub fn render_note(&self, note_id: NoteId) -> Result<RenderedNote, NoteServiceError> {
        let record = self
            .repo
            .get_note(note_id)?
            .ok_or(NoteServiceError::NoteNotFound(note_id))?;
        Ok(RenderedNote {
            note_id: record.note_id,
            html: render_markdown(record.content.as_str()),
            title: record.title,
        })
    }

    /// Builds an export artifact for one note.
    ///
    /// Markdown exports pass the body through unchanged; HTML exports wrap
    /// the rendered fragment in the standalone document shell.
    pub fn export_note(
        &self,
        note_id: NoteId,
        format: ExportFormat,
    ) -> Result<NoteExport, NoteServiceError> {
        let record = self
            .repo
            .get_note(note_id)?
            .ok_or(NoteServiceError::NoteNotFound(note_id))?;

        let body = match format {
            ExportFormat::Markdown => record.content.clone(),
            ExportFormat::Html => html_document(
                record.title.as_str(),
                render_markdown(record.content.as_str()).as_str(),
            ),
        };

        Ok(NoteExport {
            file_name: export_file_name(record.title.as_str(), format),
            media_type: format.media_type(),
            body,
        })
    }

    fn read_back(
        &self,
        note_id: NoteId,
        details: &'static str,
    ) -> Result<NoteRecord, NoteServiceError> {
        self.repo
            .get_note(note_id)?
            .ok_or(NoteServiceError::InconsistentState(details))
    }
}
