//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record (title + markdown body).
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another note.
//! - `is_deleted` is the source of truth for tombstone (trash) state.

use crate::model::notebook::NotebookId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Canonical domain record for one note.
///
/// Timestamps are storage-owned and surfaced on read models; the write model
/// carries identity and user-editable fields only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID used for linking and auditing.
    pub uuid: NoteId,
    /// User-facing title shown in the sidebar.
    pub title: String,
    /// Raw markdown body.
    pub content: String,
    /// Owning notebook, if the note is filed under one.
    pub notebook: Option<NotebookId>,
    /// Starred notes surface in the sidebar shortcut list.
    pub starred: bool,
    /// Soft delete tombstone backing the trash view.
    pub is_deleted: bool,
}

impl Note {
    /// Creates a new note with a generated stable ID.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            notebook: None,
            starred: false,
            is_deleted: false,
        }
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        uuid: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            uuid,
            title: title.into(),
            content: content.into(),
            notebook: None,
            starred: false,
            is_deleted: false,
        };
        note.validate()?;
        Ok(note)
    }

    /// Validates identity-level invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.uuid.is_nil() {
            return Err(NoteValidationError::NilUuid);
        }
        Ok(())
    }

    /// Moves this note to the trash.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Restores this note from the trash.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this note should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Note identity validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// The nil UUID is reserved and never a valid note identity.
    NilUuid,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "note uuid must not be nil"),
        }
    }
}

impl Error for NoteValidationError {}
