//! Notebook domain model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every notebook.
pub type NotebookId = Uuid;

/// Named container grouping notes in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    /// Stable global ID.
    pub uuid: NotebookId,
    /// Display name; must not be blank.
    pub name: String,
}

impl Notebook {
    /// Creates a new notebook with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Result<Self, NotebookValidationError> {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a notebook with a caller-provided stable ID.
    pub fn with_id(
        uuid: NotebookId,
        name: impl Into<String>,
    ) -> Result<Self, NotebookValidationError> {
        let notebook = Self {
            uuid,
            name: name.into(),
        };
        notebook.validate()?;
        Ok(notebook)
    }

    /// Validates notebook invariants.
    pub fn validate(&self) -> Result<(), NotebookValidationError> {
        if self.uuid.is_nil() {
            return Err(NotebookValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(NotebookValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Notebook validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookValidationError {
    /// The nil UUID is reserved and never a valid notebook identity.
    NilUuid,
    /// Notebook names must contain at least one non-whitespace character.
    EmptyName,
}

impl Display for NotebookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "notebook uuid must not be nil"),
            Self::EmptyName => write!(f, "notebook name must not be blank"),
        }
    }
}

impl Error for NotebookValidationError {}
