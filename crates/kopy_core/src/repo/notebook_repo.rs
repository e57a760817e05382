//! Notebook repository contract and SQLite implementation.

use crate::model::notebook::{Notebook, NotebookId, NotebookValidationError};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Repository interface for notebook operations.
pub trait NotebookRepository {
    /// Creates one notebook and returns its stable id.
    fn create_notebook(&self, notebook: &Notebook) -> RepoResult<NotebookId>;
    /// Lists all notebooks sorted by name.
    fn list_notebooks(&self) -> RepoResult<Vec<Notebook>>;
    /// Renames one notebook.
    fn rename_notebook(&self, notebook_id: NotebookId, name: &str) -> RepoResult<()>;
}

/// SQLite-backed notebook repository.
pub struct SqliteNotebookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotebookRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NotebookRepository for SqliteNotebookRepository<'_> {
    fn create_notebook(&self, notebook: &Notebook) -> RepoResult<NotebookId> {
        notebook.validate()?;

        self.conn.execute(
            "INSERT INTO notebooks (uuid, name) VALUES (?1, ?2);",
            params![notebook.uuid.to_string(), notebook.name.as_str()],
        )?;

        Ok(notebook.uuid)
    }

    fn list_notebooks(&self) -> RepoResult<Vec<Notebook>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, name FROM notebooks ORDER BY name COLLATE NOCASE ASC;")?;
        let mut rows = stmt.query([])?;
        let mut notebooks = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid uuid value `{uuid_text}` in notebooks.uuid"
                ))
            })?;
            notebooks.push(Notebook {
                uuid,
                name: row.get("name")?,
            });
        }
        Ok(notebooks)
    }

    fn rename_notebook(&self, notebook_id: NotebookId, name: &str) -> RepoResult<()> {
        if name.trim().is_empty() {
            return Err(RepoError::NotebookValidation(
                NotebookValidationError::EmptyName,
            ));
        }

        let changed = self.conn.execute(
            "UPDATE notebooks SET name = ?2 WHERE uuid = ?1;",
            params![notebook_id.to_string(), name],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(notebook_id));
        }

        Ok(())
    }
}
