//! Core domain logic for Kopy.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod notify;
pub mod plugin;
pub mod repo;
pub mod search;
pub mod service;
pub mod settings;

pub use logging::{default_log_level, init_logging, logging_status};
pub use markdown::export::{export_file_name, html_document, ExportFormat};
pub use markdown::renderer::render_markdown;
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::notebook::{Notebook, NotebookId, NotebookValidationError};
pub use notify::toast::{Toast, ToastId, ToastQueue};
pub use plugin::manifest::{ManifestEntrypoints, ManifestValidationError, PluginManifest};
pub use plugin::registry::{
    builtin_catalog, FirstPartyPluginAdapter, PluginAdapter, PluginRegistry, PluginRegistryError,
    PluginSource, RegisteredPlugin,
};
pub use plugin::state::{
    effective_plugin_states, load_plugin_states, set_plugin_enabled, PluginStateError,
};
pub use repo::note_repo::{
    NoteListQuery, NoteRecord, NoteRepository, NoteVisibility, SqliteNoteRepository,
};
pub use repo::notebook_repo::{NotebookRepository, SqliteNotebookRepository};
pub use repo::{RepoError, RepoResult};
pub use search::fts::{search_notes, SearchError, SearchHit, SearchQuery, SearchResult};
pub use service::note_service::{
    NoteExport, NoteService, NoteServiceError, NotesListResult, RenderedNote, DEFAULT_NOTE_TITLE,
};
pub use settings::store::{load_settings, save_settings, AppSettings, SettingsError, ThemePreference};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
