//! Persisted plugin enablement state.
//!
//! # Responsibility
//! - Store per-plugin enabled/disabled toggles in the `plugin_states` table.
//!
//! # Invariants
//! - Only plugins known to the registry can be toggled.
//! - Plugins without stored state fall back to their catalog default.

use crate::db::DbError;
use crate::plugin::registry::PluginRegistry;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Plugin state persistence errors.
#[derive(Debug)]
pub enum PluginStateError {
    /// Toggle target is not present in the registry.
    UnknownPlugin(String),
    Db(DbError),
}

impl Display for PluginStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPlugin(id) => write!(f, "unknown plugin id: {id}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PluginStateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownPlugin(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for PluginStateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Loads raw stored toggles keyed by plugin id.
pub fn load_plugin_states(conn: &Connection) -> Result<BTreeMap<String, bool>, PluginStateError> {
    let mut stmt = conn.prepare("SELECT plugin_id, enabled FROM plugin_states;")?;
    let mut rows = stmt.query([])?;
    let mut states = BTreeMap::new();
    while let Some(row) = rows.next()? {
        let plugin_id: String = row.get(0)?;
        let enabled: i64 = row.get(1)?;
        states.insert(plugin_id, enabled != 0);
    }
    Ok(states)
}

/// Persists one toggle after verifying the plugin is registered.
pub fn set_plugin_enabled(
    conn: &Connection,
    registry: &PluginRegistry,
    plugin_id: &str,
    enabled: bool,
) -> Result<(), PluginStateError> {
    if registry.get(plugin_id).is_none() {
        return Err(PluginStateError::UnknownPlugin(plugin_id.to_string()));
    }

    conn.execute(
        "INSERT INTO plugin_states (plugin_id, enabled)
         VALUES (?1, ?2)
         ON CONFLICT(plugin_id) DO UPDATE SET enabled = excluded.enabled;",
        params![plugin_id, i64::from(enabled)],
    )?;
    Ok(())
}

/// Effective enablement for every registered plugin.
///
/// Stored toggles win; plugins without stored state use their catalog
/// default.
pub fn effective_plugin_states(
    conn: &Connection,
    registry: &PluginRegistry,
) -> Result<BTreeMap<String, bool>, PluginStateError> {
    let stored = load_plugin_states(conn)?;
    let mut states = BTreeMap::new();
    for plugin in registry.list() {
        let id = plugin.manifest.id.clone();
        let enabled = stored.get(id.as_str()).copied().unwrap_or(plugin.default_enabled);
        states.insert(id, enabled);
    }
    Ok(states)
}
