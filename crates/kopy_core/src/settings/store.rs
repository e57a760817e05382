//! Typed app settings persisted as one JSON document.
//!
//! # Responsibility
//! - Load/save `AppSettings` in the `settings` key/value table.
//!
//! # Invariants
//! - Missing or corrupt stored JSON falls back to defaults (never an error).
//! - Unknown/missing fields in stored JSON are tolerated on load.

use crate::db::DbError;
use log::warn;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the settings document.
pub const SETTINGS_KEY: &str = "app_settings";

/// Preferred UI theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow the platform theme.
    #[default]
    System,
}

/// User-tunable application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Theme preference applied by the UI shell.
    pub theme: ThemePreference,
    /// Whether desktop notifications are enabled.
    pub notifications_enabled: bool,
    /// Whether background sync is enabled.
    pub sync_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            notifications_enabled: false,
            sync_enabled: true,
        }
    }
}

/// Settings persistence errors.
#[derive(Debug)]
pub enum SettingsError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize settings: {err}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for SettingsError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SettingsError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Loads settings, falling back to defaults when absent or corrupt.
///
/// Corrupt stored JSON is logged and replaced by defaults rather than
/// surfaced as an error, so a damaged row can never lock the user out of
/// the settings screen.
pub fn load_settings(conn: &Connection) -> Result<AppSettings, SettingsError> {
    let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1;")?;
    let mut rows = stmt.query([SETTINGS_KEY])?;

    let Some(row) = rows.next()? else {
        return Ok(AppSettings::default());
    };
    let raw: String = row.get(0)?;

    match serde_json::from_str::<AppSettings>(&raw) {
        Ok(settings) => Ok(settings),
        Err(err) => {
            warn!(
                "event=settings_load module=settings status=fallback error_code=corrupt_document error={err}"
            );
            Ok(AppSettings::default())
        }
    }
}

/// Saves the full settings document, replacing any previous value.
pub fn save_settings(conn: &Connection, settings: &AppSettings) -> Result<(), SettingsError> {
    let value = serde_json::to_string(settings).map_err(SettingsError::Serialize)?;
    conn.execute(
        "INSERT INTO settings (key, value)
         VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        params![SETTINGS_KEY, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AppSettings, ThemePreference};

    #[test]
    fn defaults_match_first_run_contract() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme, ThemePreference::System);
        assert!(!settings.notifications_enabled);
        assert!(settings.sync_enabled);
    }

    #[test]
    fn theme_serializes_snake_case() {
        let json = serde_json::to_value(ThemePreference::Dark).unwrap();
        assert_eq!(json, "dark");
    }

    #[test]
    fn partial_document_fills_missing_fields_with_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(settings.theme, ThemePreference::Light);
        assert!(settings.sync_enabled);
    }
}
