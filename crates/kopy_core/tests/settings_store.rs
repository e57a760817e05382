use kopy_core::db::open_db_in_memory;
use kopy_core::settings::store::SETTINGS_KEY;
use kopy_core::{load_settings, save_settings, AppSettings, ThemePreference};
use rusqlite::params;

#[test]
fn first_load_returns_defaults() {
    let conn = open_db_in_memory().unwrap();
    let settings = load_settings(&conn).unwrap();
    assert_eq!(settings, AppSettings::default());
    assert_eq!(settings.theme, ThemePreference::System);
    assert!(settings.sync_enabled);
}

#[test]
fn save_then_load_round_trips_document() {
    let conn = open_db_in_memory().unwrap();
    let settings = AppSettings {
        theme: ThemePreference::Dark,
        notifications_enabled: true,
        sync_enabled: false,
    };

    save_settings(&conn, &settings).unwrap();
    let loaded = load_settings(&conn).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn save_replaces_previous_document() {
    let conn = open_db_in_memory().unwrap();
    save_settings(
        &conn,
        &AppSettings {
            theme: ThemePreference::Light,
            ..AppSettings::default()
        },
    )
    .unwrap();
    save_settings(
        &conn,
        &AppSettings {
            theme: ThemePreference::Dark,
            ..AppSettings::default()
        },
    )
    .unwrap();

    let loaded = load_settings(&conn).unwrap();
    assert_eq!(loaded.theme, ThemePreference::Dark);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM settings;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn corrupt_document_falls_back_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2);",
        params![SETTINGS_KEY, "{not json"],
    )
    .unwrap();

    let loaded = load_settings(&conn).unwrap();
    assert_eq!(loaded, AppSettings::default());
}

#[test]
fn unknown_fields_in_stored_document_are_tolerated() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2);",
        params![
            SETTINGS_KEY,
            r#"{"theme":"dark","legacy_editor_font":"mono"}"#
        ],
    )
    .unwrap();

    let loaded = load_settings(&conn).unwrap();
    assert_eq!(loaded.theme, ThemePreference::Dark);
    assert!(loaded.sync_enabled);
}
