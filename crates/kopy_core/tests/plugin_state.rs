use kopy_core::db::open_db_in_memory;
use kopy_core::{
    effective_plugin_states, load_plugin_states, set_plugin_enabled, PluginRegistry,
    PluginStateError,
};

fn registry_with_catalog() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry
        .register_builtin_catalog()
        .expect("builtin catalog registration");
    registry
}

#[test]
fn effective_states_start_from_catalog_defaults() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry_with_catalog();

    let states = effective_plugin_states(&conn, &registry).unwrap();
    assert_eq!(states.len(), 4);
    assert_eq!(states.get("builtin.grammar-check"), Some(&true));
    assert_eq!(states.get("builtin.ai-summarizer"), Some(&true));
    assert_eq!(states.get("builtin.thesaurus"), Some(&false));
    assert_eq!(states.get("builtin.pdf-export"), Some(&true));
}

#[test]
fn stored_toggle_overrides_catalog_default() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry_with_catalog();

    set_plugin_enabled(&conn, &registry, "builtin.grammar-check", false).unwrap();
    set_plugin_enabled(&conn, &registry, "builtin.thesaurus", true).unwrap();

    let states = effective_plugin_states(&conn, &registry).unwrap();
    assert_eq!(states.get("builtin.grammar-check"), Some(&false));
    assert_eq!(states.get("builtin.thesaurus"), Some(&true));
    // Untouched plugins keep their defaults.
    assert_eq!(states.get("builtin.pdf-export"), Some(&true));
}

#[test]
fn toggling_same_plugin_twice_keeps_latest_value() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry_with_catalog();

    set_plugin_enabled(&conn, &registry, "builtin.pdf-export", false).unwrap();
    set_plugin_enabled(&conn, &registry, "builtin.pdf-export", true).unwrap();

    let stored = load_plugin_states(&conn).unwrap();
    assert_eq!(stored.get("builtin.pdf-export"), Some(&true));
    assert_eq!(stored.len(), 1);
}

#[test]
fn unknown_plugin_toggle_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry_with_catalog();

    let err = set_plugin_enabled(&conn, &registry, "builtin.does-not-exist", true).unwrap_err();
    assert!(matches!(err, PluginStateError::UnknownPlugin(_)));

    let stored = load_plugin_states(&conn).unwrap();
    assert!(stored.is_empty());
}
