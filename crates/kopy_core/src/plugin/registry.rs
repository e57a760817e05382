//! Plugin registry contracts and first-party catalog.

use crate::plugin::manifest::{
    ManifestEntrypoints, ManifestValidationError, PluginManifest, CAPABILITY_ANALYZER,
    CAPABILITY_COMMAND, CAPABILITY_EXPORTER, CAPABILITY_UI_SLOT,
};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Internal source classification for one plugin registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginSource {
    FirstParty,
}

/// Registered plugin snapshot in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredPlugin {
    pub manifest: PluginManifest,
    pub source: PluginSource,
    /// Enablement applied when no stored state exists for this plugin.
    pub default_enabled: bool,
}

/// Adapter contract used by first-party modules to register plugins.
///
/// The current baseline is declaration-only: no dynamic runtime loading.
pub trait PluginAdapter {
    fn manifest(&self) -> &PluginManifest;
    fn source(&self) -> PluginSource;
    fn default_enabled(&self) -> bool;
}

/// First-party adapter wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstPartyPluginAdapter {
    manifest: PluginManifest,
    default_enabled: bool,
}

impl FirstPartyPluginAdapter {
    pub fn new(manifest: PluginManifest, default_enabled: bool) -> Self {
        Self {
            manifest,
            default_enabled,
        }
    }
}

impl PluginAdapter for FirstPartyPluginAdapter {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn source(&self) -> PluginSource {
        PluginSource::FirstParty
    }

    fn default_enabled(&self) -> bool {
        self.default_enabled
    }
}

/// Built-in plugin catalog shipped with the app.
pub fn builtin_catalog() -> Vec<FirstPartyPluginAdapter> {
    vec![
        FirstPartyPluginAdapter::new(
            PluginManifest {
                id: "builtin.grammar-check".to_string(),
                version: "0.1.0".to_string(),
                name: "Grammar Check".to_string(),
                description: "Checks your writing for grammatical errors.".to_string(),
                capabilities: vec![
                    CAPABILITY_ANALYZER.to_string(),
                    CAPABILITY_UI_SLOT.to_string(),
                ],
                entrypoints: ManifestEntrypoints {
                    init: Some("builtin.grammar.init".to_string()),
                    dispose: Some("builtin.grammar.dispose".to_string()),
                    health: Some("builtin.grammar.health".to_string()),
                    command_action: None,
                    analyzer: Some("builtin.grammar.analyze".to_string()),
                    exporter: None,
                    ui_slot: Some("builtin.grammar.ui.editor-gutter".to_string()),
                },
            },
            true,
        ),
        FirstPartyPluginAdapter::new(
            PluginManifest {
                id: "builtin.ai-summarizer".to_string(),
                version: "0.1.0".to_string(),
                name: "AI Summarizer".to_string(),
                description: "Uses AI to summarize long notes.".to_string(),
                capabilities: vec![
                    CAPABILITY_ANALYZER.to_string(),
                    CAPABILITY_COMMAND.to_string(),
                ],
                entrypoints: ManifestEntrypoints {
                    init: Some("builtin.summarizer.init".to_string()),
                    dispose: Some("builtin.summarizer.dispose".to_string()),
                    health: Some("builtin.summarizer.health".to_string()),
                    command_action: Some("builtin.summarizer.command.summarize".to_string()),
                    analyzer: Some("builtin.summarizer.analyze".to_string()),
                    exporter: None,
                    ui_slot: None,
                },
            },
            true,
        ),
        FirstPartyPluginAdapter::new(
            PluginManifest {
                id: "builtin.thesaurus".to_string(),
                version: "0.1.0".to_string(),
                name: "Thesaurus".to_string(),
                description: "Find synonyms and antonyms for words.".to_string(),
                capabilities: vec![CAPABILITY_COMMAND.to_string()],
                entrypoints: ManifestEntrypoints {
                    init: Some("builtin.thesaurus.init".to_string()),
                    dispose: Some("builtin.thesaurus.dispose".to_string()),
                    health: Some("builtin.thesaurus.health".to_string()),
                    command_action: Some("builtin.thesaurus.command.lookup".to_string()),
                    analyzer: None,
                    exporter: None,
                    ui_slot: None,
                },
            },
            false,
        ),
        FirstPartyPluginAdapter::new(
            PluginManifest {
                id: "builtin.pdf-export".to_string(),
                version: "0.1.0".to_string(),
                name: "Export to PDF".to_string(),
                description: "Adds an option to export notes as PDF.".to_string(),
                capabilities: vec![
                    CAPABILITY_EXPORTER.to_string(),
                    CAPABILITY_UI_SLOT.to_string(),
                ],
                entrypoints: ManifestEntrypoints {
                    init: Some("builtin.pdf.init".to_string()),
                    dispose: Some("builtin.pdf.dispose".to_string()),
                    health: Some("builtin.pdf.health".to_string()),
                    command_action: None,
                    analyzer: None,
                    exporter: Some("builtin.pdf.export".to_string()),
                    ui_slot: Some("builtin.pdf.ui.export-menu".to_string()),
                },
            },
            true,
        ),
    ]
}

/// In-process plugin registry for declaration contracts.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: BTreeMap<String, RegisteredPlugin>,
    capability_index: BTreeMap<String, BTreeSet<String>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one adapter after manifest declaration validation.
    pub fn register_adapter(
        &mut self,
        adapter: &impl PluginAdapter,
    ) -> Result<(), PluginRegistryError> {
        let manifest = adapter.manifest().clone();
        manifest
            .validate()
            .map_err(PluginRegistryError::InvalidManifest)?;
        let id = manifest.id.clone();
        if self.entries.contains_key(id.as_str()) {
            return Err(PluginRegistryError::DuplicatePluginId(id));
        }

        for capability in &manifest.capabilities {
            self.capability_index
                .entry(capability.clone())
                .or_default()
                .insert(manifest.id.clone());
        }

        self.entries.insert(
            manifest.id.clone(),
            RegisteredPlugin {
                manifest,
                source: adapter.source(),
                default_enabled: adapter.default_enabled(),
            },
        );
        Ok(())
    }

    /// Registers the full built-in catalog.
    pub fn register_builtin_catalog(&mut self) -> Result<(), PluginRegistryError> {
        for adapter in builtin_catalog() {
            self.register_adapter(&adapter)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, plugin_id: &str) -> Option<&RegisteredPlugin> {
        self.entries.get(plugin_id)
    }

    /// All registered plugins in id order.
    pub fn list(&self) -> Vec<&RegisteredPlugin> {
        self.entries.values().collect()
    }

    pub fn list_by_capability(&self, capability: &str) -> Vec<&RegisteredPlugin> {
        let Some(ids) = self.capability_index.get(capability) else {
            return vec![];
        };
        ids.iter().filter_map(|id| self.entries.get(id)).collect()
    }
}

/// Internal registry registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginRegistryError {
    InvalidManifest(ManifestValidationError),
    DuplicatePluginId(String),
}

impl Display for PluginRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidManifest(err) => write!(f, "invalid plugin manifest: {err}"),
            Self::DuplicatePluginId(value) => {
                write!(f, "plugin id already registered: {value}")
            }
        }
    }
}

impl Error for PluginRegistryError {}

#[cfg(test)]
mod tests {
    use super::{builtin_catalog, PluginRegistry, PluginRegistryError, PluginSource};

    #[test]
    fn registers_builtin_catalog() {
        let mut registry = PluginRegistry::new();
        registry
            .register_builtin_catalog()
            .expect("builtin catalog registration");

        assert_eq!(registry.len(), 4);
        let entry = registry
            .get("builtin.grammar-check")
            .expect("registered plugin");
        assert_eq!(entry.source, PluginSource::FirstParty);
        assert!(entry.default_enabled);
        assert!(!registry
            .get("builtin.thesaurus")
            .expect("thesaurus plugin")
            .default_enabled);
    }

    #[test]
    fn rejects_duplicate_plugin_id() {
        let mut registry = PluginRegistry::new();
        let adapter = builtin_catalog().remove(0);
        registry
            .register_adapter(&adapter)
            .expect("first registration should succeed");
        let err = registry
            .register_adapter(&adapter)
            .expect_err("duplicate registration must fail");
        assert!(matches!(err, PluginRegistryError::DuplicatePluginId(_)));
    }

    #[test]
    fn builds_capability_index() {
        let mut registry = PluginRegistry::new();
        registry
            .register_builtin_catalog()
            .expect("builtin catalog registration");

        let exporters = registry.list_by_capability("exporter");
        assert_eq!(exporters.len(), 1);
        assert_eq!(exporters[0].manifest.id, "builtin.pdf-export");
    }
}
