//! Runtime capability declarations for plugin security gates.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Runtime capability for plugin invocation authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuntimeCapability {
    Network,
    File,
    Notification,
    Clipboard,
}

impl RuntimeCapability {
    /// Stable string id used in manifest declarations.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => RUNTIME_CAPABILITY_NETWORK,
            Self::File => RUNTIME_CAPABILITY_FILE,
            Self::Notification => RUNTIME_CAPABILITY_NOTIFICATION,
            Self::Clipboard => RUNTIME_CAPABILITY_CLIPBOARD,
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Network => "Allow network access for remote service calls.",
            Self::File => "Allow local file read/write access for import/export workflows.",
            Self::Notification => "Allow posting local notifications and reminder prompts.",
            Self::Clipboard => "Allow reading/writing the system clipboard.",
        }
    }
}

/// Manifest string value for network capability.
pub const RUNTIME_CAPABILITY_NETWORK: &str = "network";
/// Manifest string value for file capability.
pub const RUNTIME_CAPABILITY_FILE: &str = "file";
/// Manifest string value for notification capability.
pub const RUNTIME_CAPABILITY_NOTIFICATION: &str = "notification";
/// Manifest string value for clipboard capability.
pub const RUNTIME_CAPABILITY_CLIPBOARD: &str = "clipboard";

const SUPPORTED_RUNTIME_CAPABILITY_STRINGS: &[&str] = &[
    RUNTIME_CAPABILITY_NETWORK,
    RUNTIME_CAPABILITY_FILE,
    RUNTIME_CAPABILITY_NOTIFICATION,
    RUNTIME_CAPABILITY_CLIPBOARD,
];

/// Returns supported runtime capability declaration strings.
pub fn supported_runtime_capability_strings() -> &'static [&'static str] {
    SUPPORTED_RUNTIME_CAPABILITY_STRINGS
}

/// Parses one runtime capability from manifest string value.
pub fn parse_runtime_capability(value: &str) -> Result<RuntimeCapability, RuntimeCapabilityError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(RuntimeCapabilityError::EmptyCapability);
    }

    match normalized {
        RUNTIME_CAPABILITY_NETWORK => Ok(RuntimeCapability::Network),
        RUNTIME_CAPABILITY_FILE => Ok(RuntimeCapability::File),
        RUNTIME_CAPABILITY_NOTIFICATION => Ok(RuntimeCapability::Notification),
        RUNTIME_CAPABILITY_CLIPBOARD => Ok(RuntimeCapability::Clipboard),
        other => Err(RuntimeCapabilityError::UnsupportedCapability(
            other.to_string(),
        )),
    }
}

/// Runtime capability parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCapabilityError {
    EmptyCapability,
    UnsupportedCapability(String),
}

impl Display for RuntimeCapabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCapability => write!(f, "runtime capability value must not be empty"),
            Self::UnsupportedCapability(value) => {
                write!(f, "runtime capability is unsupported: {value}")
            }
        }
    }
}

impl Error for RuntimeCapabilityError {}
