//! Server configuration types

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Message shown to the user when the configuration document cannot be loaded
pub const CONFIG_FAILURE_MESSAGE: &str =
    "Failed to load configuration. Some features may not work correctly.";

/// Outcome of loading the `/config` document
///
/// Starts as `Unresolved` and moves to one of the other two variants exactly
/// once. Serializes to `null`, the document itself, or
/// `{"error": ..., "loaded": false}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConfigResult {
    #[default]
    Unresolved,
    Resolved(serde_json::Value),
    Failed { message: String },
}

impl ConfigResult {
    /// The terminal failure value
    pub fn failed() -> Self {
        Self::Failed {
            message: CONFIG_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Whether the load has settled, successfully or not
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// The configuration document, if it was loaded
    pub fn document(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Resolved(doc) => Some(doc),
            _ => None,
        }
    }

    /// Looks up one of the `endpointPathPatterns` entries (`flinkUi`,
    /// `flinkApi`, `metrics`, `logs`)
    pub fn endpoint_pattern(&self, name: &str) -> Option<&str> {
        self.document()?
            .get("endpointPathPatterns")?
            .get(name)?
            .as_str()
    }
}

impl Serialize for ConfigResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unresolved => serializer.serialize_none(),
            Self::Resolved(doc) => doc.serialize(serializer),
            Self::Failed { message } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", message)?;
                map.serialize_entry("loaded", &false)?;
                map.end()
            }
        }
    }
}
