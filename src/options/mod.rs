//! Controller options with TOML preset support.
//!
//! Defaults that would otherwise be process-wide constants (transition
//! duration and easing) live here and are handed to each controller at
//! build time. Options serialize to/from TOML.

mod queue;
mod transition;

use std::path::Path;

pub use queue::QueueOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use transition::TransitionOptions;

use crate::error::ViewStateError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[transition]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Defaults for synthesized transitions.
    pub transition: TransitionOptions,
    /// Request queue behavior.
    pub queue: QueueOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ViewStateError> {
        toml::from_str(content)
            .map_err(|e| ViewStateError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewStateError> {
        let content = std::fs::read_to_string(path).map_err(ViewStateError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewStateError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewStateError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewStateError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewStateError::Io)
    }
}
