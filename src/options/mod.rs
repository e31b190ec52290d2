//! Runtime configuration with TOML preset support.
//!
//! Camera limits and shader behaviour are consolidated here. Options
//! serialize to/from TOML; every section uses `#[serde(default)]` so partial
//! files only override what they name.

mod camera;
mod shader;

use std::path::Path;

pub use camera::CameraOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use shader::ShaderOptions;

use crate::error::GlkitError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Roaming camera limits.
    pub camera: CameraOptions,
    /// Shader compilation behaviour.
    pub shader: ShaderOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GlkitError::Io`] if the file cannot be read and
    /// [`GlkitError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, GlkitError> {
        let content = std::fs::read_to_string(path).map_err(GlkitError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| GlkitError::OptionsParse(e.to_string()))?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`GlkitError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), GlkitError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlkitError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GlkitError::Io)?;
        }
        std::fs::write(path, content).map_err(GlkitError::Io)
    }
}
