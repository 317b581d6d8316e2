//! # Cave Configuration
//!
//! One TOML document configures a whole build. Every key is optional:
//!
//! ```toml
//! seed = "crystal caverns"   # phrase or integer
//!
//! [generation]
//! width = 128
//! height = 72
//! fill_percent = 45
//! smoothing_iterations = 5
//! wall_threshold = 50
//! room_threshold = 50
//! passage_radius = 1
//! border_size = 5
//!
//! [mesh]
//! square_size = 1.0
//! wall_height = 5.0
//! ```

use std::path::Path;

use grotto_mesh::MeshConfig;
use grotto_procedural::{ConfigError, ConfigResult, GenerationConfig, MapSeed};
use serde::{Deserialize, Serialize};

use crate::error::{GrottoError, GrottoResult};

/// Full build configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaveConfig {
    /// Seed for the random fill.
    pub seed: MapSeed,
    /// Grid stage settings.
    pub generation: GenerationConfig,
    /// Mesh stage settings.
    pub mesh: MeshConfig,
}

impl CaveConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or out-of-type values
    /// (negative thresholds included), otherwise any validation failure.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`GrottoError::Io`] when the file cannot be read, otherwise the
    /// errors of [`CaveConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> GrottoResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GrottoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Self::from_toml_str(&text)?)
    }

    /// Validates both stage configurations.
    ///
    /// # Errors
    ///
    /// The first failure of [`GenerationConfig::validate`] or
    /// [`MeshConfig::validate`].
    pub fn validate(&self) -> ConfigResult<()> {
        self.generation.validate()?;
        self.mesh.validate()
    }
}
