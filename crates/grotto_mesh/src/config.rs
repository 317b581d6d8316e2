//! # Mesh Configuration
//!
//! World-space scale of the generated geometry.

use grotto_procedural::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Default edge length of one grid cell.
pub const DEFAULT_SQUARE_SIZE: f32 = 1.0;
/// Default wall extrusion depth.
pub const DEFAULT_WALL_HEIGHT: f32 = 5.0;

/// Mesh scale settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Edge length of one grid cell in mesh units.
    pub square_size: f32,
    /// How far walls extend below the floor.
    pub wall_height: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            square_size: DEFAULT_SQUARE_SIZE,
            wall_height: DEFAULT_WALL_HEIGHT,
        }
    }
}

impl MeshConfig {
    /// Checks that both scales are positive and finite.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidMeshScale`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("square_size", self.square_size),
            ("wall_height", self.wall_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMeshScale {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}
