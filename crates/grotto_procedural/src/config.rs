//! # Generation Configuration
//!
//! Tunables for the grid stages. Every field has a default, so an empty
//! `[generation]` table is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::automaton::DEFAULT_ITERATIONS;
use crate::error::{ConfigError, ConfigResult};
use crate::region::{DEFAULT_ROOM_THRESHOLD, DEFAULT_WALL_THRESHOLD};
use crate::room::DEFAULT_PASSAGE_RADIUS;

/// Default map width in cells.
pub const DEFAULT_WIDTH: usize = 128;
/// Default map height in cells.
pub const DEFAULT_HEIGHT: usize = 72;
/// Default wall probability of the random fill.
pub const DEFAULT_FILL_PERCENT: u8 = 45;
/// Default wall padding added around the map before meshing.
pub const DEFAULT_BORDER_SIZE: usize = 5;

/// Grid generation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Map width in cells.
    pub width: usize,
    /// Map height in cells.
    pub height: usize,
    /// Chance (0..=100) that an interior cell starts as wall.
    pub fill_percent: u8,
    /// Smoothing passes.
    pub smoothing_iterations: u32,
    /// Wall regions smaller than this are removed.
    pub wall_threshold: usize,
    /// Open regions smaller than this are removed.
    pub room_threshold: usize,
    /// Radius of carved passages.
    pub passage_radius: u32,
    /// Rings of wall added around the map before meshing.
    pub border_size: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fill_percent: DEFAULT_FILL_PERCENT,
            smoothing_iterations: DEFAULT_ITERATIONS,
            wall_threshold: DEFAULT_WALL_THRESHOLD,
            room_threshold: DEFAULT_ROOM_THRESHOLD,
            passage_radius: DEFAULT_PASSAGE_RADIUS,
            border_size: DEFAULT_BORDER_SIZE,
        }
    }
}

impl GenerationConfig {
    /// Checks dimensions and fill percentage.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidDimensions`] for a zero width or height,
    /// [`ConfigError::FillPercentOutOfRange`] for a fill above 100.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_percent > 100 {
            return Err(ConfigError::FillPercentOutOfRange(self.fill_percent));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GenerationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = GenerationConfig {
            height: 0,
            ..GenerationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimensions {
                width: 128,
                height: 0
            })
        );
    }

    #[test]
    fn test_rejects_fill_above_hundred() {
        let config = GenerationConfig {
            fill_percent: 101,
            ..GenerationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FillPercentOutOfRange(101)));

        let full = GenerationConfig {
            fill_percent: 100,
            ..GenerationConfig::default()
        };
        assert!(full.validate().is_ok());
    }
}
