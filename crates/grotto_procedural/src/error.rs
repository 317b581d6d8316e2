//! # Configuration Error Types
//!
//! Everything that can be rejected before a cave is generated. Generation
//! itself cannot fail once a configuration validates.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("invalid dimensions: {width}x{height} (both must be at least 1)")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Fill percentage above 100.
    #[error("fill percent {0} out of range (0..=100)")]
    FillPercentOutOfRange(u8),

    /// Square size or wall height is zero, negative or not finite.
    #[error("invalid mesh scale: {field} = {value}")]
    InvalidMeshScale {
        /// Offending field name.
        field: &'static str,
        /// Offending value, formatted.
        value: String,
    },

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
