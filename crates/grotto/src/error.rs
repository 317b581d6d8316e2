//! # Pipeline Error Types
//!
//! All errors that can stop a build before it starts.

use std::path::PathBuf;

use grotto_procedural::ConfigError;
use thiserror::Error;

/// Errors surfaced by the `grotto` crate.
#[derive(Error, Debug)]
pub enum GrottoError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A config file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for pipeline operations.
pub type GrottoResult<T> = Result<T, GrottoError>;
