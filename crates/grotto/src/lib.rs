//! # GROTTO
//!
//! Procedural caves, from seed to mesh.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────┐   ┌──────────────┐   ┌────────────┐
//! │ Random fill  │──>│ Smoothing │──>│ Region prune │──>│ Room graph │
//! └──────────────┘   └───────────┘   └──────────────┘   └─────┬──────┘
//!                                                             │
//!       ┌─────────────────────────────────────────────────────┘
//!       v
//! ┌──────────────┐   ┌─────────────────┐   ┌──────────┐   ┌───────┐
//! │ Border pad   │──>│ Marching squares│──>│ Outlines │──>│ Walls │
//! └──────────────┘   └─────────────────┘   └──────────┘   └───────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration
//! - `builder`: The full pipeline
//! - `layout`: Build output and tile to mesh-space mapping

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod builder;
pub mod config;
pub mod error;
pub mod layout;

// Re-export the stages
pub use grotto_mesh as mesh;
pub use grotto_procedural as procedural;

// Re-export commonly used types
pub use builder::{build, CaveBuilder};
pub use config::CaveConfig;
pub use error::{GrottoError, GrottoResult};
pub use layout::CaveLayout;
