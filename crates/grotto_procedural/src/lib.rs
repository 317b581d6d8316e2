//! # GROTTO Procedural Generation
//!
//! Deterministic cave layouts on a 2D occupancy grid.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed + same config always produces the same cave
//! 2. **Connected**: Every surviving open area is reachable from the main room
//! 3. **Value-passing**: Each stage takes the grid and hands back a new one
//!
//! ## Core Components
//!
//! - `OccupancyGrid`: Flat row-major wall/open map
//! - `CellularAutomaton`: 4-5 smoothing rule
//! - `RegionExtractor` / `RegionPruner`: Flood fill and pocket removal
//! - `RoomGraphBuilder`: Passage carving until the map is connected
//! - `CaveGenerator`: All of the above behind one call
//!
//! ## Example
//!
//! ```rust,ignore
//! use grotto_procedural::{CaveGenerator, GenerationConfig, MapSeed};
//!
//! let generator = CaveGenerator::new(GenerationConfig::default())?;
//! let cave = generator.generate(MapSeed::from_phrase("crystal caverns"));
//!
//! assert!(cave.rooms.is_fully_connected());
//! println!("{}", cave.grid);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod automaton;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod region;
pub mod room;
pub mod seed;

pub use automaton::CellularAutomaton;
pub use config::GenerationConfig;
pub use error::{ConfigError, ConfigResult};
pub use generator::{CaveGenerator, GeneratedCave};
pub use grid::{Coord, OccupancyGrid, Tile};
pub use region::{PruneOutcome, PruneReport, Region, RegionExtractor, RegionPruner};
pub use room::{Passage, Room, RoomGraph, RoomGraphBuilder};
pub use seed::{MapRng, MapSeed};
