//! # GROTTO Mesh
//!
//! Converts an occupancy grid into cave geometry.
//!
//! ## Pipeline
//!
//! 1. **Control grid**: one node per cell center, two midpoint nodes per cell
//! 2. **Marching squares**: 16-case table, fans, one vertex per node
//! 3. **Outlines**: boundary edges chained into closed loops
//! 4. **Walls**: every outline segment extruded downward into a quad
//!
//! ## Example
//!
//! ```rust,ignore
//! use grotto_mesh::{CaveMesher, MeshConfig};
//!
//! let mesher = CaveMesher::new(MeshConfig::default())?;
//! let geometry = mesher.mesh(&grid);
//! upload(geometry.floor.vertex_bytes(), geometry.floor.index_bytes());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod buffer;
pub mod config;
pub mod control;
pub mod marching;
pub mod mesher;
pub mod outline;
pub mod walls;

pub use buffer::{CaveMesh, MeshVertex};
pub use config::MeshConfig;
pub use control::{Axis, ControlGrid, ControlSquare, NodeId};
pub use marching::{MarchingSquares, Triangulation, VertexCache};
pub use mesher::{CaveGeometry, CaveMesher};
pub use outline::{OutlineExtractor, OutlineLoop, TriangleAdjacency, VisitState};
pub use walls::WallExtruder;
