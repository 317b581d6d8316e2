//! # Cave Mesher
//!
//! Runs the mesh stages over a finished occupancy grid:
//!
//! ```text
//! marching squares -> outline extraction -> wall extrusion
//! ```

use grotto_procedural::{ConfigResult, OccupancyGrid, Tile};

use crate::buffer::CaveMesh;
use crate::config::MeshConfig;
use crate::marching::MarchingSquares;
use crate::outline::{OutlineExtractor, OutlineLoop};
use crate::walls::WallExtruder;

/// Everything produced from one grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaveGeometry {
    /// Floor (wall tops) mesh.
    pub floor: CaveMesh,
    /// Extruded wall mesh.
    pub walls: CaveMesh,
    /// Boundary loops of `floor`.
    pub outlines: Vec<OutlineLoop>,
}

/// Mesh pipeline with a validated scale.
#[derive(Clone, Copy, Debug)]
pub struct CaveMesher {
    config: MeshConfig,
}

impl CaveMesher {
    /// Creates a mesher.
    ///
    /// # Errors
    ///
    /// Returns the validation failure of `config`.
    pub fn new(config: MeshConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Meshes `grid`.
    ///
    /// A grid without open cells has no cave to mesh and yields empty buffers.
    #[must_use]
    pub fn mesh(&self, grid: &OccupancyGrid) -> CaveGeometry {
        if grid.count(Tile::Open) == 0 {
            tracing::debug!("no open cells, skipping mesh");
            return CaveGeometry::default();
        }

        let triangulation = MarchingSquares::new(self.config.square_size).triangulate(grid);
        let outlines = OutlineExtractor::extract(&triangulation);
        let walls = WallExtruder::new(self.config.wall_height).extrude(&triangulation.mesh, &outlines);

        CaveGeometry {
            floor: triangulation.mesh,
            walls,
            outlines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_square_size() {
        let config = MeshConfig {
            square_size: 0.0,
            ..MeshConfig::default()
        };
        assert!(CaveMesher::new(config).is_err());
    }

    #[test]
    fn test_solid_grid_gives_empty_geometry() {
        let grid = OccupancyGrid::filled(6, 4, Tile::Wall);
        let geometry = CaveMesher::new(MeshConfig::default()).unwrap().mesh(&grid);
        assert_eq!(geometry, CaveGeometry::default());
        assert!(geometry.floor.is_empty());
        assert_eq!(geometry.floor.vertex_count(), 0);
    }

    #[test]
    fn test_moat_geometry() {
        let grid = OccupancyGrid::from_rows(&[".....", ".###.", ".###.", ".###.", "....."]).unwrap();
        let geometry = CaveMesher::new(MeshConfig::default()).unwrap().mesh(&grid);

        assert_eq!(geometry.floor.triangle_count(), 28);
        assert_eq!(geometry.outlines.len(), 1);
        assert_eq!(geometry.walls.vertex_count(), 48);
        assert_eq!(geometry.walls.triangle_count(), 24);

        // Wall bottoms sit wall_height below the floor plane
        let lowest = geometry
            .walls
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        assert_eq!(lowest, -5.0);
    }
}
