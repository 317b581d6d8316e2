//! Cave layout - the finished output of a build.

use grotto_mesh::{CaveMesh, OutlineLoop};
use grotto_procedural::{Coord, MapSeed, OccupancyGrid, PruneReport, RoomGraph};

/// Everything a build produces.
#[derive(Clone, Debug, PartialEq)]
pub struct CaveLayout {
    /// Seed the layout was built from.
    pub seed: MapSeed,
    /// Final occupancy, without the meshing border.
    pub grid: OccupancyGrid,
    /// Rooms and passages.
    pub rooms: RoomGraph,
    /// Marching squares mesh.
    pub floor: CaveMesh,
    /// Extruded walls.
    pub walls: CaveMesh,
    /// Boundary loops of `floor`.
    pub outlines: Vec<OutlineLoop>,
    /// What pruning removed.
    pub prune: PruneReport,
    pub(crate) border_size: usize,
    pub(crate) square_size: f32,
}

impl CaveLayout {
    /// Mesh-space center of grid tile `coord`, on the floor plane.
    ///
    /// Accounts for the border added before meshing, so the result lines
    /// up with `floor` and `walls`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tile_to_world(&self, coord: Coord) -> [f32; 3] {
        let s = self.square_size;
        let border = self.border_size as f32;
        let mesh_width = self.grid.width() as f32 + border * 2.0;
        let mesh_height = self.grid.height() as f32 + border * 2.0;
        [
            -mesh_width * s / 2.0 + (coord.x as f32 + border) * s + s / 2.0,
            0.0,
            -mesh_height * s / 2.0 + (coord.y as f32 + border) * s + s / 2.0,
        ]
    }

    /// Rings of wall added around `grid` before meshing.
    #[inline]
    #[must_use]
    pub const fn border_size(&self) -> usize {
        self.border_size
    }

    /// Edge length of one tile in mesh units.
    #[inline]
    #[must_use]
    pub const fn square_size(&self) -> f32 {
        self.square_size
    }

    /// Total triangles across floor and walls.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.floor.triangle_count() + self.walls.triangle_count()
    }
}
