//! Wall extrusion - one quad hanging below every outline segment.

use crate::buffer::CaveMesh;
use crate::outline::OutlineLoop;

/// Extrudes outline loops downward into wall geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallExtruder {
    height: f32,
}

impl WallExtruder {
    /// Creates an extruder for walls `height` units deep.
    #[inline]
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self { height }
    }

    /// Builds the wall mesh for `loops` over the vertices of `floor`.
    ///
    /// For each segment `(p, q)` emits `p`, `q`, `p` lowered and `q`
    /// lowered, then triangles `(0, 2, 3)` and `(3, 1, 0)`, which face
    /// into the cave. Segments referencing missing floor vertices are
    /// skipped.
    #[must_use]
    pub fn extrude(&self, floor: &CaveMesh, loops: &[OutlineLoop]) -> CaveMesh {
        let mut walls = CaveMesh::default();

        for outline in loops {
            for (p, q) in outline.segments() {
                let (Some(&left), Some(&right)) =
                    (floor.vertices.get(p as usize), floor.vertices.get(q as usize))
                else {
                    continue;
                };

                let top_left = walls.push_vertex(left);
                let top_right = walls.push_vertex(right);
                let bottom_left = walls.push_vertex(left.lowered(self.height));
                let bottom_right = walls.push_vertex(right.lowered(self.height));

                walls.push_triangle([top_left, bottom_left, bottom_right]);
                walls.push_triangle([bottom_right, top_right, top_left]);
            }
        }

        tracing::debug!(
            vertices = walls.vertex_count(),
            triangles = walls.triangle_count(),
            "walls extruded"
        );
        walls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::MeshVertex;

    #[test]
    fn test_one_segment() {
        let mut floor = CaveMesh::default();
        floor.push_vertex(MeshVertex::new([0.0, 0.0, 0.0]));
        floor.push_vertex(MeshVertex::new([1.0, 0.0, 0.0]));
        let outline = OutlineLoop {
            vertices: vec![0, 1],
        };

        let walls = WallExtruder::new(5.0).extrude(&floor, &[outline]);
        assert_eq!(walls.vertex_count(), 4);
        assert_eq!(walls.indices, vec![0, 2, 3, 3, 1, 0]);
        assert_eq!(walls.position(2), Some([0.0, -5.0, 0.0]));
        assert_eq!(walls.position(3), Some([1.0, -5.0, 0.0]));
    }

    #[test]
    fn test_no_loops_no_walls() {
        let walls = WallExtruder::new(5.0).extrude(&CaveMesh::default(), &[]);
        assert!(walls.is_empty());
        assert_eq!(walls.vertex_count(), 0);
    }

    #[test]
    fn test_missing_vertices_are_skipped() {
        let outline = OutlineLoop {
            vertices: vec![0, 7, 0],
        };
        let walls = WallExtruder::new(1.0).extrude(&CaveMesh::default(), &[outline]);
        assert!(walls.is_empty());
    }
}
