//! # Marching Squares
//!
//! Triangulates the wall side of every [`ControlSquare`].
//!
//! Each of the 16 corner configurations maps to a fixed polygon (listed in
//! the table inside [`MarchingSquares::triangulate`]), emitted as a fan
//! from its first point. The two checkerboard configurations, 5 and 10,
//! produce two separate corner triangles and never bridge the diagonal.
//!
//! Vertices are created lazily, once per node, through a [`VertexCache`].

use grotto_procedural::OccupancyGrid;

use crate::buffer::{CaveMesh, MeshVertex};
use crate::control::{ControlGrid, ControlSquare, NodeId};
use crate::outline::TriangleAdjacency;

/// Node id to vertex index map.
///
/// Replaces a mutable "vertex index" slot on each node: the first lookup
/// of a node emits its vertex, later lookups reuse it.
#[derive(Clone, Debug)]
pub struct VertexCache {
    slots: Vec<Option<u32>>,
}

impl VertexCache {
    /// Creates an empty cache for `node_count` node ids.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            slots: vec![None; node_count],
        }
    }

    /// Vertex index of `node`, if already emitted.
    #[inline]
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<u32> {
        self.slots.get(node.0).copied().flatten()
    }

    /// Vertex index of `node`, emitting its vertex into `mesh` on first use.
    pub fn resolve(&mut self, node: NodeId, control: &ControlGrid, mesh: &mut CaveMesh) -> u32 {
        if let Some(index) = self.get(node) {
            return index;
        }
        let index = mesh.push_vertex(MeshVertex::new(control.position(node)));
        if let Some(slot) = self.slots.get_mut(node.0) {
            *slot = Some(index);
        }
        index
    }
}

/// Floor mesh plus the bookkeeping outline extraction needs.
#[derive(Clone, Debug, Default)]
pub struct Triangulation {
    /// Floor geometry.
    pub mesh: CaveMesh,
    /// Vertex to triangle lookup, built while emitting.
    pub adjacency: TriangleAdjacency,
    /// Per vertex: true when it is a corner of a fully solid square.
    pub interior: Vec<bool>,
}

/// Marching squares triangulator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchingSquares {
    square_size: f32,
}

impl MarchingSquares {
    /// Creates a triangulator for cells `square_size` wide.
    #[inline]
    #[must_use]
    pub const fn new(square_size: f32) -> Self {
        Self { square_size }
    }

    /// Triangulates the walls of `grid`.
    ///
    /// Squares are visited row by row, bottom row first. A grid narrower or
    /// shorter than two cells has no squares and yields an empty mesh.
    #[must_use]
    pub fn triangulate(&self, grid: &OccupancyGrid) -> Triangulation {
        let control = ControlGrid::new(grid, self.square_size);
        let mut builder = Builder {
            control: &control,
            cache: VertexCache::new(control.node_count()),
            out: Triangulation::default(),
        };

        for y in 0..control.squares_high() {
            for x in 0..control.squares_wide() {
                builder.square(&control.square(x, y));
            }
        }

        let out = builder.out;
        tracing::debug!(
            vertices = out.mesh.vertex_count(),
            triangles = out.mesh.triangle_count(),
            "floor triangulated"
        );
        out
    }
}

struct Builder<'a> {
    control: &'a ControlGrid,
    cache: VertexCache,
    out: Triangulation,
}

impl Builder<'_> {
    fn square(&mut self, sq: &ControlSquare) {
        let (tl, tr, br, bl) = (sq.top_left, sq.top_right, sq.bottom_right, sq.bottom_left);
        let (ct, cr, cb, cl) = (sq.center_top, sq.center_right, sq.center_bottom, sq.center_left);

        match sq.configuration {
            0 => {}

            // One corner
            1 => self.polygon(&[cl, cb, bl]),
            2 => self.polygon(&[br, cb, cr]),
            4 => self.polygon(&[tr, cr, ct]),
            8 => self.polygon(&[tl, ct, cl]),

            // Two adjacent corners
            3 => self.polygon(&[cr, br, bl, cl]),
            6 => self.polygon(&[ct, tr, br, cb]),
            9 => self.polygon(&[tl, ct, cb, bl]),
            12 => self.polygon(&[tl, tr, cr, cl]),

            // Checkerboards stay two separate triangles
            5 => {
                self.polygon(&[tr, cr, ct]);
                self.polygon(&[cl, cb, bl]);
            }
            10 => {
                self.polygon(&[tl, ct, cl]);
                self.polygon(&[br, cb, cr]);
            }

            // Three corners
            7 => self.polygon(&[ct, tr, br, bl, cl]),
            11 => self.polygon(&[tl, ct, cr, br, bl]),
            13 => self.polygon(&[tl, tr, cr, cb, bl]),
            14 => self.polygon(&[tl, tr, br, cb, cl]),

            // Solid
            _ => {
                self.polygon(&[tl, tr, br, bl]);
                for node in [tl, tr, br, bl] {
                    if let Some(index) = self.cache.get(node) {
                        self.out.interior[index as usize] = true;
                    }
                }
            }
        }
    }

    /// Emits `points` as a triangle fan from the first point.
    fn polygon(&mut self, points: &[NodeId]) {
        let mut indices = [0u32; 5];
        for (slot, &node) in indices.iter_mut().zip(points) {
            *slot = self.cache.resolve(node, self.control, &mut self.out.mesh);
        }
        self.out
            .interior
            .resize(self.out.mesh.vertex_count(), false);

        for i in 1..points.len().saturating_sub(1) {
            let triangle = [indices[0], indices[i], indices[i + 1]];
            let t = self.out.mesh.push_triangle(triangle);
            self.out.adjacency.insert(t, triangle);
        }
    }
}
