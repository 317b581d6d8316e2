//! # Outline Extraction
//!
//! Finds the closed boundary loops of a triangle mesh.
//!
//! An edge is on the boundary when exactly one triangle contains both of its
//! endpoints. Loops are traced vertex by vertex in index order; each vertex
//! moves through [`VisitState`] as it is discovered and closed, so no vertex
//! ends up in two loops.

use crate::buffer::CaveMesh;
use crate::marching::Triangulation;

/// Vertex to triangle lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriangleAdjacency {
    triangles: Vec<[u32; 3]>,
    by_vertex: Vec<Vec<u32>>,
}

impl TriangleAdjacency {
    /// Builds the lookup for every triangle of `mesh`.
    #[must_use]
    pub fn from_mesh(mesh: &CaveMesh) -> Self {
        let mut adjacency = Self::default();
        for (t, triangle) in mesh.triangles().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let t = t as u32;
            adjacency.insert(t, triangle);
        }
        adjacency
    }

    /// Registers triangle `index` under each of its vertices.
    ///
    /// Triangles must be inserted in index order.
    pub fn insert(&mut self, index: u32, triangle: [u32; 3]) {
        debug_assert_eq!(index as usize, self.triangles.len());
        self.triangles.push(triangle);
        for vertex in triangle {
            let v = vertex as usize;
            if self.by_vertex.len() <= v {
                self.by_vertex.resize_with(v + 1, Vec::new);
            }
            self.by_vertex[v].push(index);
        }
    }

    /// Triangles touching `vertex`, in insertion order.
    #[must_use]
    pub fn triangles_of(&self, vertex: u32) -> &[u32] {
        self.by_vertex
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Vertex triple of triangle `index`.
    #[must_use]
    pub fn triangle(&self, index: u32) -> Option<[u32; 3]> {
        self.triangles.get(index as usize).copied()
    }

    /// Number of triangles containing both `a` and `b`.
    #[must_use]
    pub fn shared_triangle_count(&self, a: u32, b: u32) -> usize {
        self.triangles_of(a)
            .iter()
            .filter_map(|&t| self.triangle(t))
            .filter(|triangle| triangle.contains(&b))
            .count()
    }

    /// True when `a`-`b` belongs to exactly one triangle.
    #[must_use]
    pub fn is_boundary_edge(&self, a: u32, b: u32) -> bool {
        self.shared_triangle_count(a, b) == 1
    }
}

/// Progress of a vertex through loop discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitState {
    /// Not yet part of any loop.
    Unvisited,
    /// Part of the loop currently being traced.
    InProgress,
    /// Done: in a finished loop, or interior and never on a boundary.
    Closed,
}

/// One closed boundary. The first vertex is repeated at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutlineLoop {
    /// Vertex indices into the floor mesh.
    pub vertices: Vec<u32>,
}

impl OutlineLoop {
    /// Number of boundary segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Consecutive vertex pairs.
    pub fn segments(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Traces boundary loops.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlineExtractor;

impl OutlineExtractor {
    /// All boundary loops of a triangulation.
    ///
    /// Vertices flagged interior never start or join a loop.
    #[must_use]
    pub fn extract(triangulation: &Triangulation) -> Vec<OutlineLoop> {
        let vertex_count = triangulation.mesh.vertex_count();
        let mut states: Vec<VisitState> = (0..vertex_count)
            .map(|v| {
                if triangulation.interior.get(v).copied().unwrap_or(false) {
                    VisitState::Closed
                } else {
                    VisitState::Unvisited
                }
            })
            .collect();

        let adjacency = &triangulation.adjacency;
        let mut loops = Vec::new();

        for start in 0..vertex_count {
            if states[start] != VisitState::Unvisited {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let start = start as u32;
            let Some(mut next) = next_outline_vertex(adjacency, &states, start) else {
                continue;
            };

            states[start as usize] = VisitState::InProgress;
            let mut vertices = vec![start];
            loop {
                vertices.push(next);
                states[next as usize] = VisitState::InProgress;
                match next_outline_vertex(adjacency, &states, next) {
                    Some(vertex) => next = vertex,
                    None => break,
                }
            }
            vertices.push(start);

            for &v in &vertices {
                states[v as usize] = VisitState::Closed;
            }
            loops.push(OutlineLoop { vertices });
        }

        tracing::debug!(loops = loops.len(), "outlines extracted");
        loops
    }
}

/// First unvisited vertex sharing a boundary edge with `vertex`.
///
/// Scans the triangles of `vertex` in insertion order, then each
/// triangle's corners in order.
fn next_outline_vertex(adjacency: &TriangleAdjacency, states: &[VisitState], vertex: u32) -> Option<u32> {
    for &t in adjacency.triangles_of(vertex) {
        let Some(triangle) = adjacency.triangle(t) else {
            continue;
        };
        for candidate in triangle {
            if candidate != vertex
                && states.get(candidate as usize) == Some(&VisitState::Unvisited)
                && adjacency.is_boundary_edge(vertex, candidate)
            {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marching::MarchingSquares;
    use grotto_procedural::OccupancyGrid;

    fn outlines(rows: &[&str]) -> (Triangulation, Vec<OutlineLoop>) {
        let grid = OccupancyGrid::from_rows(rows).unwrap();
        let triangulation = MarchingSquares::new(1.0).triangulate(&grid);
        let loops = OutlineExtractor::extract(&triangulation);
        (triangulation, loops)
    }

    #[test]
    fn test_boundary_edges() {
        let mut mesh = CaveMesh::default();
        mesh.indices = vec![0, 1, 2, 0, 2, 3];
        let adjacency = TriangleAdjacency::from_mesh(&mesh);
        assert_eq!(adjacency.triangles_of(0), &[0, 1]);
        assert_eq!(adjacency.triangles_of(9), &[] as &[u32]);
        assert_eq!(adjacency.shared_triangle_count(0, 2), 2);
        assert!(!adjacency.is_boundary_edge(0, 2));
        assert!(adjacency.is_boundary_edge(0, 1));
        assert!(adjacency.is_boundary_edge(2, 3));
        assert!(!adjacency.is_boundary_edge(1, 3));
    }

    #[test]
    fn test_empty_mesh_has_no_loops() {
        let (_, loops) = outlines(&["....", "....", "...."]);
        assert!(loops.is_empty());
    }

    #[test]
    fn test_single_triangle_loop() {
        let (_, loops) = outlines(&["#.", ".."]);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].vertices.len(), 4);
        assert_eq!(loops[0].vertices.first(), loops[0].vertices.last());
        assert_eq!(loops[0].segment_count(), 3);
    }

    #[test]
    fn test_moat_has_one_loop() {
        let (triangulation, loops) = outlines(&[".....", ".###.", ".###.", ".###.", "....."]);
        assert_eq!(loops.len(), 1);

        let outline = &loops[0];
        assert_eq!(outline.vertices.len(), 13);
        assert_eq!(outline.vertices.first(), outline.vertices.last());

        let unique: std::collections::HashSet<_> = outline.vertices.iter().collect();
        assert_eq!(unique.len(), 12);
        for (a, b) in outline.segments() {
            assert!(triangulation.adjacency.is_boundary_edge(a, b), "{a}-{b} is not a boundary");
        }
        // Interior corners never join a loop
        for &v in &outline.vertices {
            assert!(!triangulation.interior[v as usize]);
        }
    }

    #[test]
    fn test_separate_islands_give_separate_loops() {
        let (_, loops) = outlines(&[
            "........",
            ".##..##.",
            ".##..##.",
            "........",
        ]);
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|l| l.vertices.first() == l.vertices.last()));
    }
}
