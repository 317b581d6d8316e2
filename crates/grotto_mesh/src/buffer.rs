//! Mesh buffers - vertex + index data shared by floor and walls.

use bytemuck::{Pod, Zeroable};

// =============================================================================
// VERTEX FORMAT
// =============================================================================

/// Mesh vertex, packed for direct upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in mesh space [x, y, z]. Y is up.
    pub position: [f32; 3],
}

impl MeshVertex {
    /// Creates a vertex at `position`.
    #[inline]
    #[must_use]
    pub const fn new(position: [f32; 3]) -> Self {
        Self { position }
    }

    /// This vertex moved down by `height` along Y.
    #[inline]
    #[must_use]
    pub fn lowered(self, height: f32) -> Self {
        let [x, y, z] = self.position;
        Self::new([x, y - height, z])
    }
}

// =============================================================================
// MESH OUTPUT
// =============================================================================

/// Triangle mesh (vertices + indices).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaveMesh {
    /// Vertex buffer data
    pub vertices: Vec<MeshVertex>,
    /// Index buffer data, one triple per triangle
    pub indices: Vec<u32>,
}

impl CaveMesh {
    /// Check if mesh is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Get triangle count
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get vertex count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, vertex: MeshVertex) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Appends a triangle and returns its index.
    pub fn push_triangle(&mut self, triangle: [u32; 3]) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let index = self.triangle_count() as u32;
        self.indices.extend_from_slice(&triangle);
        index
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Position of vertex `index`.
    #[inline]
    #[must_use]
    pub fn position(&self, index: u32) -> Option<[f32; 3]> {
        self.vertices.get(index as usize).map(|v| v.position)
    }

    /// Vertex buffer as raw bytes.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_counts() {
        let mut mesh = CaveMesh::default();
        assert!(mesh.is_empty());
        let a = mesh.push_vertex(MeshVertex::new([0.0, 0.0, 0.0]));
        let b = mesh.push_vertex(MeshVertex::new([1.0, 0.0, 0.0]));
        let c = mesh.push_vertex(MeshVertex::new([0.0, 0.0, 1.0]));
        assert_eq!(mesh.push_triangle([a, b, c]), 0);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert_eq!(mesh.position(1), Some([1.0, 0.0, 0.0]));
        assert_eq!(mesh.position(9), None);
    }

    #[test]
    fn test_byte_views() {
        let mut mesh = CaveMesh::default();
        mesh.push_vertex(MeshVertex::new([1.0, 2.0, 3.0]));
        mesh.push_triangle([0, 0, 0]);
        assert_eq!(mesh.vertex_bytes().len(), 12);
        assert_eq!(mesh.index_bytes().len(), 12);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 12);
    }

    #[test]
    fn test_lowered() {
        let v = MeshVertex::new([1.0, 0.0, -2.0]).lowered(5.0);
        assert_eq!(v.position, [1.0, -5.0, -2.0]);
    }
}
