//! # Mesh Tests
//!
//! Geometry invariants on generated caves: valid indices, no duplicate
//! vertices, closed outlines and matching wall counts.

use std::collections::HashSet;

use grotto_mesh::{CaveMesher, MarchingSquares, MeshConfig, OutlineExtractor};
use grotto_procedural::{CaveGenerator, GenerationConfig, MapSeed};

fn generated_grid(seed: u64) -> grotto_procedural::OccupancyGrid {
    let config = GenerationConfig {
        width: 72,
        height: 48,
        ..GenerationConfig::default()
    };
    let generator = CaveGenerator::new(config).expect("valid config");
    generator.generate(MapSeed::new(seed)).grid.with_border(5)
}

/// Test: Every index references an emitted vertex and no position repeats.
#[test]
fn test_floor_indices_and_unique_vertices() {
    for seed in [1, 2, 3] {
        let grid = generated_grid(seed);
        let triangulation = MarchingSquares::new(1.0).triangulate(&grid);
        let mesh = &triangulation.mesh;

        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
        assert_eq!(mesh.indices.len() % 3, 0);

        let positions: HashSet<[u32; 3]> = mesh
            .vertices
            .iter()
            .map(|v| v.position.map(f32::to_bits))
            .collect();
        assert_eq!(positions.len(), mesh.vertex_count(), "seed {seed}: duplicate vertex");
        println!(
            "seed {seed}: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    }
}

/// Test: Outlines are closed, boundary-only, and disjoint.
#[test]
fn test_outlines_are_closed_and_disjoint() {
    let grid = generated_grid(11);
    let triangulation = MarchingSquares::new(1.0).triangulate(&grid);
    let loops = OutlineExtractor::extract(&triangulation);
    assert!(!loops.is_empty());

    let mut seen = HashSet::new();
    for outline in &loops {
        assert!(outline.vertices.len() >= 4, "degenerate loop {:?}", outline.vertices);
        assert_eq!(outline.vertices.first(), outline.vertices.last());
        for (a, b) in outline.segments() {
            assert!(triangulation.adjacency.is_boundary_edge(a, b));
        }
        for &v in &outline.vertices[1..] {
            assert!(seen.insert(v), "vertex {v} in two loops");
        }
    }
}

/// Test: Walls carry four vertices and two triangles per outline segment.
#[test]
fn test_wall_counts_follow_outlines() {
    let grid = generated_grid(5);
    let geometry = CaveMesher::new(MeshConfig::default())
        .expect("valid mesh config")
        .mesh(&grid);

    let segments: usize = geometry.outlines.iter().map(|l| l.segment_count()).sum();
    assert_eq!(geometry.walls.vertex_count(), segments * 4);
    assert_eq!(geometry.walls.triangle_count(), segments * 2);
    assert_eq!(geometry.walls.vertex_bytes().len(), segments * 4 * 12);
}

/// Test: Same grid, same geometry.
#[test]
fn test_meshing_is_deterministic() {
    let grid = generated_grid(8);
    let mesher = CaveMesher::new(MeshConfig::default()).expect("valid mesh config");
    assert_eq!(mesher.mesh(&grid), mesher.mesh(&grid));
}
