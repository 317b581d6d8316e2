//! # Generation Tests
//!
//! End-to-end checks on the grid stages: determinism, region partitioning
//! and full connectivity across many seeds.

use std::collections::HashSet;

use grotto_procedural::{
    CaveGenerator, GenerationConfig, MapSeed, RegionExtractor, Tile,
};

fn generator(width: usize, height: usize) -> CaveGenerator {
    let config = GenerationConfig {
        width,
        height,
        ..GenerationConfig::default()
    };
    CaveGenerator::new(config).expect("valid config")
}

/// Test: Same seed, same cave.
#[test]
fn test_generation_is_deterministic() {
    let generator = generator(96, 64);
    let a = generator.generate(MapSeed::from_phrase("determinism"));
    let b = generator.generate(MapSeed::from_phrase("determinism"));
    assert_eq!(a, b);

    let c = generator.generate(MapSeed::from_phrase("something else"));
    assert_ne!(a.grid, c.grid, "different seeds should give different caves");
}

/// Test: Every room is reachable from the main room, for many seeds.
#[test]
fn test_every_room_reachable() {
    let generator = generator(80, 50);
    for seed in 0..25 {
        let cave = generator.generate(MapSeed::new(seed));
        assert!(
            cave.rooms.is_fully_connected(),
            "seed {seed}: room graph not connected"
        );
        assert!(cave
            .rooms
            .rooms()
            .iter()
            .all(|room| room.is_accessible_from_main_room));

        // Exactly one room is the main room, and it is the largest
        let mains: Vec<_> = cave.rooms.rooms().iter().filter(|r| r.is_main_room).collect();
        if cave.rooms.is_empty() {
            assert!(mains.is_empty());
        } else {
            assert_eq!(mains.len(), 1);
            let largest = cave.rooms.rooms().iter().map(|r| r.len()).max();
            assert_eq!(Some(mains[0].len()), largest);
        }
        println!(
            "seed {seed}: {} rooms, {} passages",
            cave.rooms.len(),
            cave.rooms.passages().len()
        );
    }
}

/// Test: Carved passages leave one open region.
#[test]
fn test_open_space_is_one_region() {
    let generator = generator(100, 60);
    for seed in 0..10 {
        let cave = generator.generate(MapSeed::new(seed));
        let open = RegionExtractor::regions_of(&cave.grid, Tile::Open);
        assert!(open.len() <= 1, "seed {seed}: {} open regions", open.len());
    }
}

/// Test: Regions of each tile kind partition the grid.
#[test]
fn test_regions_partition_generated_grid() {
    let cave = generator(120, 70).generate(MapSeed::new(2024));

    let mut total = 0;
    for tile in [Tile::Open, Tile::Wall] {
        let mut seen = HashSet::new();
        for region in RegionExtractor::regions_of(&cave.grid, tile) {
            for coord in region.tiles {
                assert_eq!(cave.grid.at(coord), tile);
                assert!(seen.insert(coord));
            }
        }
        assert_eq!(seen.len(), cave.grid.count(tile));
        total += seen.len();
    }
    assert_eq!(total, 120 * 70);
}

/// Test: The outer ring stays wall after passages are carved.
#[test]
fn test_border_stays_wall() {
    let cave = generator(64, 40).generate(MapSeed::new(77));
    for (coord, tile) in cave.grid.iter() {
        if cave.grid.is_border(coord.x, coord.y) {
            assert_eq!(tile, Tile::Wall, "border opened at {coord}");
        }
    }
}

/// Test: A small map at low fill keeps its outer ring after pruning.
#[test]
fn test_border_stays_wall_on_sparse_small_map() {
    for fill_percent in [0, 10, 25] {
        let config = GenerationConfig {
            width: 10,
            height: 10,
            fill_percent,
            ..GenerationConfig::default()
        };
        let generator = CaveGenerator::new(config).expect("valid config");
        for seed in 0..5 {
            let cave = generator.generate(MapSeed::new(seed));
            for (coord, tile) in cave.grid.iter() {
                if cave.grid.is_border(coord.x, coord.y) {
                    assert_eq!(
                        tile,
                        Tile::Wall,
                        "fill {fill_percent}, seed {seed}: border opened at {coord}"
                    );
                }
            }
        }
    }
}
