//! # Region Extraction
//!
//! Flood fill over the occupancy grid and removal of tiny pockets.
//!
//! A region is a maximal 4-connected set of cells sharing one [`Tile`].
//! The regions of one tile kind partition every cell of that kind.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, OccupancyGrid, Tile, ORTHOGONAL};

/// Default minimum size of a wall region that survives pruning.
pub const DEFAULT_WALL_THRESHOLD: usize = 50;

/// Default minimum size of an open region that survives pruning.
pub const DEFAULT_ROOM_THRESHOLD: usize = 50;

/// One 4-connected component of a single tile kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// Tile kind shared by every member.
    pub tile: Tile,
    /// Member cells in discovery order.
    pub tiles: Vec<Coord>,
}

impl Region {
    /// Number of cells in the region.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when the region has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Breadth-first flood fill.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegionExtractor;

impl RegionExtractor {
    /// All regions of `tile`, seeded in row-major scan order.
    ///
    /// O(width * height): every cell is enqueued at most once.
    #[must_use]
    pub fn regions_of(grid: &OccupancyGrid, tile: Tile) -> Vec<Region> {
        let mut visited = vec![false; grid.width() * grid.height()];
        let mut regions = Vec::new();

        for (index, (coord, cell)) in grid.iter().enumerate() {
            if cell != tile || visited[index] {
                continue;
            }
            regions.push(Self::flood(grid, coord, &mut visited));
        }

        regions
    }

    /// Region containing `start`.
    ///
    /// Empty when `start` is off the grid.
    #[must_use]
    pub fn region_at(grid: &OccupancyGrid, start: Coord) -> Region {
        let mut visited = vec![false; grid.width() * grid.height()];
        if grid.in_bounds(start.x, start.y) {
            Self::flood(grid, start, &mut visited)
        } else {
            Region {
                tile: Tile::Wall,
                tiles: Vec::new(),
            }
        }
    }

    fn flood(grid: &OccupancyGrid, start: Coord, visited: &mut [bool]) -> Region {
        let tile = grid.at(start);
        let mut tiles = Vec::new();
        let mut queue = VecDeque::new();

        if let Some(index) = grid.cell_index(start.x, start.y) {
            visited[index] = true;
            queue.push_back(start);
        }

        while let Some(coord) = queue.pop_front() {
            tiles.push(coord);
            for (dx, dy) in ORTHOGONAL {
                let next = coord.offset(dx, dy);
                let Some(index) = grid.cell_index(next.x, next.y) else {
                    continue;
                };
                if !visited[index] && grid.at(next) == tile {
                    visited[index] = true;
                    queue.push_back(next);
                }
            }
        }

        Region { tile, tiles }
    }
}

// =============================================================================
// PRUNING
// =============================================================================

/// What a pruning pass removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneReport {
    /// Wall regions flipped to open.
    pub wall_regions_removed: usize,
    /// Open regions flipped to wall.
    pub room_regions_removed: usize,
    /// Total cells whose state changed.
    pub tiles_flipped: usize,
}

/// Result of [`RegionPruner::prune`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PruneOutcome {
    /// Open regions that survived, in scan order.
    pub rooms: Vec<Region>,
    /// Counts of removed regions.
    pub report: PruneReport,
}

/// Removes wall and open regions below a size threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionPruner {
    /// Wall regions with fewer cells than this become open.
    pub wall_threshold: usize,
    /// Open regions with fewer cells than this become wall.
    pub room_threshold: usize,
}

impl Default for RegionPruner {
    fn default() -> Self {
        Self {
            wall_threshold: DEFAULT_WALL_THRESHOLD,
            room_threshold: DEFAULT_ROOM_THRESHOLD,
        }
    }
}

impl RegionPruner {
    /// Creates a pruner.
    #[inline]
    #[must_use]
    pub const fn new(wall_threshold: usize, room_threshold: usize) -> Self {
        Self {
            wall_threshold,
            room_threshold,
        }
    }

    /// Prunes `grid` in place.
    ///
    /// Wall regions are handled first; open regions are extracted only
    /// afterwards, since removing a wall pocket can merge two open areas.
    /// Wall regions touching the outer ring are never opened.
    pub fn prune(&self, grid: &mut OccupancyGrid) -> PruneOutcome {
        let mut report = PruneReport::default();

        for region in RegionExtractor::regions_of(grid, Tile::Wall) {
            if region.len() < self.wall_threshold && !touches_border(grid, &region) {
                report.wall_regions_removed += 1;
                report.tiles_flipped += flip(grid, &region);
            }
        }

        let mut rooms = Vec::new();
        for region in RegionExtractor::regions_of(grid, Tile::Open) {
            if region.len() < self.room_threshold {
                report.room_regions_removed += 1;
                report.tiles_flipped += flip(grid, &region);
            } else {
                rooms.push(region);
            }
        }

        tracing::debug!(
            walls_removed = report.wall_regions_removed,
            rooms_removed = report.room_regions_removed,
            rooms_kept = rooms.len(),
            "pruned regions"
        );

        PruneOutcome { rooms, report }
    }
}

fn touches_border(grid: &OccupancyGrid, region: &Region) -> bool {
    region.tiles.iter().any(|c| grid.is_border(c.x, c.y))
}

fn flip(grid: &mut OccupancyGrid, region: &Region) -> usize {
    let target = region.tile.flipped();
    for coord in &region.tiles {
        grid.set(coord.x, coord.y, target);
    }
    region.len()
}
