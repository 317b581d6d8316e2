//! # Cellular Automaton
//!
//! The cave-forming smoothing rule.
//!
//! Each pass looks at the 8 cells around every cell (off-map counts as
//! wall) and writes the result into a **new** grid:
//!
//! | Wall neighbors | Result    |
//! |----------------|-----------|
//! | more than 4    | wall      |
//! | fewer than 4   | open      |
//! | exactly 4      | unchanged |
//!
//! Reading and writing the same buffer would make the result depend on
//! scan order, so every pass allocates.

use crate::grid::{OccupancyGrid, Tile};

/// Default number of smoothing passes.
pub const DEFAULT_ITERATIONS: u32 = 5;

/// Neighbor count at which a cell keeps its state.
pub const NEUTRAL_COUNT: u8 = 4;

/// Runs the smoothing rule a fixed number of times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellularAutomaton {
    iterations: u32,
}

impl Default for CellularAutomaton {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl CellularAutomaton {
    /// Creates an automaton that runs `iterations` passes.
    #[inline]
    #[must_use]
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Configured pass count.
    #[inline]
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// One smoothing pass. `grid` is left untouched.
    #[must_use]
    pub fn step(grid: &OccupancyGrid) -> OccupancyGrid {
        let mut next = grid.clone();
        for (coord, tile) in grid.iter() {
            let walls = grid.neighbor_wall_count(coord.x, coord.y);
            let result = match walls.cmp(&NEUTRAL_COUNT) {
                std::cmp::Ordering::Greater => Tile::Wall,
                std::cmp::Ordering::Less => Tile::Open,
                std::cmp::Ordering::Equal => tile,
            };
            next.set(coord.x, coord.y, result);
        }
        next
    }

    /// Runs every configured pass, consuming the input grid.
    ///
    /// Stops early once a pass changes nothing.
    #[must_use]
    pub fn run(&self, mut grid: OccupancyGrid) -> OccupancyGrid {
        for pass in 0..self.iterations {
            let next = Self::step(&grid);
            if next == grid {
                tracing::debug!(pass, "smoothing reached a fixed point");
                return next;
            }
            grid = next;
        }
        grid
    }

    /// True when one more pass would change nothing.
    #[must_use]
    pub fn is_stable(grid: &OccupancyGrid) -> bool {
        Self::step(grid) == *grid
    }
}

impl OccupancyGrid {
    /// One smoothing pass, returning a new grid.
    #[must_use]
    pub fn smooth(&self) -> Self {
        CellularAutomaton::step(self)
    }
}
