//! # Cave Generator
//!
//! Runs the grid stages in order:
//!
//! ```text
//! random fill -> smoothing -> region pruning -> room graph
//! ```
//!
//! The grid is moved from stage to stage. The random source is created
//! once per call and only the fill draws from it, so the same seed and
//! configuration always produce the same cave.

use crate::automaton::CellularAutomaton;
use crate::config::GenerationConfig;
use crate::error::ConfigResult;
use crate::grid::{OccupancyGrid, Tile};
use crate::region::{PruneReport, RegionPruner};
use crate::room::{RoomGraph, RoomGraphBuilder};
use crate::seed::{MapRng, MapSeed};

/// Output of the grid stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedCave {
    /// Seed the cave was generated from.
    pub seed: MapSeed,
    /// Final occupancy, passages included.
    pub grid: OccupancyGrid,
    /// Rooms and their passages.
    pub rooms: RoomGraph,
    /// What pruning removed.
    pub prune: PruneReport,
}

/// Generates occupancy grids from a validated configuration.
#[derive(Clone, Debug)]
pub struct CaveGenerator {
    config: GenerationConfig,
}

impl CaveGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure of `config`.
    pub fn new(config: GenerationConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Runs every grid stage for `seed`.
    #[must_use]
    pub fn generate(&self, seed: MapSeed) -> GeneratedCave {
        let mut rng = MapRng::new(seed);
        let mut grid = OccupancyGrid::new(self.config.width, self.config.height);
        grid.randomize(&mut rng, self.config.fill_percent);
        tracing::debug!(
            %seed,
            width = self.config.width,
            height = self.config.height,
            walls = grid.count(Tile::Wall),
            "random fill"
        );

        let grid = CellularAutomaton::new(self.config.smoothing_iterations).run(grid);
        tracing::debug!(
            iterations = self.config.smoothing_iterations,
            walls = grid.count(Tile::Wall),
            "smoothed"
        );

        self.finish(seed, grid)
    }

    /// Prunes and connects an existing grid.
    ///
    /// Skips the fill and smoothing stages, so hand-made maps can go
    /// through the same repair steps.
    #[must_use]
    pub fn finish(&self, seed: MapSeed, mut grid: OccupancyGrid) -> GeneratedCave {
        let outcome = RegionPruner::new(self.config.wall_threshold, self.config.room_threshold)
            .prune(&mut grid);

        let rooms = RoomGraphBuilder::new(self.config.passage_radius).build(&mut grid, outcome.rooms);
        if rooms.is_empty() {
            tracing::warn!(%seed, "generated cave has no rooms");
        }

        GeneratedCave {
            seed,
            grid,
            rooms,
            prune: outcome.report,
        }
    }
}
