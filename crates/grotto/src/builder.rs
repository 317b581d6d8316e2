//! # Cave Builder
//!
//! Seed and configuration in, [`CaveLayout`] out:
//!
//! ```text
//! CaveGenerator (grid stages) -> border padding -> CaveMesher (mesh stages)
//! ```
//!
//! Configuration is validated once, when the builder is created. A build
//! itself cannot fail.

use grotto_mesh::CaveMesher;
use grotto_procedural::{CaveGenerator, MapSeed};

use crate::config::CaveConfig;
use crate::error::GrottoResult;
use crate::layout::CaveLayout;

/// Validated pipeline, reusable across seeds.
#[derive(Clone, Debug)]
pub struct CaveBuilder {
    config: CaveConfig,
    generator: CaveGenerator,
    mesher: CaveMesher,
}

impl CaveBuilder {
    /// Creates a builder.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure of `config`.
    pub fn new(config: CaveConfig) -> GrottoResult<Self> {
        let generator = CaveGenerator::new(config.generation)?;
        let mesher = CaveMesher::new(config.mesh)?;
        Ok(Self {
            config,
            generator,
            mesher,
        })
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CaveConfig {
        &self.config
    }

    /// Builds the layout for the configured seed.
    #[must_use]
    pub fn build(&self) -> CaveLayout {
        self.build_with_seed(self.config.seed)
    }

    /// Builds the layout for `seed`, ignoring the configured one.
    #[must_use]
    pub fn build_with_seed(&self, seed: MapSeed) -> CaveLayout {
        let cave = self.generator.generate(seed);

        let border_size = self.config.generation.border_size;
        let padded = cave.grid.with_border(border_size);
        let geometry = self.mesher.mesh(&padded);

        tracing::info!(
            %seed,
            rooms = cave.rooms.len(),
            passages = cave.rooms.passages().len(),
            vertices = geometry.floor.vertex_count() + geometry.walls.vertex_count(),
            triangles = geometry.floor.triangle_count() + geometry.walls.triangle_count(),
            outlines = geometry.outlines.len(),
            "cave built"
        );

        CaveLayout {
            seed,
            grid: cave.grid,
            rooms: cave.rooms,
            floor: geometry.floor,
            walls: geometry.walls,
            outlines: geometry.outlines,
            prune: cave.prune,
            border_size,
            square_size: self.config.mesh.square_size,
        }
    }
}

/// Validates `config` and builds its layout in one call.
///
/// # Errors
///
/// Returns the first validation failure of `config`.
pub fn build(config: &CaveConfig) -> GrottoResult<CaveLayout> {
    Ok(CaveBuilder::new(*config)?.build())
}
