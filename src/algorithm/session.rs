//! A single generation entry point that can be configured for either variant
//!
//! The session starts unconfigured. Initializing it for one variant replaces
//! whatever generator it held before; operations belonging to the other
//! variant then fail with [`WfcError::NotInitialized`].

use crate::{
    algorithm::{overlapping::OverlappingWfc, tiling::TilingWfc},
    analysis::adjacency::{AdjacencyRule, CompiledTileset, OrientedTile, TileDefinition},
    io::{
        configuration::{OverlappingConfig, TilingConfig},
        error::{Result, WfcError},
    },
};
use ndarray::Array2;
use std::hash::Hash;
use std::sync::Arc;

/// Which generator a session currently holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationMode {
    /// Nothing configured yet
    Unconfigured,
    /// Overlapping-pattern generation from a sample
    Overlapping,
    /// Tiling generation from a tile set
    Tiling,
}

/// Output of the most recent successful generation
#[derive(Clone, Debug, PartialEq)]
pub enum GeneratedGrid<T> {
    /// Cell values of an overlapping generation
    Overlapping(Array2<T>),
    /// Oriented tiles of a tiling generation
    Tiling(Array2<OrientedTile>),
}

#[derive(Debug)]
enum Generator<T, P> {
    Unconfigured,
    Overlapping(Box<OverlappingWfc<T>>),
    Tiling(Box<TilingWfc<P>>),
}

/// Generation session over cell values `T` and tile payloads `P`
#[derive(Debug)]
pub struct GenerationSession<T, P> {
    generator: Generator<T, P>,
    last_result: Option<GeneratedGrid<T>>,
}

impl<T, P> Default for GenerationSession<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> GenerationSession<T, P> {
    /// Create an unconfigured session
    pub const fn new() -> Self {
        Self {
            generator: Generator::Unconfigured,
            last_result: None,
        }
    }

    /// Which generator the session holds
    pub const fn mode(&self) -> GenerationMode {
        match self.generator {
            Generator::Unconfigured => GenerationMode::Unconfigured,
            Generator::Overlapping(_) => GenerationMode::Overlapping,
            Generator::Tiling(_) => GenerationMode::Tiling,
        }
    }

    /// Output of the most recent successful [`Self::generate`]
    pub const fn last_result(&self) -> Option<&GeneratedGrid<T>> {
        self.last_result.as_ref()
    }

    /// Configure the session for tiling generation
    ///
    /// Returns the compiled tile set so callers can inspect skipped rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile set or configuration is invalid
    pub fn initialize_tiling(
        &mut self,
        tiles: Vec<TileDefinition<P>>,
        rules: &[AdjacencyRule],
        config: TilingConfig,
    ) -> Result<Arc<CompiledTileset<P>>> {
        let tileset = Arc::new(CompiledTileset::compile(tiles, rules)?);
        let generator = TilingWfc::new(Arc::clone(&tileset), config)?;
        self.generator = Generator::Tiling(Box::new(generator));
        self.last_result = None;
        Ok(tileset)
    }

    /// Force a tile at a grid position
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not configured for tiling or the
    /// injection is rejected
    pub fn set_tile(&mut self, name: &str, orientation: usize, row: usize, col: usize) -> Result<()> {
        match &mut self.generator {
            Generator::Tiling(generator) => generator.set_tile(name, orientation, row, col),
            _ => Err(not_initialized("set a tile", "tiling")),
        }
    }

    /// Reseed the configured generator, clearing injections and the last result
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is configured or the wave cannot be rebuilt
    pub fn reset(&mut self, seed: u64) -> Result<()>
    where
        T: Clone + Eq + Hash,
    {
        self.last_result = None;
        match &mut self.generator {
            Generator::Unconfigured => Err(not_initialized("reset", "overlapping or tiling")),
            Generator::Overlapping(generator) => generator.reset(seed),
            Generator::Tiling(generator) => generator.reset(seed),
        }
    }
}

impl<T: Clone + Eq + Hash, P> GenerationSession<T, P> {
    /// Configure the session for overlapping generation
    ///
    /// # Errors
    ///
    /// Returns an error if the sample or configuration is invalid
    pub fn initialize_overlapping(&mut self, sample: &Array2<T>, config: OverlappingConfig) -> Result<()> {
        let generator = OverlappingWfc::new(sample, config)?;
        self.generator = Generator::Overlapping(Box::new(generator));
        self.last_result = None;
        Ok(())
    }

    /// Force a pattern at a wave position
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not configured for overlapping
    /// generation or the injection is rejected
    pub fn set_pattern(&mut self, pattern: &Array2<T>, row: usize, col: usize) -> Result<()> {
        match &mut self.generator {
            Generator::Overlapping(generator) => generator.set_pattern(pattern, row, col),
            _ => Err(not_initialized("set a pattern", "overlapping")),
        }
    }

    /// Run the configured generator to completion
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is configured or generation fails; the
    /// previous result is discarded either way
    pub fn generate(&mut self) -> Result<&GeneratedGrid<T>> {
        self.last_result = None;
        let grid = match &mut self.generator {
            Generator::Unconfigured => {
                return Err(not_initialized("generate", "overlapping or tiling"));
            }
            Generator::Overlapping(generator) => GeneratedGrid::Overlapping(generator.run()?),
            Generator::Tiling(generator) => GeneratedGrid::Tiling(generator.run()?),
        };
        Ok(self.last_result.insert(grid))
    }
}

const fn not_initialized(operation: &'static str, expected: &'static str) -> WfcError {
    WfcError::NotInitialized {
        operation,
        expected,
    }
}
