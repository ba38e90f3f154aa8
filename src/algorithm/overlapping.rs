//! Overlapping-pattern generation
//!
//! Wave cells hold pattern indices. A solved wave is turned back into cell
//! values by taking the top-left value of each cell's pattern; for bounded
//! outputs the last row and column of patterns also fill the right and bottom
//! margins.

use crate::{
    algorithm::{
        executor::{GridStatus, WaveSolver},
        selection::RandomSelector,
    },
    analysis::patterns::PatternCatalog,
    io::{
        configuration::OverlappingConfig,
        error::{Result, invalid_input},
    },
    spatial::GridDimensions,
};
use ndarray::Array2;
use std::hash::Hash;
use std::sync::Arc;

/// Generator producing grids locally similar to a sample
#[derive(Debug)]
pub struct OverlappingWfc<T> {
    catalog: Arc<PatternCatalog<T>>,
    config: OverlappingConfig,
    solver: WaveSolver,
}

impl<T: Clone + Eq + Hash> OverlappingWfc<T> {
    /// Extract a pattern catalog from `sample` and prepare a wave
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is out of range
    /// - The sample is empty or too small for the pattern size
    /// - Ground is requested but the bottom-center window is not a pattern
    /// - The ground pattern cannot be placed along the bottom row
    pub fn new(sample: &Array2<T>, config: OverlappingConfig) -> Result<Self> {
        config.validate()?;
        let catalog = PatternCatalog::extract(
            sample,
            config.pattern_size,
            config.periodic_input,
            config.symmetry,
        )?;
        Self::with_catalog(Arc::new(catalog), config)
    }

    /// Prepare a wave over an existing catalog
    ///
    /// The catalog's pattern size overrides `config.pattern_size`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is out of range
    /// - Ground is requested but the catalog has no ground pattern
    /// - The ground pattern cannot be placed along the bottom row
    pub fn with_catalog(catalog: Arc<PatternCatalog<T>>, config: OverlappingConfig) -> Result<Self> {
        let config = OverlappingConfig {
            pattern_size: catalog.pattern_size(),
            ..config
        };
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| {
            let seed = RandomSelector::random_seed();
            tracing::info!(seed, "no seed configured, drew one from system entropy");
            seed
        });
        let solver = Self::build_solver(&catalog, &config, seed)?;
        Ok(Self {
            catalog,
            config,
            solver,
        })
    }

    /// Force the wave cell at `(row, col)` to hold `pattern`
    ///
    /// Coordinates are wave coordinates, which coincide with the top-left
    /// output cell of the pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `pattern` is not in the catalog
    /// - The position is outside the wave
    /// - The pattern is excluded there or its propagation contradicts
    pub fn set_pattern(&mut self, pattern: &Array2<T>, row: usize, col: usize) -> Result<()> {
        let id = self
            .catalog
            .pattern_id(pattern)
            .ok_or_else(|| invalid_input(&"pattern does not occur in the sample catalog"))?;
        self.solver.restrict_to(row, col, id)
    }

    /// Run to completion and reconstruct the output grid
    ///
    /// # Errors
    ///
    /// Returns an error if generation reaches a contradiction
    pub fn run(&mut self) -> Result<Array2<T>> {
        let ids = self.solver.run()?;
        self.reconstruct(&ids)
    }

    /// Rebuild a fresh wave with a new seed
    ///
    /// Injected patterns are cleared; ground is applied again.
    ///
    /// # Errors
    ///
    /// Returns an error if the ground pattern cannot be placed
    pub fn reset(&mut self, seed: u64) -> Result<()> {
        self.solver = Self::build_solver(&self.catalog, &self.config, seed)?;
        Ok(())
    }

    fn build_solver(
        catalog: &PatternCatalog<T>,
        config: &OverlappingConfig,
        seed: u64,
    ) -> Result<WaveSolver> {
        let (width, height) = config.wave_size();
        let dimensions = GridDimensions::new(width, height, config.periodic_output);
        let mut solver = WaveSolver::new(Arc::clone(catalog.model()), dimensions, seed)?;
        if config.ground {
            let ground = catalog.ground_pattern().ok_or_else(|| {
                invalid_input(&"ground requested but the bottom-center window is not a pattern")
            })?;
            apply_ground(&mut solver, ground)?;
        }
        Ok(solver)
    }

    fn reconstruct(&self, ids: &Array2<usize>) -> Result<Array2<T>> {
        let (wave_rows, wave_cols) = ids.dim();
        let (out_rows, out_cols) = (self.config.out_height, self.config.out_width);
        if wave_rows == 0 || wave_cols == 0 {
            return Err(invalid_input(&"wave has no cells"));
        }

        let cells = (0..out_rows)
            .flat_map(|y| (0..out_cols).map(move |x| (y, x)))
            .map(|(y, x)| {
                let wy = y.min(wave_rows - 1);
                let wx = x.min(wave_cols - 1);
                let id = ids.get((wy, wx))?;
                self.catalog
                    .pattern(*id)?
                    .get((y - wy, x - wx))
                    .cloned()
            })
            .collect::<Option<Vec<T>>>()
            .ok_or_else(|| invalid_input(&"solved wave references an unknown pattern"))?;

        Array2::from_shape_vec((out_rows, out_cols), cells)
            .map_err(|err| invalid_input(&format!("output shape mismatch: {err}")))
    }
}

impl<T> OverlappingWfc<T> {
    /// Effective seed of the current wave
    pub const fn seed(&self) -> u64 {
        self.solver.seed()
    }

    /// Lifecycle status of the current wave
    pub const fn status(&self) -> GridStatus {
        self.solver.status()
    }

    /// Configuration in effect
    pub const fn config(&self) -> &OverlappingConfig {
        &self.config
    }

    /// Pattern catalog shared by this generator
    pub const fn catalog(&self) -> &Arc<PatternCatalog<T>> {
        &self.catalog
    }

    /// Underlying solver, for inspecting domains
    pub const fn solver(&self) -> &WaveSolver {
        &self.solver
    }
}

/// Pin `ground` to the bottom wave row and forbid it everywhere else
fn apply_ground(solver: &mut WaveSolver, ground: usize) -> Result<()> {
    let dimensions = solver.dimensions();
    let bottom = dimensions.height - 1;
    for col in 0..dimensions.width {
        solver.restrict_to(bottom, col, ground)?;
    }
    for row in 0..bottom {
        for col in 0..dimensions.width {
            solver.ban(row, col, ground)?;
        }
    }
    tracing::debug!(ground, "applied ground pattern");
    Ok(())
}
