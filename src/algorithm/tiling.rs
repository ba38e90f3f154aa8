//! Tiling generation over a compiled tile set

use crate::{
    algorithm::{
        executor::{GridStatus, WaveSolver},
        selection::RandomSelector,
    },
    analysis::adjacency::{CompiledTileset, OrientedTile},
    io::{
        configuration::TilingConfig,
        error::{Result, invalid_input, invalid_parameter},
    },
    spatial::{GridDimensions, Orientation},
};
use ndarray::{Array2, ArrayView2, Axis, concatenate};
use std::sync::Arc;

/// Generator placing oriented tiles so every neighbor pair obeys the rules
#[derive(Debug)]
pub struct TilingWfc<P> {
    tileset: Arc<CompiledTileset<P>>,
    config: TilingConfig,
    solver: WaveSolver,
}

impl<P> TilingWfc<P> {
    /// Prepare a wave over a compiled tile set
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range
    pub fn new(tileset: Arc<CompiledTileset<P>>, config: TilingConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| {
            let seed = RandomSelector::random_seed();
            tracing::info!(seed, "no seed configured, drew one from system entropy");
            seed
        });
        let solver = Self::build_solver(&tileset, &config, seed)?;
        Ok(Self {
            tileset,
            config,
            solver,
        })
    }

    /// Force the cell at `(row, col)` to hold tile `name` in `orientation`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tile is called `name`
    /// - `orientation` is outside the tile's orientation count
    /// - The position is outside the grid
    /// - The tile is excluded there or its propagation contradicts
    pub fn set_tile(&mut self, name: &str, orientation: usize, row: usize, col: usize) -> Result<()> {
        let tile = self
            .tileset
            .tile_index(name)
            .ok_or_else(|| invalid_input(&format!("unknown tile '{name}'")))?;
        let element = self.tileset.element_id(tile, orientation).ok_or_else(|| {
            invalid_parameter(
                "orientation",
                &orientation,
                &format!("out of range for tile '{name}'"),
            )
        })?;
        self.solver.restrict_to(row, col, element)
    }

    /// Run to completion
    ///
    /// # Errors
    ///
    /// Returns an error if generation reaches a contradiction
    pub fn run(&mut self) -> Result<Array2<OrientedTile>> {
        let ids = self.solver.run()?;
        let cells = ids
            .iter()
            .map(|&id| self.tileset.oriented(id))
            .collect::<Option<Vec<OrientedTile>>>()
            .ok_or_else(|| invalid_input(&"solved wave references an unknown element"))?;
        Array2::from_shape_vec(ids.dim(), cells)
            .map_err(|err| invalid_input(&format!("output shape mismatch: {err}")))
    }

    /// Rebuild a fresh wave with a new seed, clearing injected tiles
    ///
    /// # Errors
    ///
    /// Returns an error if the wave cannot be built
    pub fn reset(&mut self, seed: u64) -> Result<()> {
        self.solver = Self::build_solver(&self.tileset, &self.config, seed)?;
        Ok(())
    }

    /// Effective seed of the current wave
    pub const fn seed(&self) -> u64 {
        self.solver.seed()
    }

    /// Lifecycle status of the current wave
    pub const fn status(&self) -> GridStatus {
        self.solver.status()
    }

    /// Configuration in effect
    pub const fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// Compiled tile set shared by this generator
    pub const fn tileset(&self) -> &Arc<CompiledTileset<P>> {
        &self.tileset
    }

    /// Underlying solver, for inspecting domains
    pub const fn solver(&self) -> &WaveSolver {
        &self.solver
    }

    fn build_solver(
        tileset: &CompiledTileset<P>,
        config: &TilingConfig,
        seed: u64,
    ) -> Result<WaveSolver> {
        let dimensions = GridDimensions::new(config.width, config.height, config.periodic_output);
        WaveSolver::new(Arc::clone(tileset.model()), dimensions, seed)
    }
}

impl<T: Clone> TilingWfc<Array2<T>> {
    /// Stitch tile payloads into one grid
    ///
    /// Each cell becomes its tile's payload under the cell's orientation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The result is empty or references unknown tiles
    /// - Payloads are not square or differ in size
    pub fn render(&self, result: &Array2<OrientedTile>) -> Result<Array2<T>> {
        if result.is_empty() {
            return Err(invalid_input(&"nothing to render"));
        }
        let mut rows = Vec::with_capacity(result.nrows());
        for result_row in result.rows() {
            let blocks = result_row
                .iter()
                .map(|cell| self.oriented_payload(*cell))
                .collect::<Result<Vec<Array2<T>>>>()?;
            let views: Vec<ArrayView2<'_, T>> = blocks.iter().map(Array2::view).collect();
            let stitched = concatenate(Axis(1), &views)
                .map_err(|err| invalid_input(&format!("payloads differ in size: {err}")))?;
            rows.push(stitched);
        }
        let views: Vec<ArrayView2<'_, T>> = rows.iter().map(Array2::view).collect();
        concatenate(Axis(0), &views)
            .map_err(|err| invalid_input(&format!("payloads differ in size: {err}")))
    }

    fn oriented_payload(&self, cell: OrientedTile) -> Result<Array2<T>> {
        let tile = self
            .tileset
            .tile(cell.tile)
            .ok_or_else(|| invalid_input(&format!("unknown tile index {}", cell.tile)))?;
        let (rows, cols) = tile.payload.dim();
        if rows != cols {
            return Err(invalid_input(&format!(
                "payload of '{}' is {rows}x{cols}, not square",
                tile.name
            )));
        }
        let orientation = Orientation::new(cell.orientation).ok_or_else(|| {
            invalid_parameter("orientation", &cell.orientation, &"must be below 8")
        })?;
        Ok(orientation.apply(&tile.payload.view()))
    }
}
