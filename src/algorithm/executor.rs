use crate::{
    algorithm::{
        bitset::ElementSet,
        propagation::Propagator,
        selection::RandomSelector,
        wave::{Observation, Wave},
    },
    analysis::compatibility::Model,
    io::error::{Result, WfcError, invalid_parameter},
    spatial::GridDimensions,
};
use ndarray::Array2;
use std::sync::Arc;

/// Lifecycle of a wave
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridStatus {
    /// Built and propagated; no observation yet
    Ready,
    /// At least one observation performed
    Collapsing,
    /// Every cell holds exactly one element
    Solved,
    /// Some cell lost every element
    Failed,
}

/// What a single cell currently allows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// More than one element remains
    Undetermined(usize),
    /// Exactly one element remains
    Collapsed(usize),
    /// No element remains
    Contradiction,
}

/// Wave function collapse solver over a shared model
///
/// Owns one wave with its support counters and random stream. The model is
/// shared read-only, so any number of solvers can run over the same catalog.
#[derive(Debug)]
pub struct WaveSolver {
    model: Arc<Model>,
    wave: Wave,
    propagator: Propagator,
    selector: RandomSelector,
    seed: u64,
    status: GridStatus,
    iteration: usize,
}

impl WaveSolver {
    /// Build a fresh wave over `dimensions` and propagate its initial state
    ///
    /// Zero-weight elements and elements with no support from an existing
    /// neighbor are removed up front. If that already empties a cell the
    /// solver starts out [`GridStatus::Failed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has no cells or the model has no elements
    pub fn new(model: Arc<Model>, dimensions: GridDimensions, seed: u64) -> Result<Self> {
        if dimensions.cell_count() == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{}x{}", dimensions.width, dimensions.height),
                &"wave must contain at least one cell",
            ));
        }
        if model.element_count() == 0 {
            return Err(invalid_parameter(
                "model",
                &0,
                &"catalog must contain at least one element",
            ));
        }

        let mut wave = Wave::new(dimensions, model.weights());
        let mut propagator = Propagator::new(dimensions, model.table());
        propagator.remove_unsupported(&mut wave);

        let mut solver = Self {
            model,
            wave,
            propagator,
            selector: RandomSelector::new(seed),
            seed,
            status: GridStatus::Ready,
            iteration: 0,
        };
        if solver.first_empty_cell().is_some() || solver.propagate().is_err() {
            solver.status = GridStatus::Failed;
        }

        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            periodic = dimensions.periodic,
            elements = solver.model.element_count(),
            seed,
            status = ?solver.status,
            "initialized wave"
        );
        Ok(solver)
    }

    /// Seed of the random stream
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Current lifecycle status
    pub const fn status(&self) -> GridStatus {
        self.status
    }

    /// Number of observations performed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Wave geometry
    pub const fn dimensions(&self) -> GridDimensions {
        self.wave.dimensions()
    }

    /// Model the solver runs over
    pub const fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Remaining elements at a wave position
    pub fn domain(&self, row: usize, col: usize) -> Option<&ElementSet> {
        let cell = self.dimensions().index(row, col)?;
        self.wave.domain(cell)
    }

    /// State of a wave position
    pub fn cell_state(&self, row: usize, col: usize) -> Option<CellState> {
        let domain = self.domain(row, col)?;
        Some(match domain.count() {
            0 => CellState::Contradiction,
            1 => domain
                .single()
                .map_or(CellState::Contradiction, CellState::Collapsed),
            count => CellState::Undetermined(count),
        })
    }

    /// Remove one element from a cell and propagate
    ///
    /// Removing an element that is already gone is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The position or element is out of range
    /// - The removal leaves some cell without elements
    pub fn ban(&mut self, row: usize, col: usize, element: usize) -> Result<()> {
        let cell = self.checked_cell(row, col, element)?;
        if self.status == GridStatus::Failed {
            return Err(WfcError::ConstraintConflict { row, col, element });
        }
        self.propagator.remove(&mut self.wave, cell, element);
        if self.wave.count(cell) == 0 || self.propagate().is_err() {
            self.status = GridStatus::Failed;
            return Err(WfcError::ConstraintConflict { row, col, element });
        }
        self.refresh_status();
        Ok(())
    }

    /// Force a cell to a single element and propagate
    ///
    /// Injecting an element a cell already holds alone changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The position or element is out of range
    /// - The element is no longer possible at that position
    /// - Propagating the injection empties some cell
    pub fn restrict_to(&mut self, row: usize, col: usize, element: usize) -> Result<()> {
        let cell = self.checked_cell(row, col, element)?;
        if self.status == GridStatus::Failed || !self.wave.contains(cell, element) {
            tracing::debug!(row, col, element, "injected element already excluded");
            return Err(WfcError::ConstraintConflict { row, col, element });
        }
        self.collapse(cell, element);
        if self.propagate().is_err() {
            self.status = GridStatus::Failed;
            tracing::debug!(row, col, element, "injection led to a contradiction");
            return Err(WfcError::ConstraintConflict { row, col, element });
        }
        self.refresh_status();
        Ok(())
    }

    /// Perform one observation followed by propagation
    ///
    /// # Errors
    ///
    /// Returns an error if the wave is or becomes contradictory
    pub fn step(&mut self) -> Result<GridStatus> {
        match self.status {
            GridStatus::Failed => return Err(self.contradiction()),
            GridStatus::Solved => return Ok(GridStatus::Solved),
            GridStatus::Ready | GridStatus::Collapsing => {}
        }

        match self.wave.select_cell(&mut self.selector) {
            Observation::Collapsed => {
                self.status = GridStatus::Solved;
            }
            Observation::Contradiction(cell) => {
                return Err(self.fail(cell));
            }
            Observation::Cell(cell) => {
                self.iteration += 1;
                self.status = GridStatus::Collapsing;
                let Some(element) = self.wave.draw(cell, &mut self.selector) else {
                    return Err(self.fail(cell));
                };
                self.collapse(cell, element);
                if let Err(emptied) = self.propagate() {
                    return Err(self.fail(emptied));
                }
            }
        }
        Ok(self.status)
    }

    /// Observe and propagate until the wave is solved
    ///
    /// # Errors
    ///
    /// Returns an error if a contradiction is reached. The wave keeps its
    /// failed state; only [`Self::domain`] and [`Self::cell_state`] remain
    /// meaningful.
    pub fn run(&mut self) -> Result<Array2<usize>> {
        while self.step()? != GridStatus::Solved {}
        self.result().ok_or_else(|| self.contradiction())
    }

    /// The collapsed element of every cell, once solved
    pub fn result(&self) -> Option<Array2<usize>> {
        if self.status != GridStatus::Solved {
            return None;
        }
        let cells = self.wave.collapsed()?;
        Array2::from_shape_vec(self.dimensions().shape(), cells).ok()
    }

    fn checked_cell(&self, row: usize, col: usize, element: usize) -> Result<usize> {
        let dimensions = self.dimensions();
        let Some(cell) = dimensions.index(row, col) else {
            return Err(invalid_parameter(
                "position",
                &format!("({row}, {col})"),
                &format!(
                    "outside the {}x{} wave",
                    dimensions.width, dimensions.height
                ),
            ));
        };
        if element >= self.model.element_count() {
            return Err(invalid_parameter(
                "element",
                &element,
                &format!("catalog has {} elements", self.model.element_count()),
            ));
        }
        Ok(cell)
    }

    fn collapse(&mut self, cell: usize, element: usize) {
        let others: Vec<usize> = self
            .wave
            .domain(cell)
            .map(|domain| domain.iter().filter(|&e| e != element).collect())
            .unwrap_or_default();
        for other in others {
            self.propagator.remove(&mut self.wave, cell, other);
        }
    }

    fn propagate(&mut self) -> std::result::Result<(), usize> {
        self.propagator
            .propagate(&mut self.wave, self.model.table())
            .map_or(Ok(()), Err)
    }

    fn first_empty_cell(&self) -> Option<usize> {
        (0..self.dimensions().cell_count()).find(|&cell| self.wave.count(cell) == 0)
    }

    fn refresh_status(&mut self) {
        if self.wave.collapsed().is_some() {
            self.status = GridStatus::Solved;
        }
    }

    fn fail(&mut self, cell: usize) -> WfcError {
        self.status = GridStatus::Failed;
        let (row, col) = self.dimensions().position(cell);
        tracing::warn!(
            iteration = self.iteration,
            row,
            col,
            seed = self.seed,
            "contradiction during generation"
        );
        self.contradiction()
    }

    const fn contradiction(&self) -> WfcError {
        WfcError::GenerationContradiction {
            iteration: self.iteration,
            grid_dimensions: self.wave.dimensions().shape(),
        }
    }
}
