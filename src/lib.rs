//! Wave function collapse generation for grids and tile layouts
//!
//! Two front ends share one propagation engine. The overlapping generator
//! extracts N×N patterns (with rotations and reflections) from a sample grid
//! and derives compatibility from how patterns overlap. The tiling generator
//! compiles named, symmetry-annotated tiles and compact left-of rules into a
//! full orientation-aware compatibility table. Either way the engine keeps a
//! domain per cell, repeatedly collapses the lowest-entropy cell with a seeded
//! weighted draw and propagates the consequences until every cell is decided
//! or some cell runs out of options.

/// Wave solver, propagation, random selection and the two generators
pub mod algorithm;
/// Pattern catalogs, tile set compilation and compatibility tables
pub mod analysis;
/// Errors, configuration, image and CLI boundary
pub mod io;
/// Entropy bookkeeping helpers
pub mod math;
/// Directions, grid geometry and orientation transforms
pub mod spatial;

pub use algorithm::{
    executor::{CellState, GridStatus, WaveSolver},
    overlapping::OverlappingWfc,
    session::{GeneratedGrid, GenerationMode, GenerationSession},
    tiling::TilingWfc,
};
pub use analysis::{
    AdjacencyRule, CompatibilityTable, CompiledTileset, Model, OrientedTile, PatternCatalog,
    Symmetry, TileDefinition,
};
pub use io::configuration::{OverlappingConfig, TilingConfig};
pub use io::error::{Result, WfcError};
