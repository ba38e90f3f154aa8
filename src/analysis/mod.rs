//! Catalog construction for both generation variants
//!
//! Sample grids are reduced to pattern catalogs with overlap-derived
//! compatibility; symmetry-annotated tile sets are compiled into oriented
//! elements with rule-derived compatibility. Both produce a [`Model`] for the
//! propagation engine.

/// Tile set compilation and rule orientation closure
pub mod adjacency;
/// Direction-aware compatibility tables and the engine model
pub mod compatibility;
/// Pattern extraction and overlap agreement
pub mod patterns;
/// Tile symmetry classes and orientation action maps
pub mod symmetry;

pub use adjacency::{AdjacencyRule, CompiledTileset, OrientedTile, TileDefinition};
pub use compatibility::{CompatibilityTable, Model};
pub use patterns::PatternCatalog;
pub use symmetry::Symmetry;
