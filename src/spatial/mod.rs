//! Spatial data structures and block transforms
//!
//! This module contains spatial-related functionality including:
//! - Axis directions between neighboring cells
//! - Wave grid geometry with periodic wrapping
//! - Dihedral orientation transforms for square blocks

/// Axis directions and their inversions
pub mod direction;
/// Wave grid dimensions and neighbor lookup
pub mod grid;
/// Rotation and reflection of square blocks
pub mod transform;

pub use direction::Direction;
pub use grid::GridDimensions;
pub use transform::Orientation;
