//! Dihedral orientation transforms for square blocks
//!
//! Orientation indices follow a fixed convention shared by pattern symmetry
//! variants, tile orientations and marker decoding: 0 is the identity, 1-3
//! are quarter turns clockwise, 4 mirrors columns and 5-7 rotate the mirrored
//! block clockwise.

use ndarray::{Array2, ArrayView2, s};

/// Number of distinct dihedral orientations of a square
pub const ORIENTATION_COUNT: usize = 8;

/// One of the eight orientations of a square block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation(u8);

impl Orientation {
    /// The identity orientation
    pub const IDENTITY: Self = Self(0);

    /// All orientations in index order
    pub const ALL: [Self; ORIENTATION_COUNT] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    /// Orientation from its index, if in range
    pub const fn new(index: usize) -> Option<Self> {
        if index < ORIENTATION_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Orientation index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Number of clockwise quarter turns applied after the optional mirror
    pub const fn quarter_turns(self) -> usize {
        (self.0 % 4) as usize
    }

    /// Whether the block is mirrored before rotating
    pub const fn is_mirrored(self) -> bool {
        self.0 >= 4
    }

    /// Apply this orientation to a block
    pub fn apply<T: Clone>(self, block: &ArrayView2<'_, T>) -> Array2<T> {
        let mut current = if self.is_mirrored() {
            mirror(block)
        } else {
            block.to_owned()
        };
        for _ in 0..self.quarter_turns() {
            current = rotate_clockwise(&current.view());
        }
        current
    }
}

/// Rotate a block a quarter turn clockwise
///
/// A block of shape (rows, cols) becomes (cols, rows).
pub fn rotate_clockwise<T: Clone>(block: &ArrayView2<'_, T>) -> Array2<T> {
    block.t().slice(s![.., ..;-1]).to_owned()
}

/// Mirror a block left to right
pub fn mirror<T: Clone>(block: &ArrayView2<'_, T>) -> Array2<T> {
    block.slice(s![.., ..;-1]).to_owned()
}

/// The first `count` orientations of a block, in orientation order
///
/// Used for pattern symmetry variants, where `count` ranges from 1 to 8.
pub fn variants<T: Clone>(block: &ArrayView2<'_, T>, count: usize) -> Vec<Array2<T>> {
    Orientation::ALL
        .iter()
        .take(count)
        .map(|orientation| orientation.apply(block))
        .collect()
}
