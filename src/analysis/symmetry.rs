//! Tile symmetry classes and their orientation action maps
//!
//! A symmetry class fixes how many distinct orientations a tile has and how
//! the dihedral group permutes them. Orientation indices follow
//! [`crate::spatial::Orientation`]: quarter turns clockwise first, mirrored
//! orientations from 4 on.

use crate::{
    io::error::{WfcError, invalid_input},
    spatial::{Direction, transform::ORIENTATION_COUNT},
};
use std::fmt;
use std::str::FromStr;

/// Symmetry class of a tile, named after the letter it resembles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// Invariant under every rotation and reflection
    X,
    /// Mirror symmetric across the vertical axis
    T,
    /// Invariant under half turns and both axis mirrors
    I,
    /// Mirror symmetric across a diagonal
    L,
    /// Symmetric across both diagonals, written `\`
    Backslash,
    /// No symmetry
    P,
}

impl Symmetry {
    /// Number of distinct orientations
    pub const fn orientation_count(self) -> usize {
        match self {
            Self::X => 1,
            Self::I | Self::Backslash => 2,
            Self::T | Self::L => 4,
            Self::P => 8,
        }
    }

    /// Orientation reached by a quarter turn clockwise, per orientation
    pub const fn rotation_map(self) -> &'static [usize] {
        match self {
            Self::X => &[0],
            Self::I | Self::Backslash => &[1, 0],
            Self::T | Self::L => &[1, 2, 3, 0],
            Self::P => &[1, 2, 3, 0, 5, 6, 7, 4],
        }
    }

    /// Orientation reached by a left-right mirror, per orientation
    pub const fn reflection_map(self) -> &'static [usize] {
        match self {
            Self::X => &[0],
            Self::I => &[0, 1],
            Self::Backslash => &[1, 0],
            Self::T => &[0, 3, 2, 1],
            Self::L => &[3, 2, 1, 0],
            Self::P => &[4, 7, 6, 5, 0, 3, 2, 1],
        }
    }

    /// Orientation permutation of each of the 8 dihedral actions
    ///
    /// Action 0 is the identity, 1-3 are quarter turns clockwise, 4 is the
    /// mirror and 5-7 rotate after mirroring. `action_map()[a][o]` is the
    /// orientation reached from `o` under action `a`.
    pub fn action_map(self) -> Vec<Vec<usize>> {
        let rotation = self.rotation_map();
        let reflection = self.reflection_map();
        let apply = |map: &[usize], orientations: &[usize]| -> Vec<usize> {
            orientations
                .iter()
                .map(|&o| map.get(o).copied().unwrap_or(o))
                .collect()
        };

        let identity: Vec<usize> = (0..self.orientation_count()).collect();
        let mut actions = Vec::with_capacity(ORIENTATION_COUNT);
        let mut current = identity.clone();
        for _ in 0..4 {
            let next = apply(rotation, &current);
            actions.push(current);
            current = next;
        }
        current = apply(reflection, &identity);
        for _ in 0..4 {
            let next = apply(rotation, &current);
            actions.push(current);
            current = next;
        }
        actions
    }

    /// Tag used in tile set descriptions
    pub const fn tag(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::T => "T",
            Self::I => "I",
            Self::L => "L",
            Self::Backslash => "\\",
            Self::P => "P",
        }
    }
}

/// Direction a rightward neighbor ends up in after each dihedral action
///
/// Same action order as [`Symmetry::action_map`].
pub const ACTION_DIRECTIONS: [Direction; ORIENTATION_COUNT] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
    Direction::Left,
    Direction::Up,
    Direction::Right,
    Direction::Down,
];

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Symmetry {
    type Err = WfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" => Ok(Self::X),
            "T" => Ok(Self::T),
            "I" => Ok(Self::I),
            "L" => Ok(Self::L),
            "\\" | "backslash" => Ok(Self::Backslash),
            "P" => Ok(Self::P),
            other => Err(invalid_input(&format!("unknown symmetry class '{other}'"))),
        }
    }
}
