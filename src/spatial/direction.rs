//! The four axis directions used by compatibility tables and propagation

/// Axis direction between two neighboring cells
///
/// The discriminant is the index used by compatibility tables and support
/// counters. Opposite directions always sum to 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards row - 1
    Up = 0,
    /// Towards col - 1
    Left = 1,
    /// Towards col + 1
    Right = 2,
    /// Towards row + 1
    Down = 3,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Right, Self::Down];

    /// Index used for table and counter lookups
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction from its table index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Up),
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            3 => Some(Self::Down),
            _ => None,
        }
    }

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// Row and column offset of the neighbor in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
        }
    }

    /// The direction after a quarter turn clockwise
    pub const fn rotated_clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// The direction after mirroring columns
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            other => other,
        }
    }
}
