//! Wave grid geometry with optional toroidal wrapping
//!
//! Cells are addressed either by `(row, col)` or by a flat index in row-major
//! order. Neighbor lookups wrap around the edges for periodic grids and return
//! `None` past the border otherwise.

use crate::spatial::direction::Direction;

/// Dimensions and boundary behavior of a wave grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Whether opposite edges are adjacent
    pub periodic: bool,
}

impl GridDimensions {
    /// Create grid dimensions
    pub const fn new(width: usize, height: usize, periodic: bool) -> Self {
        Self {
            width,
            height,
            periodic,
        }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Dimensions as `(rows, cols)`, the ndarray shape convention
    pub const fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Flat index of a cell, if it lies within the grid
    pub const fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    /// Row and column of a flat index
    pub const fn position(&self, index: usize) -> (usize, usize) {
        if self.width == 0 {
            return (0, 0);
        }
        (index / self.width, index % self.width)
    }

    /// Flat index of the neighbor in the given direction
    ///
    /// Periodic grids wrap around; bounded grids return `None` past the edge.
    pub const fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        if index >= self.cell_count() {
            return None;
        }
        let (row, col) = self.position(index);
        let (dr, dc) = direction.offset();
        let row = row as isize + dr;
        let col = col as isize + dc;
        let height = self.height as isize;
        let width = self.width as isize;

        if self.periodic {
            let wrapped_row = (row + height) % height;
            let wrapped_col = (col + width) % width;
            self.index(wrapped_row as usize, wrapped_col as usize)
        } else if row < 0 || col < 0 || row >= height || col >= width {
            None
        } else {
            self.index(row as usize, col as usize)
        }
    }
}
