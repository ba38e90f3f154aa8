//! Constraint propagation with per-direction support counters
//!
//! `support[(cell, element, d)]` counts the elements still possible in the
//! neighbor on the opposite side of `d` that allow `element` in direction `d`.
//! When a removal drops a counter to zero the element loses all support from
//! that side and is removed in turn.

use crate::{
    algorithm::wave::Wave,
    analysis::compatibility::CompatibilityTable,
    spatial::{Direction, GridDimensions},
};
use ndarray::Array3;
use std::collections::VecDeque;

/// An element removed from a cell whose consequences are not yet propagated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    /// Flat cell index
    pub cell: usize,
    /// Catalog index of the removed element
    pub element: usize,
}

/// FIFO queue of pending removals
#[derive(Debug)]
pub struct Frontier {
    /// Removals in the order they happened
    pub queue: VecDeque<Removal>,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    /// Create a new empty frontier
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queue a removal
    pub fn push(&mut self, removal: Removal) {
        self.queue.push_back(removal);
    }

    /// Remove and return the oldest removal
    pub fn take_next(&mut self) -> Option<Removal> {
        self.queue.pop_front()
    }

    /// Check if the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the number of pending removals
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drop all pending removals
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Support counters and pending removals for one wave
#[derive(Debug)]
pub struct Propagator {
    dimensions: GridDimensions,
    support: Array3<u32>,
    frontier: Frontier,
}

impl Propagator {
    /// Initialize counters as if every cell held every element
    pub fn new(dimensions: GridDimensions, table: &CompatibilityTable) -> Self {
        let elements = table.element_count();
        let support = Array3::from_shape_fn(
            (dimensions.cell_count(), elements, Direction::ALL.len()),
            |(_, element, d)| {
                Direction::from_index(d)
                    .map_or(0, |direction| table.support(element, direction.opposite()) as u32)
            },
        );
        Self {
            dimensions,
            support,
            frontier: Frontier::new(),
        }
    }

    /// Current support of an element in a cell from one side
    pub fn support(&self, cell: usize, element: usize, direction: Direction) -> u32 {
        self.support
            .get((cell, element, direction.index()))
            .copied()
            .unwrap_or(0)
    }

    /// Pending removals
    pub const fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Remove an element from a cell and queue the removal
    ///
    /// Clears the element's counters so later decrements cannot remove it
    /// twice. Returns whether the element was present.
    pub fn remove(&mut self, wave: &mut Wave, cell: usize, element: usize) -> bool {
        if !wave.remove(cell, element) {
            return false;
        }
        for d in 0..Direction::ALL.len() {
            if let Some(counter) = self.support.get_mut((cell, element, d)) {
                *counter = 0;
            }
        }
        self.frontier.push(Removal { cell, element });
        true
    }

    /// Remove every element lacking support from an existing neighbor
    ///
    /// Used once on a fresh wave so it starts arc-consistent. Also removes
    /// zero-weight elements. Removals are queued, not propagated.
    pub fn remove_unsupported(&mut self, wave: &mut Wave) {
        let mut doomed = Vec::new();
        for cell in 0..self.dimensions.cell_count() {
            for element in 0..wave.element_count() {
                let unsupported = Direction::ALL.iter().any(|&direction| {
                    self.dimensions
                        .neighbor(cell, direction.opposite())
                        .is_some()
                        && self.support(cell, element, direction) == 0
                });
                if unsupported || wave.weight(element) <= 0.0 {
                    doomed.push((cell, element));
                }
            }
        }
        for (cell, element) in doomed {
            self.remove(wave, cell, element);
        }
    }

    /// Drain the frontier
    ///
    /// Returns the first cell whose domain became empty; the frontier is
    /// discarded at that point.
    pub fn propagate(&mut self, wave: &mut Wave, table: &CompatibilityTable) -> Option<usize> {
        while let Some(Removal { cell, element }) = self.frontier.take_next() {
            for direction in Direction::ALL {
                let Some(neighbor) = self.dimensions.neighbor(cell, direction) else {
                    continue;
                };
                let Some(compatible) = table.compatible(element, direction) else {
                    continue;
                };
                for other in compatible.iter() {
                    let Some(counter) = self.support.get_mut((neighbor, other, direction.index()))
                    else {
                        continue;
                    };
                    if *counter == 0 {
                        continue;
                    }
                    *counter -= 1;
                    if *counter == 0 {
                        self.remove(wave, neighbor, other);
                        if wave.count(neighbor) == 0 {
                            self.frontier.clear();
                            return Some(neighbor);
                        }
                    }
                }
            }
        }
        None
    }
}
