//! Direction-aware compatibility between catalog elements
//!
//! The table answers "may element B sit in direction d of element A" for every
//! ordered pair and each of the four directions. Insertions always record the
//! mirrored fact as well, so `B ∈ compat(A, d)` holds exactly when
//! `A ∈ compat(B, opposite(d))`.

use crate::{
    algorithm::bitset::ElementSet,
    io::error::{Result, invalid_input},
    spatial::Direction,
};

/// Immutable-after-build compatibility relation over catalog indices
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompatibilityTable {
    element_count: usize,
    /// One row per (element, direction), indexed `element * 4 + direction`
    rows: Vec<ElementSet>,
}

impl CompatibilityTable {
    /// Create a table in which nothing is compatible
    pub fn new(element_count: usize) -> Self {
        Self {
            element_count,
            rows: vec![ElementSet::new(element_count); element_count * Direction::ALL.len()],
        }
    }

    /// Build a table from a predicate evaluated for each pair
    ///
    /// The predicate is only asked about `Right` and `Down`; `Left` and `Up`
    /// follow from the inversion symmetry. `allowed(a, d, b)` must answer
    /// whether `b` may sit in direction `d` of `a`.
    pub fn from_fn<F>(element_count: usize, mut allowed: F) -> Self
    where
        F: FnMut(usize, Direction, usize) -> bool,
    {
        let mut table = Self::new(element_count);
        for first in 0..element_count {
            for second in 0..element_count {
                for direction in [Direction::Right, Direction::Down] {
                    if allowed(first, direction, second) {
                        table.allow(first, direction, second);
                    }
                }
            }
        }
        table
    }

    /// Record that `second` may sit in direction `direction` of `first`
    ///
    /// The inverse fact is recorded too. Out-of-range indices are ignored.
    pub fn allow(&mut self, first: usize, direction: Direction, second: usize) {
        if first >= self.element_count || second >= self.element_count {
            return;
        }
        if let Some(row) = self.rows.get_mut(first * 4 + direction.index()) {
            row.insert(second);
        }
        if let Some(row) = self.rows.get_mut(second * 4 + direction.opposite().index()) {
            row.insert(first);
        }
    }

    /// Whether `second` may sit in direction `direction` of `first`
    pub fn is_compatible(&self, first: usize, direction: Direction, second: usize) -> bool {
        self.compatible(first, direction)
            .is_some_and(|row| row.contains(second))
    }

    /// All elements that may sit in direction `direction` of `element`
    pub fn compatible(&self, element: usize, direction: Direction) -> Option<&ElementSet> {
        if element >= self.element_count {
            return None;
        }
        self.rows.get(element * 4 + direction.index())
    }

    /// Number of elements that may sit in direction `direction` of `element`
    pub fn support(&self, element: usize, direction: Direction) -> usize {
        self.compatible(element, direction)
            .map_or(0, ElementSet::count)
    }

    /// Number of catalog elements covered by the table
    pub const fn element_count(&self) -> usize {
        self.element_count
    }

    /// Total number of (first, direction, second) entries
    pub fn entry_count(&self) -> usize {
        self.rows.iter().map(ElementSet::count).sum()
    }
}

/// Everything the propagation engine needs to know about a catalog
///
/// Payload types are resolved before this point: the engine sees only
/// element weights and the compatibility relation.
#[derive(Clone, Debug)]
pub struct Model {
    weights: Vec<f64>,
    table: CompatibilityTable,
}

impl Model {
    /// Bundle element weights with their compatibility table
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog is empty
    /// - The weight count differs from the table's element count
    /// - Any weight is negative or not finite
    pub fn new(weights: Vec<f64>, table: CompatibilityTable) -> Result<Self> {
        if weights.is_empty() {
            return Err(invalid_input(&"element catalog is empty"));
        }
        if weights.len() != table.element_count() {
            return Err(invalid_input(&format!(
                "{} weights supplied for a table of {} elements",
                weights.len(),
                table.element_count()
            )));
        }
        if let Some((element, weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(invalid_input(&format!(
                "element {element} has invalid weight {weight}"
            )));
        }
        Ok(Self { weights, table })
    }

    /// Element weights in catalog order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Compatibility relation between elements
    pub const fn table(&self) -> &CompatibilityTable {
        &self.table
    }

    /// Number of catalog elements
    pub const fn element_count(&self) -> usize {
        self.table.element_count()
    }
}
