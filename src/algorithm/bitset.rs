use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over catalog indices
///
/// Holds a cell domain in the wave and a compatibility row in the table.
/// Indices are 0-based catalog indices; out-of-range indices are ignored on
/// insertion and reported absent on lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementSet {
    bits: BitVec,
}

impl ElementSet {
    /// Create a set with no elements present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every index below `capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Number of indices the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert an element
    pub fn insert(&mut self, element: usize) {
        if element < self.bits.len() {
            self.bits.set(element, true);
        }
    }

    /// Remove an element, returning whether it was present
    pub fn remove(&mut self, element: usize) -> bool {
        let present = self.contains(element);
        if present {
            self.bits.set(element, false);
        }
        present
    }

    /// Test element membership
    pub fn contains(&self, element: usize) -> bool {
        self.bits.get(element).as_deref() == Some(&true)
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Test if no elements are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count elements in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate present elements in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all elements as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// The only element, if the set holds exactly one
    pub fn single(&self) -> Option<usize> {
        let mut ones = self.bits.iter_ones();
        let first = ones.next()?;
        if ones.next().is_none() {
            Some(first)
        } else {
            None
        }
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementSet({} elements: {:?})", self.count(), self.to_vec())
    }
}
