//! Per-cell domains with incrementally maintained entropy
//!
//! Each cell keeps the set of catalog elements it may still take together with
//! running sums over their normalized weights, so removing an element updates
//! the cell's entropy in constant time.

use crate::{
    algorithm::{bitset::ElementSet, selection::RandomSelector},
    math::entropy::{entropy_from_sums, half_min_plogp, normalize, plogp},
    spatial::GridDimensions,
};

/// Running entropy bookkeeping of one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellEntropy {
    /// Sum of the remaining normalized weights
    pub weight_sum: f64,
    /// Sum of `w ln w` over the remaining normalized weights
    pub plogp_sum: f64,
    /// `ln(weight_sum)`
    pub log_sum: f64,
    /// Number of remaining elements
    pub count: usize,
    /// Shannon entropy of the remaining distribution
    pub entropy: f64,
}

impl CellEntropy {
    fn remove(&mut self, weight: f64, weight_plogp: f64) {
        self.weight_sum -= weight;
        self.plogp_sum -= weight_plogp;
        self.count = self.count.saturating_sub(1);
        if self.count == 0 || self.weight_sum <= 0.0 {
            self.weight_sum = self.weight_sum.max(0.0);
            self.log_sum = f64::NEG_INFINITY;
            self.entropy = 0.0;
        } else {
            self.log_sum = self.weight_sum.ln();
            self.entropy = entropy_from_sums(self.weight_sum, self.plogp_sum);
        }
    }
}

/// Result of scanning the wave for the next cell to observe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Undetermined cell with the lowest noisy entropy
    Cell(usize),
    /// Every cell holds exactly one element
    Collapsed,
    /// Some cell has an empty domain
    Contradiction(usize),
}

/// Grid of cell domains
#[derive(Clone, Debug)]
pub struct Wave {
    dimensions: GridDimensions,
    weights: Vec<f64>,
    plogp_weights: Vec<f64>,
    noise_bound: f64,
    domains: Vec<ElementSet>,
    memo: Vec<CellEntropy>,
}

impl Wave {
    /// Create a wave whose cells all hold every element
    ///
    /// Weights are normalized to sum to 1 before entropies are computed.
    pub fn new(dimensions: GridDimensions, weights: &[f64]) -> Self {
        let weights = normalize(weights);
        let plogp_weights: Vec<f64> = weights.iter().copied().map(plogp).collect();
        let weight_sum: f64 = weights.iter().sum();
        let plogp_sum: f64 = plogp_weights.iter().sum();
        let initial = CellEntropy {
            weight_sum,
            plogp_sum,
            log_sum: weight_sum.ln(),
            count: weights.len(),
            entropy: entropy_from_sums(weight_sum, plogp_sum),
        };
        let cells = dimensions.cell_count();

        Self {
            dimensions,
            noise_bound: half_min_plogp(&weights),
            domains: vec![ElementSet::all(weights.len()); cells],
            memo: vec![initial; cells],
            weights,
            plogp_weights,
        }
    }

    /// Grid geometry
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of catalog elements
    pub fn element_count(&self) -> usize {
        self.weights.len()
    }

    /// Normalized weight of an element
    pub fn weight(&self, element: usize) -> f64 {
        self.weights.get(element).copied().unwrap_or(0.0)
    }

    /// Whether an element is still possible in a cell
    pub fn contains(&self, cell: usize, element: usize) -> bool {
        self.domains
            .get(cell)
            .is_some_and(|domain| domain.contains(element))
    }

    /// Remaining elements of a cell
    pub fn domain(&self, cell: usize) -> Option<&ElementSet> {
        self.domains.get(cell)
    }

    /// Number of remaining elements of a cell
    pub fn count(&self, cell: usize) -> usize {
        self.memo.get(cell).map_or(0, |memo| memo.count)
    }

    /// Entropy bookkeeping of a cell
    pub fn memo(&self, cell: usize) -> Option<&CellEntropy> {
        self.memo.get(cell)
    }

    /// Entropy of a cell's remaining distribution
    pub fn entropy(&self, cell: usize) -> f64 {
        self.memo.get(cell).map_or(0.0, |memo| memo.entropy)
    }

    /// Upper bound of the tie-breaking noise
    pub const fn noise_bound(&self) -> f64 {
        self.noise_bound
    }

    /// Remove an element from a cell, returning whether it was present
    pub fn remove(&mut self, cell: usize, element: usize) -> bool {
        let Some(domain) = self.domains.get_mut(cell) else {
            return false;
        };
        if !domain.remove(element) {
            return false;
        }
        let weight = self.weights.get(element).copied().unwrap_or(0.0);
        let weight_plogp = self.plogp_weights.get(element).copied().unwrap_or(0.0);
        if let Some(memo) = self.memo.get_mut(cell) {
            memo.remove(weight, weight_plogp);
        }
        true
    }

    /// Pick the next cell to observe
    ///
    /// Scans cells in index order. A cell with an empty domain short-circuits
    /// the scan. Among cells with more than one element, the one with the
    /// lowest entropy plus noise drawn from `[0, noise_bound]` wins; noise is
    /// only drawn for cells that could beat the current minimum.
    pub fn select_cell(&self, selector: &mut RandomSelector) -> Observation {
        let mut min = f64::INFINITY;
        let mut argmin = None;

        for (cell, memo) in self.memo.iter().enumerate() {
            if memo.count == 0 {
                return Observation::Contradiction(cell);
            }
            if memo.count > 1 && memo.entropy <= min {
                let noisy = memo.entropy + selector.noise(self.noise_bound);
                if noisy < min {
                    min = noisy;
                    argmin = Some(cell);
                }
            }
        }

        argmin.map_or(Observation::Collapsed, Observation::Cell)
    }

    /// Draw one remaining element of a cell with probability proportional to weight
    pub fn draw(&self, cell: usize, selector: &mut RandomSelector) -> Option<usize> {
        let domain = self.domains.get(cell)?;
        let candidates = domain.to_vec();
        let weights: Vec<f64> = candidates.iter().map(|&e| self.weight(e)).collect();
        candidates.get(selector.weighted_choice(&weights)).copied()
    }

    /// The collapsed element of every cell, if all cells are collapsed
    pub fn collapsed(&self) -> Option<Vec<usize>> {
        self.domains.iter().map(ElementSet::single).collect()
    }
}
