//! Pattern extraction from sample grids
//!
//! Every N×N window of the sample, together with the first S of its
//! orientation variants, becomes a candidate pattern. Structurally equal
//! candidates are merged in first-seen order and their occurrence counts become
//! pattern weights. Two patterns are compatible in a direction when their
//! overlapping regions agree cell-for-cell once one is shifted by a single cell.

use crate::{
    analysis::compatibility::{CompatibilityTable, Model},
    io::error::{Result, invalid_input, invalid_parameter},
    spatial::{Direction, transform::ORIENTATION_COUNT, transform::variants},
};
use ndarray::{Array2, ArrayView2};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Distinct patterns of a sample with their weights and compatibility
#[derive(Clone, Debug)]
pub struct PatternCatalog<T> {
    pattern_size: usize,
    patterns: Vec<Array2<T>>,
    lookup: HashMap<Array2<T>, usize>,
    ground: Option<usize>,
    model: Arc<Model>,
}

impl<T: Clone + Eq + Hash> PatternCatalog<T> {
    /// Extract the pattern catalog of a sample grid
    ///
    /// With `periodic_input` every position is a window origin and windows
    /// wrap around the sample; otherwise only windows that fit are used.
    /// `symmetry` selects how many orientation variants of each window are
    /// added, from 1 (identity only) to 8.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sample is empty
    /// - `pattern_size` is zero or `symmetry` lies outside 1..=8
    /// - A non-periodic sample is smaller than the pattern size
    pub fn extract(
        sample: &Array2<T>,
        pattern_size: usize,
        periodic_input: bool,
        symmetry: usize,
    ) -> Result<Self> {
        if sample.is_empty() {
            return Err(invalid_input(&"sample grid is empty"));
        }
        if pattern_size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &pattern_size,
                &"must be at least 1",
            ));
        }
        if !(1..=ORIENTATION_COUNT).contains(&symmetry) {
            return Err(invalid_parameter(
                "symmetry",
                &symmetry,
                &"must be between 1 and 8",
            ));
        }

        let (height, width) = sample.dim();
        if !periodic_input && (pattern_size > height || pattern_size > width) {
            return Err(invalid_input(&format!(
                "pattern size {pattern_size} exceeds non-periodic sample of {width}x{height}"
            )));
        }

        let (row_origins, col_origins) = if periodic_input {
            (height, width)
        } else {
            (height - pattern_size + 1, width - pattern_size + 1)
        };

        let view = sample.view();
        let mut patterns: Vec<Array2<T>> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        let mut lookup: HashMap<Array2<T>, usize> = HashMap::new();

        for row in 0..row_origins {
            for col in 0..col_origins {
                let Some(base) = window(&view, row, col, pattern_size) else {
                    continue;
                };
                for variant in variants(&base.view(), symmetry) {
                    if let Some(&id) = lookup.get(&variant) {
                        if let Some(weight) = weights.get_mut(id) {
                            *weight += 1.0;
                        }
                    } else {
                        lookup.insert(variant.clone(), patterns.len());
                        patterns.push(variant);
                        weights.push(1.0);
                    }
                }
            }
        }

        let ground = window(&view, height - 1, width / 2, pattern_size)
            .and_then(|pattern| lookup.get(&pattern).copied());

        let table = CompatibilityTable::from_fn(patterns.len(), |first, direction, second| {
            match (patterns.get(first), patterns.get(second)) {
                (Some(a), Some(b)) => agrees(&a.view(), &b.view(), direction),
                _ => false,
            }
        });

        tracing::debug!(
            patterns = patterns.len(),
            compatible_pairs = table.entry_count(),
            pattern_size,
            symmetry,
            "extracted pattern catalog"
        );

        Ok(Self {
            pattern_size,
            patterns,
            lookup,
            ground,
            model: Arc::new(Model::new(weights, table)?),
        })
    }

    /// Catalog index of a pattern, if it occurs in the catalog
    pub fn pattern_id(&self, pattern: &Array2<T>) -> Option<usize> {
        self.lookup.get(pattern).copied()
    }
}

impl<T> PatternCatalog<T> {
    /// Side length of every pattern
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern at a catalog index
    pub fn pattern(&self, id: usize) -> Option<&Array2<T>> {
        self.patterns.get(id)
    }

    /// All patterns in catalog order
    pub fn patterns(&self) -> &[Array2<T>] {
        &self.patterns
    }

    /// Occurrence counts in catalog order
    pub fn weights(&self) -> &[f64] {
        self.model.weights()
    }

    /// The pattern found at the bottom-center of the sample
    ///
    /// The window starts at row `height - 1`, column `width / 2` and wraps
    /// around the sample. `None` when that window is not a catalog pattern,
    /// which happens for non-periodic samples whose bottom row cannot start a
    /// full window.
    pub const fn ground_pattern(&self) -> Option<usize> {
        self.ground
    }

    /// Weights and compatibility shared with the propagation engine
    pub const fn model(&self) -> &Arc<Model> {
        &self.model
    }
}

/// Square window of a sample starting at `(row, col)`, wrapping at the edges
pub fn window<T: Clone>(
    sample: &ArrayView2<'_, T>,
    row: usize,
    col: usize,
    size: usize,
) -> Option<Array2<T>> {
    let (height, width) = sample.dim();
    if height == 0 || width == 0 {
        return None;
    }
    let cells = (0..size)
        .flat_map(|dr| (0..size).map(move |dc| (dr, dc)))
        .map(|(dr, dc)| sample.get(((row + dr) % height, (col + dc) % width)).cloned())
        .collect::<Option<Vec<T>>>()?;
    Array2::from_shape_vec((size, size), cells).ok()
}

/// Whether `second`, shifted one cell in `direction` from `first`, overlaps it consistently
///
/// Cell `(y, x)` of `first` lines up with cell `(y - dy, x - dx)` of `second`
/// where `(dy, dx)` is the direction's offset; every such pair inside both
/// patterns must be equal.
pub fn agrees<T: PartialEq>(
    first: &ArrayView2<'_, T>,
    second: &ArrayView2<'_, T>,
    direction: Direction,
) -> bool {
    let (dy, dx) = direction.offset();
    let (rows, cols) = first.dim();
    let (rows, cols) = (rows as isize, cols as isize);

    let mut y_range = dy.max(0)..(rows + dy).min(rows);
    let x_range = dx.max(0)..(cols + dx).min(cols);

    y_range.all(|y| {
        x_range.clone().all(|x| {
            let here = first.get((y as usize, x as usize));
            let there = second.get(((y - dy) as usize, (x - dx) as usize));
            matches!((here, there), (Some(a), Some(b)) if a == b)
        })
    })
}
