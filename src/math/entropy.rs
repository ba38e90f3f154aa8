//! Weighted Shannon entropy in running-sum form
//!
//! For weights `w_i` with total `W`, the entropy of the normalized distribution
//! is `ln W - (Σ w_i ln w_i) / W`. Keeping `W` and `Σ w_i ln w_i` per cell lets
//! the wave update entropy in constant time when a single element is removed.

/// `w · ln w`, with the continuous extension `0 · ln 0 = 0`
pub fn plogp(weight: f64) -> f64 {
    if weight > 0.0 {
        weight * weight.ln()
    } else {
        0.0
    }
}

/// Entropy from a weight sum and the matching `Σ w ln w`
///
/// Returns 0 for an empty or zero-weight distribution.
pub fn entropy_from_sums(weight_sum: f64, plogp_sum: f64) -> f64 {
    if weight_sum > 0.0 {
        weight_sum.ln() - plogp_sum / weight_sum
    } else {
        0.0
    }
}

/// Shannon entropy of a weight list computed from scratch
///
/// Reference form of [`entropy_from_sums`], used when building the initial
/// wave and for checking the incremental bookkeeping.
pub fn shannon_entropy(weights: &[f64]) -> f64 {
    let sum: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    let plogp_sum: f64 = weights.iter().copied().map(plogp).sum();
    entropy_from_sums(sum, plogp_sum)
}

/// Scale weights so they sum to 1
///
/// Negative weights are treated as zero. An all-zero list is returned unchanged.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().map(|&w| w.max(0.0)).sum();
    if total <= 0.0 {
        return weights.iter().map(|&w| w.max(0.0)).collect();
    }
    weights.iter().map(|&w| w.max(0.0) / total).collect()
}

/// Half the smallest non-zero `|w ln w|` over a weight list
///
/// Upper bound for the tie-breaking noise added to cell entropies. Small
/// enough not to reorder cells whose entropies differ by a whole element.
pub fn half_min_plogp(weights: &[f64]) -> f64 {
    let min = weights
        .iter()
        .copied()
        .map(plogp)
        .map(f64::abs)
        .filter(|&value| value > 0.0)
        .fold(f64::INFINITY, f64::min);
    if min.is_finite() { min / 2.0 } else { 0.0 }
}
