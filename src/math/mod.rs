//! Mathematical utilities for the algorithm

/// Weighted Shannon entropy and weight normalization
pub mod entropy;
