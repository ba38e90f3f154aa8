use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// Drives both entropy tie-breaking and weighted element draws, so a fixed
/// seed reproduces a whole generation.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a fresh seed from the thread-local entropy source
    pub fn random_seed() -> u64 {
        rand::rng().random::<u64>()
    }

    /// Generic weighted random selection
    ///
    /// Returns index into weights array using cumulative distribution
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len().saturating_sub(1)
    }

    /// Uniform noise in `[0, upper)`
    ///
    /// Always consumes one draw, even for a zero bound.
    pub fn noise(&mut self, upper: f64) -> f64 {
        self.rng.random::<f64>() * upper.max(0.0)
    }
}
