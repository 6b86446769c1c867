//! Explicit random source for structural composition

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Seeded random selector threaded through every structural strategy
///
/// Two selectors built from the same seed produce the same decisions, so a
/// structural map is reproducible for a fixed seed.
#[derive(Debug, Clone)]
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

    /// Uniform value in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// True with probability `probability`
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Uniform integer in a half-open range, `None` when the range is empty
    pub fn in_range(&mut self, range: Range<usize>) -> Option<usize> {
        (!range.is_empty()).then(|| self.rng.random_range(range))
    }

    /// Underlying generator for APIs that take any `Rng`
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Fresh seed for callers that did not supply one
pub fn random_seed() -> u64 {
    rand::random::<u32>().into()
}
