//! Model configuration.

use plexus_space::SamplingStrategy;

/// Construction parameters for a [`Model`](crate::Model).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelConfig {
    /// Seed of the model's random generator. Default: 0.
    pub seed: u64,
    /// Strategy for predicate-constrained random draws.
    /// Default: [`SamplingStrategy::Filtered`].
    pub sampling: SamplingStrategy,
}

impl ModelConfig {
    /// Default configuration with the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the sampling strategy.
    pub fn with_sampling(mut self, sampling: SamplingStrategy) -> Self {
        self.sampling = sampling;
        self
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            sampling: SamplingStrategy::Filtered,
        }
    }
}
