//! Seeded random record generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SamplerConfig;
use crate::detector::FeatureRecord;
use crate::error::ConfigError;

/// Draws [`FeatureRecord`]s with attributes uniform over configured ranges.
///
/// Two samplers built from the same seed yield the same sequence.
///
/// ```
/// use app_verdict::sampling::{Sampler, SamplerConfig};
///
/// let mut a = Sampler::new(SamplerConfig::default().with_seed(42)).unwrap();
/// let mut b = Sampler::new(SamplerConfig::default().with_seed(42)).unwrap();
/// assert_eq!(a.sample_batch(16), b.sample_batch(16));
/// ```
#[derive(Debug, Clone)]
pub struct Sampler {
    config: SamplerConfig,
    seed: u64,
    rng: StdRng,
}

impl Sampler {
    /// Creates a sampler. Without a configured seed, one is drawn at random
    /// and can be read back with [`Sampler::seed`].
    pub fn new(config: SamplerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, "Sampler seeded");
        Ok(Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// The seed actually in use.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Draws one record.
    pub fn sample(&mut self) -> FeatureRecord {
        let [permissions, interactions, reviews] = self.config.ranges();
        FeatureRecord::new(
            self.rng.random_range(permissions),
            self.rng.random_range(interactions),
            self.rng.random_range(reviews),
        )
    }

    /// Draws `n` records.
    pub fn sample_batch(&mut self, n: usize) -> Vec<FeatureRecord> {
        (0..n).map(|_| self.sample()).collect()
    }
}

impl Iterator for Sampler {
    type Item = FeatureRecord;

    fn next(&mut self) -> Option<FeatureRecord> {
        Some(self.sample())
    }
}
