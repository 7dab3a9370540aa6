//! Sampler configuration.

use std::ops::RangeInclusive;

use crate::error::ConfigError;

/// Attribute ranges and seed for random record generation.
///
/// All ranges are inclusive on both ends.
///
/// # Examples
///
/// ```
/// use app_verdict::sampling::SamplerConfig;
///
/// let config = SamplerConfig::default()
///     .with_permissions(0, 20)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplerConfig {
    /// Bounds for `permissions`.
    pub permissions: (i64, i64),

    /// Bounds for `user_interactions`.
    pub user_interactions: (i64, i64),

    /// Bounds for `app_reviews`.
    pub app_reviews: (i64, i64),

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            permissions: (1, 10),
            user_interactions: (0, 50),
            app_reviews: (50, 500),
            seed: None,
        }
    }
}

impl SamplerConfig {
    pub fn with_permissions(mut self, lo: i64, hi: i64) -> Self {
        self.permissions = (lo, hi);
        self
    }

    pub fn with_user_interactions(mut self, lo: i64, hi: i64) -> Self {
        self.user_interactions = (lo, hi);
        self
    }

    pub fn with_app_reviews(mut self, lo: i64, hi: i64) -> Self {
        self.app_reviews = (lo, hi);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates that every range is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, (lo, hi)) in [
            ("permissions", self.permissions),
            ("user_interactions", self.user_interactions),
            ("app_reviews", self.app_reviews),
        ] {
            if lo > hi {
                return Err(ConfigError::EmptyRange { name, lo, hi });
            }
        }
        Ok(())
    }

    pub(crate) fn ranges(&self) -> [RangeInclusive<i64>; 3] {
        [
            self.permissions.0..=self.permissions.1,
            self.user_interactions.0..=self.user_interactions.1,
            self.app_reviews.0..=self.app_reviews.1,
        ]
    }
}
