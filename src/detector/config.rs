//! Detector thresholds.

use crate::error::ConfigError;

/// Threshold configuration for the [`Detector`](super::Detector).
///
/// The interaction thresholds are fixed (see
/// [`VERY_LOW_INTERACTIONS`](super::VERY_LOW_INTERACTIONS) and
/// [`LOW_INTERACTIONS`](super::LOW_INTERACTIONS)) and are not part of the
/// configuration.
///
/// # Examples
///
/// ```
/// use app_verdict::detector::DetectorConfig;
///
/// let config = DetectorConfig::default()
///     .with_threshold_permissions(4)
///     .with_min_reviews(50)
///     .with_neutral_review_threshold(120);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Baseline permission ceiling. Above it is Neutral, above it by more
    /// than two is Evil.
    pub threshold_permissions: i64,

    /// Absolute minimum acceptable review count. Below it is Evil.
    pub min_reviews: i64,

    /// Upper bound (exclusive) of the "moderately low" review band.
    ///
    /// Should be at least `min_reviews`; otherwise the band is empty.
    pub neutral_review_threshold: i64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_permissions: 5,
            min_reviews: 100,
            neutral_review_threshold: 200,
        }
    }
}

impl DetectorConfig {
    pub fn with_threshold_permissions(mut self, n: i64) -> Self {
        self.threshold_permissions = n;
        self
    }

    pub fn with_min_reviews(mut self, n: i64) -> Self {
        self.min_reviews = n;
        self
    }

    pub fn with_neutral_review_threshold(mut self, n: i64) -> Self {
        self.neutral_review_threshold = n;
        self
    }

    /// Permission count above which a record is Evil.
    pub fn evil_permissions(&self) -> i64 {
        self.threshold_permissions.saturating_add(2)
    }

    /// Validates the configuration.
    ///
    /// The detector accepts any configuration; this only reports settings
    /// that make the verdicts meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("threshold_permissions", self.threshold_permissions),
            ("min_reviews", self.min_reviews),
            ("neutral_review_threshold", self.neutral_review_threshold),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeThreshold { name, value });
            }
        }
        if self.neutral_review_threshold < self.min_reviews {
            return Err(ConfigError::InvertedReviewBand {
                min: self.min_reviews,
                neutral: self.neutral_review_threshold,
            });
        }
        Ok(())
    }
}
