//! Error types.
//!
//! Classification itself is total and never fails. These errors come from
//! the optional validation layer and from the tooling configs.

use thiserror::Error;

/// A configuration value that cannot produce a sensible policy or run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A threshold is below zero.
    #[error("{name} must be non-negative, got {value}")]
    NegativeThreshold {
        /// Name of the offending field.
        name: &'static str,
        /// The configured value.
        value: i64,
    },

    /// The neutral review band ends below the minimum review count.
    #[error("neutral_review_threshold ({neutral}) must be >= min_reviews ({min})")]
    InvertedReviewBand {
        /// Configured `min_reviews`.
        min: i64,
        /// Configured `neutral_review_threshold`.
        neutral: i64,
    },

    /// A sampling range has its lower bound above its upper bound.
    #[error("sampling range for {name} is empty: [{lo}, {hi}]")]
    EmptyRange {
        /// Name of the sampled attribute.
        name: &'static str,
        /// Lower bound (inclusive).
        lo: i64,
        /// Upper bound (inclusive).
        hi: i64,
    },

    /// A fuzz run was requested with nothing to do.
    #[error("fuzz iterations must be positive")]
    ZeroIterations,
}

/// A feature record outside the meaningful domain of the policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// An attribute count is below zero.
    #[error("{name} must be non-negative, got {value}")]
    NegativeAttribute {
        /// Name of the offending attribute.
        name: &'static str,
        /// The observed value.
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::NegativeThreshold {
            name: "min_reviews",
            value: -3,
        };
        assert_eq!(err.to_string(), "min_reviews must be non-negative, got -3");

        let err = ConfigError::InvertedReviewBand {
            min: 300,
            neutral: 200,
        };
        assert_eq!(
            err.to_string(),
            "neutral_review_threshold (200) must be >= min_reviews (300)"
        );
    }

    #[test]
    fn test_record_error_message() {
        let err = RecordError::NegativeAttribute {
            name: "app_reviews",
            value: -1,
        };
        assert_eq!(err.to_string(), "app_reviews must be non-negative, got -1");
    }
}
