//! Seeded random-sampling harness that checks classifier invariants.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::detector::{
    Classification, Detector, DetectorConfig, FeatureRecord, Severity, Verdict, ALL_CRITERIA_MET,
};
use crate::error::ConfigError;
use crate::sampling::{Sampler, SamplerConfig};

/// Configuration for a fuzz run.
///
/// # Examples
///
/// ```
/// use app_verdict::harness::FuzzConfig;
///
/// let config = FuzzConfig::default()
///     .with_iterations(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FuzzConfig {
    /// Number of records to sample and classify.
    pub iterations: usize,

    /// Attribute ranges. The seed here is overridden by [`FuzzConfig::seed`]
    /// when that is set.
    pub sampler: SamplerConfig,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Classify on the rayon thread pool. Only honored with the `parallel`
    /// feature.
    pub parallel: bool,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000,
            sampler: SamplerConfig::default(),
            seed: None,
            parallel: false,
        }
    }
}

impl FuzzConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        self.sampler.validate()
    }

    fn sampler_config(&self) -> SamplerConfig {
        let mut sampler = self.sampler.clone();
        if self.seed.is_some() {
            sampler.seed = self.seed;
        }
        sampler
    }
}

/// Verdict counts over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerdictTally {
    pub good: usize,
    pub neutral: usize,
    pub evil: usize,
}

impl VerdictTally {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Good => self.good += 1,
            Verdict::Neutral => self.neutral += 1,
            Verdict::Evil => self.evil += 1,
        }
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::Good => self.good,
            Verdict::Neutral => self.neutral,
            Verdict::Evil => self.evil,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.neutral + self.evil
    }
}

impl FromIterator<Verdict> for VerdictTally {
    fn from_iter<I: IntoIterator<Item = Verdict>>(iter: I) -> Self {
        let mut tally = Self::default();
        for verdict in iter {
            tally.record(verdict);
        }
        tally
    }
}

/// An invariant that did not hold for a sampled record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    pub record: FeatureRecord,
    pub message: String,
}

/// Outcome of a fuzz run.
#[derive(Debug, Clone)]
pub struct FuzzReport {
    /// Seed the sampler actually used.
    pub seed: u64,
    pub tally: VerdictTally,
    pub violations: Vec<Violation>,
}

impl FuzzReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Samples records, classifies them and checks invariants on each.
///
/// Checked per record:
/// - classifying twice gives the same result;
/// - the verdict and the exact reason list match the rules restated
///   directly from the detector's thresholds, without going through the
///   detector's own checks.
pub struct FuzzHarness;

impl FuzzHarness {
    pub fn run(detector: &Detector, config: &FuzzConfig) -> Result<FuzzReport, ConfigError> {
        config.validate()?;

        let mut sampler = Sampler::new(config.sampler_config())?;
        let seed = sampler.seed();
        let records = sampler.sample_batch(config.iterations);

        let results = check_all(detector, &records, config.parallel);

        let mut tally = VerdictTally::default();
        let mut violations = Vec::new();
        for (verdict, found) in results {
            tally.record(verdict);
            violations.extend(found);
        }

        if violations.is_empty() {
            tracing::info!(
                seed,
                iterations = config.iterations,
                good = tally.good,
                neutral = tally.neutral,
                evil = tally.evil,
                "Fuzz run clean"
            );
        } else {
            tracing::warn!(seed, violations = violations.len(), "Fuzz run found violations");
        }

        Ok(FuzzReport {
            seed,
            tally,
            violations,
        })
    }
}

#[cfg(feature = "parallel")]
fn check_all(
    detector: &Detector,
    records: &[FeatureRecord],
    parallel: bool,
) -> Vec<(Verdict, Vec<Violation>)> {
    if parallel {
        records
            .par_iter()
            .map(|record| check_record(detector, record))
            .collect()
    } else {
        records
            .iter()
            .map(|record| check_record(detector, record))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn check_all(
    detector: &Detector,
    records: &[FeatureRecord],
    parallel: bool,
) -> Vec<(Verdict, Vec<Violation>)> {
    if parallel {
        tracing::warn!(
            records = records.len(),
            "Parallel fuzzing requested without the `parallel` feature; running sequentially"
        );
    }
    records
        .iter()
        .map(|record| check_record(detector, record))
        .collect()
}

fn check_record(detector: &Detector, record: &FeatureRecord) -> (Verdict, Vec<Violation>) {
    let first = detector.classify(record);
    let second = detector.classify(record);

    let mut violations = check_classification(detector.config(), record, &first);
    if first != second {
        violations.push(Violation {
            record: *record,
            message: format!("non-deterministic: {first:?} vs {second:?}"),
        });
    }

    (first.verdict(), violations)
}

/// Compares a classification against the rules restated from scratch.
fn check_classification(
    config: &DetectorConfig,
    record: &FeatureRecord,
    classification: &Classification,
) -> Vec<Violation> {
    let (verdict, reasons) = expected_classification(config, record);
    let mut violations = Vec::new();

    if classification.verdict() != verdict {
        violations.push(Violation {
            record: *record,
            message: format!("expected verdict {verdict}, got {}", classification.verdict()),
        });
    }
    if classification.reasons() != reasons.as_slice() {
        violations.push(Violation {
            record: *record,
            message: format!("expected reasons {reasons:?}, got {:?}", classification.reasons()),
        });
    }

    violations
}

/// Expected verdict and reasons, derived from the thresholds alone.
fn expected_classification(config: &DetectorConfig, record: &FeatureRecord) -> (Verdict, Vec<String>) {
    let mut worst = Severity::None;
    let mut reasons = Vec::new();
    let mut note = |severity: Severity, reason: String| {
        worst = worst.max(severity);
        reasons.push(reason);
    };

    let ceiling = config.threshold_permissions;
    let hard_ceiling = ceiling.saturating_add(2);
    if record.permissions() > hard_ceiling {
        note(Severity::Evil, format!("too many permissions requested (> {hard_ceiling})"));
    } else if record.permissions() > ceiling {
        note(Severity::Neutral, format!("moderately high permissions (> {ceiling})"));
    }

    if record.app_reviews() < config.min_reviews {
        note(Severity::Evil, format!("too few reviews (< {})", config.min_reviews));
    } else if record.app_reviews() < config.neutral_review_threshold {
        note(
            Severity::Neutral,
            format!("moderately low reviews (< {})", config.neutral_review_threshold),
        );
    }

    if record.user_interactions() < 5 {
        note(Severity::Evil, "very low user interactions (< 5)".to_string());
    } else if record.user_interactions() < 10 {
        note(Severity::Neutral, "low user interactions (< 10)".to_string());
    }

    if reasons.is_empty() {
        reasons.push(ALL_CRITERIA_MET.to_string());
    }
    (Verdict::from(worst), reasons)
}
