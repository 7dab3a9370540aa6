//! Rule evaluation.

use super::config::DetectorConfig;
use super::types::{Check, CheckOutcome, Classification, FeatureRecord, Severity};
use crate::error::RecordError;

/// Interaction count below which a record is Evil.
pub const VERY_LOW_INTERACTIONS: i64 = 5;

/// Interaction count below which a record is Neutral.
pub const LOW_INTERACTIONS: i64 = 10;

/// Classifies feature records against a fixed set of thresholds.
///
/// Three independent checks run in a fixed order (permissions, reviews,
/// interactions). Each yields a local severity and at most one reason; the
/// overall verdict is the worst local severity.
///
/// The detector is immutable after construction and can be shared freely
/// across threads.
///
/// # Examples
///
/// ```
/// use app_verdict::detector::{Detector, FeatureRecord, Verdict};
///
/// let detector = Detector::default();
/// let (verdict, reasons) = detector.classify(&FeatureRecord::new(6, 15, 300)).into_parts();
///
/// assert_eq!(verdict, Verdict::Neutral);
/// assert_eq!(reasons, vec!["moderately high permissions (> 5)".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Creates a detector. The configuration is not validated.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Classifies a record.
    ///
    /// Pure and total: identical inputs always give identical output.
    pub fn classify(&self, record: &FeatureRecord) -> Classification {
        let classification = Classification::from_outcomes(self.evaluate_checks(record));
        tracing::debug!(
            permissions = record.permissions(),
            user_interactions = record.user_interactions(),
            app_reviews = record.app_reviews(),
            verdict = %classification.verdict(),
            reasons = classification.reasons().len(),
            "Record classified"
        );
        classification
    }

    /// Rejects records with negative counts, then classifies.
    pub fn try_classify(&self, record: &FeatureRecord) -> Result<Classification, RecordError> {
        record.validate()?;
        Ok(self.classify(record))
    }

    /// Runs every check and returns the outcomes in [`Check::ORDER`].
    pub fn evaluate_checks(&self, record: &FeatureRecord) -> [CheckOutcome; 3] {
        Check::ORDER.map(|check| {
            let outcome = self.evaluate(check, record);
            if let Some(reason) = &outcome.reason {
                tracing::trace!(check = check.name(), severity = ?outcome.severity, %reason, "Check triggered");
            }
            outcome
        })
    }

    fn evaluate(&self, check: Check, record: &FeatureRecord) -> CheckOutcome {
        match check {
            Check::Permissions => self.check_permissions(record.permissions()),
            Check::Reviews => self.check_reviews(record.app_reviews()),
            Check::Interactions => check_interactions(record.user_interactions()),
        }
    }

    fn check_permissions(&self, permissions: i64) -> CheckOutcome {
        let ceiling = self.config.threshold_permissions;
        let evil_above = self.config.evil_permissions();

        if permissions > evil_above {
            CheckOutcome::triggered(
                Check::Permissions,
                Severity::Evil,
                format!("too many permissions requested (> {evil_above})"),
            )
        } else if permissions > ceiling {
            CheckOutcome::triggered(
                Check::Permissions,
                Severity::Neutral,
                format!("moderately high permissions (> {ceiling})"),
            )
        } else {
            CheckOutcome::clear(Check::Permissions)
        }
    }

    fn check_reviews(&self, reviews: i64) -> CheckOutcome {
        let min = self.config.min_reviews;
        let neutral = self.config.neutral_review_threshold;

        if reviews < min {
            CheckOutcome::triggered(
                Check::Reviews,
                Severity::Evil,
                format!("too few reviews (< {min})"),
            )
        } else if reviews < neutral {
            CheckOutcome::triggered(
                Check::Reviews,
                Severity::Neutral,
                format!("moderately low reviews (< {neutral})"),
            )
        } else {
            CheckOutcome::clear(Check::Reviews)
        }
    }
}

fn check_interactions(interactions: i64) -> CheckOutcome {
    if interactions < VERY_LOW_INTERACTIONS {
        CheckOutcome::triggered(
            Check::Interactions,
            Severity::Evil,
            format!("very low user interactions (< {VERY_LOW_INTERACTIONS})"),
        )
    } else if interactions < LOW_INTERACTIONS {
        CheckOutcome::triggered(
            Check::Interactions,
            Severity::Neutral,
            format!("low user interactions (< {LOW_INTERACTIONS})"),
        )
    } else {
        CheckOutcome::clear(Check::Interactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::types::{Verdict, ALL_CRITERIA_MET};

    fn classify(p: i64, i: i64, r: i64) -> (Verdict, Vec<String>) {
        Detector::default()
            .classify(&FeatureRecord::new(p, i, r))
            .into_parts()
    }

    #[test]
    fn test_evil_due_to_permissions() {
        let (verdict, reasons) = classify(8, 20, 250);
        assert_eq!(verdict, Verdict::Evil);
        assert_eq!(reasons, vec!["too many permissions requested (> 7)"]);
    }

    #[test]
    fn test_evil_due_to_low_reviews() {
        let (verdict, reasons) = classify(4, 20, 50);
        assert_eq!(verdict, Verdict::Evil);
        assert_eq!(reasons, vec!["too few reviews (< 100)"]);
    }

    #[test]
    fn test_neutral_due_to_permissions() {
        let (verdict, reasons) = classify(6, 15, 300);
        assert_eq!(verdict, Verdict::Neutral);
        assert_eq!(reasons, vec!["moderately high permissions (> 5)"]);
    }

    #[test]
    fn test_good() {
        let (verdict, reasons) = classify(3, 30, 250);
        assert_eq!(verdict, Verdict::Good);
        assert_eq!(reasons, vec![ALL_CRITERIA_MET]);
    }

    #[test]
    fn test_neutral_due_to_low_interactions() {
        let (verdict, reasons) = classify(5, 9, 250);
        assert_eq!(verdict, Verdict::Neutral);
        assert_eq!(reasons, vec!["low user interactions (< 10)"]);
    }

    #[test]
    fn test_permission_boundaries() {
        assert_eq!(classify(5, 20, 250).0, Verdict::Good);
        assert_eq!(classify(6, 20, 250).0, Verdict::Neutral);
        assert_eq!(classify(7, 20, 250).0, Verdict::Neutral);
        assert_eq!(classify(8, 20, 250).0, Verdict::Evil);
    }

    #[test]
    fn test_review_boundaries() {
        assert_eq!(classify(3, 20, 99).0, Verdict::Evil);
        assert_eq!(classify(3, 20, 100).0, Verdict::Neutral);
        assert_eq!(classify(3, 20, 199).0, Verdict::Neutral);
        assert_eq!(classify(3, 20, 200).0, Verdict::Good);
    }

    #[test]
    fn test_interaction_boundaries() {
        assert_eq!(classify(3, 4, 250).0, Verdict::Evil);
        assert_eq!(classify(3, 5, 250).0, Verdict::Neutral);
        assert_eq!(classify(3, 9, 250).0, Verdict::Neutral);
        assert_eq!(classify(3, 10, 250).0, Verdict::Good);
    }

    #[test]
    fn test_all_reasons_in_check_order() {
        let (verdict, reasons) = classify(6, 2, 150);
        assert_eq!(verdict, Verdict::Evil);
        assert_eq!(
            reasons,
            vec![
                "moderately high permissions (> 5)",
                "moderately low reviews (< 200)",
                "very low user interactions (< 5)",
            ]
        );
    }

    #[test]
    fn test_later_neutral_does_not_downgrade_evil() {
        let (verdict, reasons) = classify(9, 25, 100);
        assert_eq!(verdict, Verdict::Evil);
        assert_eq!(
            reasons,
            vec![
                "too many permissions requested (> 7)",
                "moderately low reviews (< 200)",
            ]
        );
    }

    #[test]
    fn test_custom_thresholds_appear_in_reasons() {
        let detector = Detector::new(
            DetectorConfig::default()
                .with_threshold_permissions(2)
                .with_min_reviews(10)
                .with_neutral_review_threshold(20),
        );
        let (verdict, reasons) = detector
            .classify(&FeatureRecord::new(5, 50, 15))
            .into_parts();
        assert_eq!(verdict, Verdict::Evil);
        assert_eq!(
            reasons,
            vec!["too many permissions requested (> 4)", "moderately low reviews (< 20)"]
        );
    }

    #[test]
    fn test_negative_inputs_flow_through() {
        // Negative permissions never trigger; negative reviews/interactions are Evil.
        let (verdict, reasons) = classify(-3, -1, -5);
        assert_eq!(verdict, Verdict::Evil);
        assert_eq!(
            reasons,
            vec!["too few reviews (< 100)", "very low user interactions (< 5)"]
        );
    }

    #[test]
    fn test_try_classify_rejects_negative() {
        let detector = Detector::default();
        assert!(detector.try_classify(&FeatureRecord::new(-1, 20, 250)).is_err());
        let c = detector.try_classify(&FeatureRecord::new(3, 30, 250)).unwrap();
        assert_eq!(c.verdict(), Verdict::Good);
    }

    #[test]
    fn test_evaluate_checks_order_and_severity() {
        let outcomes = Detector::default().evaluate_checks(&FeatureRecord::new(6, 30, 50));
        let checks: Vec<Check> = outcomes.iter().map(|o| o.check).collect();
        assert_eq!(checks, Check::ORDER.to_vec());
        assert_eq!(outcomes[0].severity, Severity::Neutral);
        assert_eq!(outcomes[1].severity, Severity::Evil);
        assert_eq!(outcomes[2].severity, Severity::None);
        assert!(outcomes[2].reason.is_none());
    }

    #[test]
    fn test_extreme_threshold_does_not_overflow() {
        let detector =
            Detector::new(DetectorConfig::default().with_threshold_permissions(i64::MAX));
        let c = detector.classify(&FeatureRecord::new(i64::MAX, 30, 250));
        assert_eq!(c.verdict(), Verdict::Good);
    }

    #[test]
    fn test_detector_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Detector>();
    }
}
