//! Named, fixed-input cases with expected verdicts.

use crate::detector::{Classification, Detector, FeatureRecord, Verdict, ALL_CRITERIA_MET};

/// One fixed input and the verdict it must produce.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    pub record: FeatureRecord,
    pub expected: Verdict,
    /// When set, the reasons must match exactly.
    pub expected_reasons: Option<Vec<String>>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, record: FeatureRecord, expected: Verdict) -> Self {
        Self {
            name: name.into(),
            record,
            expected,
            expected_reasons: None,
        }
    }

    pub fn with_reasons<S: Into<String>>(mut self, reasons: impl IntoIterator<Item = S>) -> Self {
        self.expected_reasons = Some(reasons.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `classification` satisfies this scenario.
    pub fn accepts(&self, classification: &Classification) -> bool {
        if classification.verdict() != self.expected {
            return false;
        }
        match &self.expected_reasons {
            Some(reasons) => classification.reasons() == reasons.as_slice(),
            None => true,
        }
    }
}

fn case(name: &str, p: i64, i: i64, r: i64, expected: Verdict) -> Scenario {
    Scenario::new(name, FeatureRecord::new(p, i, r), expected)
}

/// Focused cases, one per rule family.
pub fn unit_scenarios() -> Vec<Scenario> {
    vec![
        case("evil_due_to_permissions", 8, 20, 250, Verdict::Evil),
        case("evil_due_to_low_reviews", 4, 20, 50, Verdict::Evil),
        case("neutral_due_to_permissions", 6, 15, 300, Verdict::Neutral),
        case("good", 3, 30, 250, Verdict::Good),
    ]
}

/// Mixed inputs checked only by verdict.
pub fn black_box_scenarios() -> Vec<Scenario> {
    vec![
        case("black_box_1", 9, 25, 100, Verdict::Evil),
        case("black_box_2", 5, 15, 150, Verdict::Neutral),
        case("black_box_3", 4, 30, 400, Verdict::Good),
        case("black_box_4", 5, 9, 250, Verdict::Neutral),
    ]
}

/// One case per branch of the rule logic.
pub fn white_box_scenarios() -> Vec<Scenario> {
    vec![
        case("permissions_too_high", 10, 50, 500, Verdict::Evil),
        case("reviews_too_low", 4, 30, 80, Verdict::Evil),
        case("permissions_moderate", 6, 20, 300, Verdict::Neutral),
        case("all_clear", 3, 30, 250, Verdict::Good),
    ]
}

/// Reference cases with exact reasons under the default thresholds.
pub fn reference_scenarios() -> Vec<Scenario> {
    vec![
        case("excessive_permissions", 8, 20, 250, Verdict::Evil)
            .with_reasons(["too many permissions requested (> 7)"]),
        case("too_few_reviews", 4, 20, 50, Verdict::Evil)
            .with_reasons(["too few reviews (< 100)"]),
        case("moderate_permissions", 6, 15, 300, Verdict::Neutral)
            .with_reasons(["moderately high permissions (> 5)"]),
        case("all_criteria_met", 3, 30, 250, Verdict::Good).with_reasons([ALL_CRITERIA_MET]),
        case("low_interactions", 5, 9, 250, Verdict::Neutral)
            .with_reasons(["low user interactions (< 10)"]),
    ]
}

/// Result of running one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub record: FeatureRecord,
    pub expected: Verdict,
    pub classification: Classification,
    pub passed: bool,
}

/// Results of a scenario run, in input order.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| o.passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }
}

/// Runs scenario tables against a detector.
pub struct ScenarioSuite;

impl ScenarioSuite {
    pub fn run(detector: &Detector, scenarios: &[Scenario]) -> SuiteReport {
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .iter()
            .map(|scenario| {
                let classification = detector.classify(&scenario.record);
                let passed = scenario.accepts(&classification);
                if !passed {
                    tracing::warn!(
                        scenario = %scenario.name,
                        expected = %scenario.expected,
                        actual = %classification.verdict(),
                        "Scenario failed"
                    );
                }
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    record: scenario.record,
                    expected: scenario.expected,
                    classification,
                    passed,
                }
            })
            .collect();

        let report = SuiteReport { outcomes };
        tracing::info!(
            total = report.outcomes.len(),
            failed = report.failed().count(),
            "Scenario suite finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::DetectorConfig;

    #[test]
    fn test_builtin_tables_pass_with_defaults() {
        let detector = Detector::default();
        for table in [
            unit_scenarios(),
            black_box_scenarios(),
            white_box_scenarios(),
            reference_scenarios(),
        ] {
            let report = ScenarioSuite::run(&detector, &table);
            assert!(report.all_passed(), "failed: {:?}", report.failed().collect::<Vec<_>>());
            assert_eq!(report.passed().count(), table.len());
        }
    }

    #[test]
    fn test_mismatch_is_reported() {
        let detector = Detector::new(DetectorConfig::default().with_threshold_permissions(10));
        let report = ScenarioSuite::run(&detector, &unit_scenarios());
        assert!(!report.all_passed());
        let failed: Vec<&str> = report.failed().map(|o| o.name.as_str()).collect();
        assert_eq!(failed, vec!["evil_due_to_permissions", "neutral_due_to_permissions"]);
    }

    #[test]
    fn test_reason_mismatch_fails() {
        let scenario = case("x", 3, 30, 250, Verdict::Good).with_reasons(["something else"]);
        let report = ScenarioSuite::run(&Detector::default(), &[scenario]);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_empty_suite() {
        let report = ScenarioSuite::run(&Detector::default(), &[]);
        assert!(report.all_passed());
        assert_eq!(report.outcomes.len(), 0);
    }
}
