//! Value types for classification: inputs, per-check outcomes and verdicts.

use std::fmt;

use crate::error::RecordError;

/// Reason emitted when no check triggers.
pub const ALL_CRITERIA_MET: &str = "all criteria met";

/// Observed attributes of one application profile.
///
/// Values are taken as-is. Negative counts are accepted here and are only
/// rejected by [`FeatureRecord::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureRecord {
    permissions: i64,
    user_interactions: i64,
    app_reviews: i64,
}

impl FeatureRecord {
    pub fn new(permissions: i64, user_interactions: i64, app_reviews: i64) -> Self {
        Self {
            permissions,
            user_interactions,
            app_reviews,
        }
    }

    /// Number of requested permissions.
    pub fn permissions(&self) -> i64 {
        self.permissions
    }

    /// Number of observed user interactions.
    pub fn user_interactions(&self) -> i64 {
        self.user_interactions
    }

    /// Number of reviews.
    pub fn app_reviews(&self) -> i64 {
        self.app_reviews
    }

    /// Rejects negative attribute counts.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (name, value) in [
            ("permissions", self.permissions),
            ("user_interactions", self.user_interactions),
            ("app_reviews", self.app_reviews),
        ] {
            if value < 0 {
                return Err(RecordError::NegativeAttribute { name, value });
            }
        }
        Ok(())
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Permissions: {}, User Interactions: {}, App Reviews: {}",
            self.permissions, self.user_interactions, self.app_reviews
        )
    }
}

/// Overall classification outcome.
///
/// Ordered by severity: `Good < Neutral < Evil`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Good,
    Neutral,
    Evil,
}

impl Verdict {
    /// All verdicts in ascending severity.
    pub const ALL: [Verdict; 3] = [Verdict::Good, Verdict::Neutral, Verdict::Evil];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Good => "Good",
            Verdict::Neutral => "Neutral",
            Verdict::Evil => "Evil",
        }
    }

    /// Combines this verdict with a check's local severity.
    ///
    /// Worst case wins; Evil is absorbing.
    pub fn absorb(self, severity: Severity) -> Verdict {
        self.max(Verdict::from(severity))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single check before combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// The check did not trigger.
    None,
    Neutral,
    Evil,
}

impl From<Severity> for Verdict {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::None => Verdict::Good,
            Severity::Neutral => Verdict::Neutral,
            Severity::Evil => Verdict::Evil,
        }
    }
}

/// The individual checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Check {
    Permissions,
    Reviews,
    Interactions,
}

impl Check {
    /// Evaluation order. Reasons always follow this order.
    pub const ORDER: [Check; 3] = [Check::Permissions, Check::Reviews, Check::Interactions];

    pub fn name(&self) -> &'static str {
        match self {
            Check::Permissions => "permissions",
            Check::Reviews => "reviews",
            Check::Interactions => "interactions",
        }
    }
}

/// Result of one check against one record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckOutcome {
    pub check: Check,
    pub severity: Severity,
    /// Present exactly when `severity` is not [`Severity::None`].
    pub reason: Option<String>,
}

impl CheckOutcome {
    pub(crate) fn clear(check: Check) -> Self {
        Self {
            check,
            severity: Severity::None,
            reason: None,
        }
    }

    pub(crate) fn triggered(check: Check, severity: Severity, reason: String) -> Self {
        Self {
            check,
            severity,
            reason: Some(reason),
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.severity != Severity::None
    }
}

/// A verdict together with the reasons that justify it.
///
/// Only the detector builds these, so the reason list is never empty.
/// Serialization is one-way for that reason.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Classification {
    verdict: Verdict,
    reasons: Vec<String>,
}

impl Classification {
    /// Folds check outcomes into a classification.
    ///
    /// Outcomes must already be in [`Check::ORDER`].
    pub(crate) fn from_outcomes(outcomes: impl IntoIterator<Item = CheckOutcome>) -> Self {
        let mut verdict = Verdict::Good;
        let mut reasons = Vec::new();

        for outcome in outcomes {
            verdict = verdict.absorb(outcome.severity);
            if let Some(reason) = outcome.reason {
                reasons.push(reason);
            }
        }

        if reasons.is_empty() {
            reasons.push(ALL_CRITERIA_MET.to_string());
        }

        Self { verdict, reasons }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Triggered reasons in check order, or the single sentinel reason.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// True when no check triggered.
    pub fn is_all_clear(&self) -> bool {
        self.reasons.len() == 1 && self.reasons[0] == ALL_CRITERIA_MET
    }

    pub fn into_parts(self) -> (Verdict, Vec<String>) {
        (self.verdict, self.reasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accessors_and_display() {
        let record = FeatureRecord::new(8, 20, 250);
        assert_eq!(record.permissions(), 8);
        assert_eq!(record.user_interactions(), 20);
        assert_eq!(record.app_reviews(), 250);
        assert_eq!(
            record.to_string(),
            "Permissions: 8, User Interactions: 20, App Reviews: 250"
        );
    }

    #[test]
    fn test_record_validate() {
        assert!(FeatureRecord::new(0, 0, 0).validate().is_ok());
        assert_eq!(
            FeatureRecord::new(3, -2, 10).validate(),
            Err(RecordError::NegativeAttribute {
                name: "user_interactions",
                value: -2
            })
        );
    }

    #[test]
    fn test_verdict_ordering() {
        assert!(Verdict::Good < Verdict::Neutral);
        assert!(Verdict::Neutral < Verdict::Evil);
        assert_eq!(Verdict::ALL.iter().max(), Some(&Verdict::Evil));
    }

    #[test]
    fn test_absorb_is_monotone() {
        assert_eq!(Verdict::Good.absorb(Severity::None), Verdict::Good);
        assert_eq!(Verdict::Good.absorb(Severity::Neutral), Verdict::Neutral);
        assert_eq!(Verdict::Neutral.absorb(Severity::None), Verdict::Neutral);
        assert_eq!(Verdict::Evil.absorb(Severity::Neutral), Verdict::Evil);
        assert_eq!(Verdict::Neutral.absorb(Severity::Evil), Verdict::Evil);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Good.to_string(), "Good");
        assert_eq!(Verdict::Neutral.to_string(), "Neutral");
        assert_eq!(Verdict::Evil.to_string(), "Evil");
    }

    #[test]
    fn test_from_outcomes_empty_gives_sentinel() {
        let c = Classification::from_outcomes(Check::ORDER.map(CheckOutcome::clear));
        assert_eq!(c.verdict(), Verdict::Good);
        assert_eq!(c.reasons(), [ALL_CRITERIA_MET]);
        assert!(c.is_all_clear());
    }

    #[test]
    fn test_from_outcomes_keeps_neutral_reason_after_evil() {
        let c = Classification::from_outcomes([
            CheckOutcome::triggered(Check::Permissions, Severity::Evil, "p".into()),
            CheckOutcome::clear(Check::Reviews),
            CheckOutcome::triggered(Check::Interactions, Severity::Neutral, "i".into()),
        ]);
        let (verdict, reasons) = c.into_parts();
        assert_eq!(verdict, Verdict::Evil);
        assert_eq!(reasons, vec!["p".to_string(), "i".to_string()]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_classification_serializes_verdict_and_reasons() {
        let c = Classification::from_outcomes([
            CheckOutcome::triggered(
                Check::Permissions,
                Severity::Evil,
                "too many permissions requested (> 7)".into(),
            ),
            CheckOutcome::clear(Check::Reviews),
            CheckOutcome::clear(Check::Interactions),
        ]);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "verdict": "Evil",
                "reasons": ["too many permissions requested (> 7)"],
            })
        );
    }
}
