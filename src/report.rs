//! Console rendering of classification results.

use crate::detector::{Classification, FeatureRecord};
use crate::harness::VerdictTally;

/// Renders a record and its classification as a three-line block.
///
/// ```
/// use app_verdict::detector::{Detector, FeatureRecord};
/// use app_verdict::report::render;
///
/// let record = FeatureRecord::new(3, 30, 250);
/// let text = render(&record, &Detector::default().classify(&record));
/// assert_eq!(
///     text,
///     "Test: Permissions: 3, User Interactions: 30, App Reviews: 250\n\
///      Result: Good\n\
///      Reasons: ['all criteria met']"
/// );
/// ```
pub fn render(record: &FeatureRecord, classification: &Classification) -> String {
    format!(
        "Test: {record}\nResult: {}\nReasons: {}",
        classification.verdict(),
        render_reasons(classification.reasons())
    )
}

/// Same as [`render`], headed by a label line.
pub fn render_case(label: &str, record: &FeatureRecord, classification: &Classification) -> String {
    format!(
        "{label}:\nApp Info: {record}\nResult: {}\nReasons: {}",
        classification.verdict(),
        render_reasons(classification.reasons())
    )
}

/// `['a', 'b']`
pub fn render_reasons(reasons: &[String]) -> String {
    let quoted: Vec<String> = reasons.iter().map(|r| format!("'{r}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// One-line verdict summary.
pub fn render_tally(tally: &VerdictTally) -> String {
    format!(
        "{} classified: {} Good, {} Neutral, {} Evil",
        tally.total(),
        tally.good,
        tally.neutral,
        tally.evil
    )
}
