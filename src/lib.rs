//! Rule-based classification of application profiles.
//!
//! An application is described by three counts (requested permissions,
//! user interactions, reviews) and classified as **Good**, **Neutral** or
//! **Evil** against configurable thresholds. Every classification carries
//! an ordered list of human-readable reasons.
//!
//! - **Detector**: the pure rule engine. Three independent checks, combined
//!   worst-case-wins.
//! - **Sampling**: seeded random feature records for exploratory runs.
//! - **Harness**: scenario tables and a fuzz harness that check the
//!   detector's invariants.
//! - **Report**: console rendering of results.
//!
//! # Example
//!
//! ```
//! use app_verdict::detector::{Detector, DetectorConfig, FeatureRecord, Verdict};
//!
//! let detector = Detector::new(DetectorConfig::default());
//! let result = detector.classify(&FeatureRecord::new(8, 20, 250));
//!
//! assert_eq!(result.verdict(), Verdict::Evil);
//! assert_eq!(result.reasons(), ["too many permissions requested (> 7)"]);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configs and inputs, `Serialize`
//!   for classification results.
//! - `parallel`: classify fuzz samples on the rayon thread pool.
//! - `cli`: the `app-verdict` command-line binary.

pub mod detector;
pub mod error;
pub mod harness;
pub mod report;
pub mod sampling;

pub use detector::{Classification, Detector, DetectorConfig, FeatureRecord, Verdict};
pub use error::{ConfigError, RecordError};
