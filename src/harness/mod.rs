//! Test harnesses that drive a [`Detector`](crate::detector::Detector).
//!
//! - **Scenarios**: fixed inputs with expected verdicts, grouped in tables
//!   (unit, black-box, white-box, reference) and run by [`ScenarioSuite`].
//! - **Fuzz**: seeded random sampling through [`FuzzHarness`], checking
//!   determinism and combination invariants on every sample.
//!
//! Each harness runs independently; nothing executes implicitly.

mod fuzz;
mod scenarios;

pub use fuzz::{FuzzConfig, FuzzHarness, FuzzReport, VerdictTally, Violation};
pub use scenarios::{
    black_box_scenarios, reference_scenarios, unit_scenarios, white_box_scenarios, Scenario,
    ScenarioOutcome, ScenarioSuite, SuiteReport,
};
