//! Rule-based application classification.
//!
//! A [`Detector`] maps a [`FeatureRecord`] to a [`Classification`]: one of
//! three [`Verdict`]s plus the ordered reasons behind it.
//!
//! # Rules
//!
//! | Check        | Evil                         | Neutral                              |
//! |--------------|------------------------------|--------------------------------------|
//! | permissions  | `> threshold_permissions + 2`| `> threshold_permissions`            |
//! | reviews      | `< min_reviews`              | `< neutral_review_threshold`         |
//! | interactions | `< 5`                        | `< 10`                               |
//!
//! The overall verdict is the worst local severity across the three
//! checks. Every triggered check contributes its reason, in the order of
//! the table, even when it does not change the verdict. When nothing
//! triggers the verdict is Good and the only reason is
//! [`ALL_CRITERIA_MET`].

mod config;
mod engine;
mod types;

pub use config::DetectorConfig;
pub use engine::{Detector, LOW_INTERACTIONS, VERY_LOW_INTERACTIONS};
pub use types::{
    Check, CheckOutcome, Classification, FeatureRecord, Severity, Verdict, ALL_CRITERIA_MET,
};
