//! Random feature record generation for exploratory testing.
//!
//! Default ranges: permissions in `[1, 10]`, user interactions in
//! `[0, 50]`, reviews in `[50, 500]`. Seed explicitly for reproducible runs.

mod config;
mod runner;

pub use config::SamplerConfig;
pub use runner::Sampler;
