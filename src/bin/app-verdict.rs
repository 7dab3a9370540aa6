//! Command-line front end for the application classifier.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use app_verdict::detector::{Detector, DetectorConfig, FeatureRecord};
use app_verdict::harness::{
    black_box_scenarios, unit_scenarios, white_box_scenarios, FuzzConfig, FuzzHarness,
    ScenarioSuite, VerdictTally,
};
use app_verdict::report::{render, render_case, render_tally};
use app_verdict::sampling::{Sampler, SamplerConfig};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    thresholds: Thresholds,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Thresholds {
    /// JSON file with a detector configuration. Flags below override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    threshold_permissions: Option<i64>,

    #[arg(long, global = true)]
    min_reviews: Option<i64>,

    #[arg(long, global = true)]
    neutral_review_threshold: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single application profile.
    Classify {
        #[arg(long)]
        permissions: i64,

        #[arg(long)]
        interactions: i64,

        #[arg(long)]
        reviews: i64,

        /// Reject negative counts instead of classifying them.
        #[arg(long)]
        strict: bool,
    },

    /// Classify randomly sampled profiles.
    Sample {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the unit, black-box and white-box scenario tables.
    Suite,

    /// Check classifier invariants over random samples.
    Fuzz {
        #[arg(long, default_value_t = 10_000)]
        iterations: usize,

        #[arg(long)]
        seed: Option<u64>,

        /// Classify on all cores (needs the `parallel` feature).
        #[arg(long)]
        parallel: bool,
    },
}

impl Thresholds {
    fn load(&self) -> Result<DetectorConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => DetectorConfig::default(),
        };
        if let Some(n) = self.threshold_permissions {
            config = config.with_threshold_permissions(n);
        }
        if let Some(n) = self.min_reviews {
            config = config.with_min_reviews(n);
        }
        if let Some(n) = self.neutral_review_threshold {
            config = config.with_neutral_review_threshold(n);
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.thresholds.load()?;
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "Detector configuration is degenerate");
    }
    let detector = Detector::new(config);

    match cli.command {
        Command::Classify {
            permissions,
            interactions,
            reviews,
            strict,
        } => {
            let record = FeatureRecord::new(permissions, interactions, reviews);
            let classification = if strict {
                detector.try_classify(&record)?
            } else {
                detector.classify(&record)
            };
            println!("{}", render(&record, &classification));
        }

        Command::Sample { count, seed } => {
            let mut sampler_config = SamplerConfig::default();
            if let Some(seed) = seed {
                sampler_config = sampler_config.with_seed(seed);
            }
            let mut sampler = Sampler::new(sampler_config)?;
            println!("Sampling {count} profiles (seed {})", sampler.seed());

            let mut tally = VerdictTally::default();
            for (i, record) in sampler.sample_batch(count).iter().enumerate() {
                let classification = detector.classify(record);
                tally.record(classification.verdict());
                println!(
                    "\n{}",
                    render_case(&format!("Sample {}", i + 1), record, &classification)
                );
            }
            println!("\n{}", render_tally(&tally));
        }

        Command::Suite => {
            let mut all_passed = true;
            for (title, table) in [
                ("Unit", unit_scenarios()),
                ("Black-Box", black_box_scenarios()),
                ("White-Box", white_box_scenarios()),
            ] {
                println!("\nRunning {title} Testing:");
                let report = ScenarioSuite::run(&detector, &table);
                for (i, outcome) in report.outcomes.iter().enumerate() {
                    let label = format!(
                        "{title} Test Case {} ({}) [{}]",
                        i + 1,
                        outcome.name,
                        if outcome.passed { "ok" } else { "FAILED" }
                    );
                    println!(
                        "\n{}",
                        render_case(&label, &outcome.record, &outcome.classification)
                    );
                }
                all_passed &= report.all_passed();
            }
            if !all_passed {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Fuzz {
            iterations,
            seed,
            parallel,
        } => {
            let mut fuzz = FuzzConfig::default()
                .with_iterations(iterations)
                .with_parallel(parallel);
            if let Some(seed) = seed {
                fuzz = fuzz.with_seed(seed);
            }
            let report = FuzzHarness::run(&detector, &fuzz)?;
            println!("Seed: {}", report.seed);
            println!("{}", render_tally(&report.tally));
            for violation in &report.violations {
                println!("VIOLATION {}: {}", violation.record, violation.message);
            }
            if !report.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
