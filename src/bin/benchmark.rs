//! Benchmark binary for numeric string parsing
//!
//! Verifies every parser, then times them over the same synthetic inputs.
//! Results go to stdout as a table, or as one JSON document with `--json`.
//! Logs go to stderr, filtered by `NUM_PARSE_LOG` (or `RUST_LOG`).

use clap::Parser;
use num_parse::harness::{self, BenchConfig, HarnessError};
use tracing_subscriber::EnvFilter;

/// Compare the table-driven parsers with library baselines
#[derive(Parser, Debug)]
#[command(name = "benchmark")]
#[command(about, long_about = None)]
struct Args {
    /// Timed passes over the dataset
    iterations: Option<u32>,

    /// Untimed passes before timing starts
    #[arg(long)]
    warmup: Option<u32>,

    /// Generated strings per workload
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for the generated data
    #[arg(long)]
    seed: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> BenchConfig {
        let defaults = BenchConfig::default();
        BenchConfig {
            iterations: self.iterations.unwrap_or(defaults.iterations),
            warmup: self.warmup.unwrap_or(defaults.warmup),
            samples: self.count.unwrap_or(defaults.samples),
            seed: self.seed.unwrap_or(defaults.seed),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NUM_PARSE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), HarnessError> {
    init_tracing();

    let args = Args::parse();
    let config = args.config();
    tracing::debug!(?config, "starting benchmark");

    let report = harness::run(&config)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.table());
    }

    if !report.correctness {
        std::process::exit(1);
    }
    Ok(())
}
