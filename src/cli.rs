//! Command-line entry point.
//!
//! Parses arguments, validates the configuration up front, realizes the full
//! suite against the target host, and maps the run summary onto the process
//! exit code.

use std::process;

use clap::Parser;

use crate::cases;
use crate::endpoints::Endpoints;
use crate::registry::Registry;
use crate::runner::{self, RunConfig};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "recon",
    version,
    about = "Exercises a REST auction backend against its behavioral contract."
)]
pub struct Args {
    /// Only run test cases whose name starts with a match of this pattern.
    pub filter: Option<String>,

    /// Base URL of the backend under test.
    #[arg(long, default_value = "http://localhost:8080")]
    pub host: String,

    /// Keep running after a failure instead of stopping at the first one.
    #[arg(long)]
    pub ignore_errors: bool,
}

/// Parses the process arguments and runs the suite. Exits nonzero when the
/// configuration is invalid or any executed case failed.
pub fn run() {
    let args = Args::parse();
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            process::exit(1);
        }
    };

    let mut registry = Registry::new();
    cases::register_all(&mut registry);

    let endpoints = Endpoints::new(&args.host);
    let test_cases = registry.create_test_cases(&endpoints);
    let summary = runner::run(test_cases, &config);
    if summary.failed() > 0 {
        process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<RunConfig, String> {
    reqwest::Url::parse(&args.host).map_err(|e| format!("invalid host {:?}: {e}", args.host))?;

    let mut config = RunConfig { ignore_errors: args.ignore_errors, ..RunConfig::default() };
    if let Some(pattern) = &args.filter {
        config.filter = Some(
            runner::compile_filter(pattern)
                .map_err(|e| format!("invalid filter pattern {pattern:?}: {e}"))?,
        );
    }
    Ok(config)
}
