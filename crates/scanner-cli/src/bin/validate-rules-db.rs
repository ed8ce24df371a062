//! # validate-rules-db entry point
//!
//! Validates the rules database at `--rule-db-location`. Rules are checked
//! one at a time; the reference probes run sequentially on a
//! single-threaded runtime.

use std::process::ExitCode;

use clap::Parser;

use scanner_cli::probe::RefProbe;
use scanner_cli::rules_db::{run, RulesDbArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = RulesDbArgs::parse();

    if let Err(e) = scanner_cli::logging::init(args.verbose) {
        eprintln!("{e:#}");
    }

    let probe = match RefProbe::new() {
        Ok(probe) => probe,
        Err(e) => {
            tracing::error!("failed to build HTTP client: {e}");
            println!("ERROR: failed to build HTTP client: {e}");
            return ExitCode::from(scanner_cli::EXIT_FAILURE);
        }
    };

    ExitCode::from(run(&args, &probe).await)
}
