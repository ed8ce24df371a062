//! # validate-namespaces entry point
//!
//! Checks that every `module.yaml` under `--modules-path` declares a
//! distinct `namespace`.

use std::process::ExitCode;

use clap::Parser;

use scanner_cli::namespaces::{run, NamespacesArgs};

fn main() -> ExitCode {
    let args = NamespacesArgs::parse();

    if let Err(e) = scanner_cli::logging::init(args.verbose) {
        eprintln!("{e:#}");
    }

    ExitCode::from(run(&args))
}
