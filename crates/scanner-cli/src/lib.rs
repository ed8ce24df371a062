//! # scanner-cli: Registry Validation Tools
//!
//! Library half of the two validator binaries. Each binary is a thin
//! `main` that parses its arguments, installs logging, and calls the
//! matching `run` function here.
//!
//! ## Binaries
//!
//! - `validate-namespaces -m <modules-path>`: every `module.yaml`
//!   under the tree declares a distinct `namespace`.
//! - `validate-rules-db -r <rule-db-location>`: the rules database
//!   matches its schema and every rule passes the business checks.
//!
//! ## Output Contract
//!
//! Progress and diagnostics go to standard output; failures are a single
//! `ERROR: <message>` line and exit status 1. Logs go to standard error.
//!
//! ```bash
//! validate-namespaces --modules-path ./scanners
//! validate-rules-db --rule-db-location ./scanners/gitleaks/rules.yaml
//! ```

pub mod logging;
pub mod namespaces;
pub mod probe;
pub mod rules_db;

use scanner_core::ScannerError;

/// Exit status for any validation failure.
pub const EXIT_FAILURE: u8 = 1;

/// Print a failure in the CLI diagnostic format and return the exit status.
pub fn report_failure(err: &ScannerError) -> u8 {
    println!("ERROR: {err}");
    EXIT_FAILURE
}
