//! # Namespace Validator
//!
//! Walks a modules tree, reads the `namespace` of every `module.yaml`, and
//! fails if any descriptor lacks one or if two descriptors share one.
//! The first descriptor without a namespace aborts the run; uniqueness is
//! checked only after every namespace has been read.

use std::path::{Path, PathBuf};

use clap::Parser;

use scanner_core::{assert_unique, collect_namespaces, discover_descriptors, ScannerError};

/// Check that module namespaces are unique.
#[derive(Parser, Debug)]
#[command(name = "validate-namespaces", version, about, long_about = None)]
pub struct NamespacesArgs {
    /// Root directory to scan for `module.yaml` descriptors.
    #[arg(short = 'm', long = "modules-path", value_name = "PATH")]
    pub modules_path: PathBuf,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Outcome of a successful namespace validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceReport {
    /// Descriptors found and checked.
    pub descriptors: usize,
}

/// Run the whole namespace pipeline without printing.
pub fn validate_namespaces(modules_path: &Path) -> Result<NamespaceReport, ScannerError> {
    if !modules_path.is_dir() {
        tracing::warn!(
            path = %modules_path.display(),
            "modules path is not a directory; nothing to validate"
        );
    }

    let descriptors = discover_descriptors(modules_path);
    tracing::info!(count = descriptors.len(), "discovered module descriptors");

    let namespaces = collect_namespaces(&descriptors)?;
    assert_unique(&namespaces)?;

    Ok(NamespaceReport {
        descriptors: descriptors.len(),
    })
}

/// Execute the namespace validator. Returns the process exit status.
pub fn run(args: &NamespacesArgs) -> u8 {
    println!("Validating namespaces...");
    match validate_namespaces(&args.modules_path) {
        Ok(report) => {
            tracing::info!(descriptors = report.descriptors, "namespaces validated");
            println!("Namespaces are unique.");
            0
        }
        Err(e) => crate::report_failure(&e),
    }
}
