//! # Rules Database Validator
//!
//! Loads one rules database, validates its shape against the embedded
//! schema, then runs the business checks rule by rule in document order:
//! name, reference URL, `ALL` category, description length. The first
//! failing check ends the run.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde_yaml::Value;

use scanner_core::{
    load_document, validate_all_in_category, validate_description_length, validate_rule_name,
    RulesDb, ScannerError,
};
use scanner_schema::{RulesDbSchema, SchemaValidationError};

use crate::probe::{validate_ref_url, RefProbe};

/// Validate a rules database.
#[derive(Parser, Debug)]
#[command(name = "validate-rules-db", version, about, long_about = None)]
pub struct RulesDbArgs {
    /// Path to the rules database YAML file.
    #[arg(short = 'r', long = "rule-db-location", value_name = "PATH")]
    pub rule_db_location: PathBuf,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Outcome of a successful rules validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesReport {
    /// Rules checked.
    pub rules: usize,
    /// Rules whose reference answered with something other than 200,
    /// with the status received.
    pub non_ok_refs: Vec<(String, u16)>,
}

/// Validate the document shape against the schema.
///
/// # Errors
///
/// - [`ScannerError::SchemaViolation`] carrying the first violation message.
/// - [`ScannerError::SchemaUnavailable`] if the schema itself is broken.
pub fn validate_schema(schema: &RulesDbSchema, doc: &Value) -> Result<(), ScannerError> {
    schema.validate_yaml(doc).map_err(|e| match e {
        SchemaValidationError::ValidationFailed { violations } => {
            for v in &violations {
                tracing::debug!(instance_path = %v.instance_path, "{}", v.message);
            }
            ScannerError::SchemaViolation {
                message: violations
                    .first()
                    .map(|v| v.message.clone())
                    .unwrap_or_default(),
                count: violations.len(),
            }
        }
        other => schema_error(other),
    })
}

/// Map a non-violation schema failure onto the CLI taxonomy.
fn schema_error(err: SchemaValidationError) -> ScannerError {
    if err.is_schema_defect() {
        ScannerError::SchemaUnavailable {
            reason: err.to_string(),
        }
    } else {
        ScannerError::SchemaViolation {
            message: err.to_string(),
            count: 1,
        }
    }
}

/// Run the schema check and every per-rule check over a loaded document.
pub async fn validate_rules(
    doc: &Value,
    schema: &RulesDbSchema,
    probe: &RefProbe,
) -> Result<RulesReport, ScannerError> {
    validate_schema(schema, doc)?;

    let db = RulesDb::from_document(doc)?;
    tracing::info!(count = db.len(), "rules database passed schema validation");

    let mut report = RulesReport {
        rules: db.len(),
        ..RulesReport::default()
    };
    for (key, rule) in db.iter() {
        validate_rule_name(key, rule)?;
        let status = validate_ref_url(probe, rule).await?;
        if !status.is_ok() {
            report.non_ok_refs.push((key.to_string(), status.status));
        }
        validate_all_in_category(rule)?;
        validate_description_length(rule)?;
    }
    Ok(report)
}

/// Load and validate the database at `path` without printing.
pub async fn validate_rules_db(path: &Path, probe: &RefProbe) -> Result<RulesReport, ScannerError> {
    let doc = load_document(path)?;
    let schema = compile_schema()?;
    validate_rules(&doc, &schema, probe).await
}

fn compile_schema() -> Result<RulesDbSchema, ScannerError> {
    RulesDbSchema::new().map_err(schema_error)
}

/// Execute the rules validator. Returns the process exit status.
pub async fn run(args: &RulesDbArgs, probe: &RefProbe) -> u8 {
    let doc = match load_document(&args.rule_db_location) {
        Ok(doc) => doc,
        Err(e) => return crate::report_failure(&e),
    };

    println!("Validating rules...");
    let outcome = match compile_schema() {
        Ok(schema) => validate_rules(&doc, &schema, probe).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(report) => {
            tracing::info!(
                rules = report.rules,
                non_ok_refs = report.non_ok_refs.len(),
                "rules validated"
            );
            println!("Rules are valid!");
            0
        }
        Err(e) => crate::report_failure(&e),
    }
}
