//! # Document Loading
//!
//! Reads YAML files from disk into `serde_yaml::Value` trees. Both
//! validators share this path; the rules database additionally rejects
//! documents that are empty.

use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Result, ScannerError};

/// Document label used in rules-database diagnostics.
pub const RULES_DB_LABEL: &str = "Rules DB";

/// Document label used in module descriptor diagnostics.
pub const DESCRIPTOR_LABEL: &str = "module descriptor";

/// Read and parse a YAML file.
///
/// `what` labels the document kind in parse diagnostics. A blank file
/// parses to [`Value::Null`]. Merge keys are resolved before returning.
///
/// # Errors
///
/// - [`ScannerError::NotFound`] if the path does not exist.
/// - [`ScannerError::Unreadable`] for any other I/O failure.
/// - [`ScannerError::Parse`] if the content is not valid UTF-8 YAML or a
///   merge key points at something other than a mapping.
pub fn read_yaml(path: &Path, what: &'static str) -> Result<Value> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScannerError::NotFound {
            path: path.display().to_string(),
        },
        _ => ScannerError::Unreadable {
            path: path.display().to_string(),
            source: e,
        },
    })?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let parse_error = |e: serde_yaml::Error| ScannerError::Parse {
        what,
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut doc: Value = serde_yaml::from_slice(&bytes).map_err(parse_error)?;
    // `<<: *anchor` stays a literal key until merged.
    doc.apply_merge().map_err(parse_error)?;
    Ok(doc)
}

/// Load the rules database document at `path`.
///
/// # Errors
///
/// Everything [`read_yaml`] returns, plus [`ScannerError::Empty`] when the
/// document is blank or parses to a falsy value (see [`is_empty_document`]).
pub fn load_document(path: &Path) -> Result<Value> {
    let doc = read_yaml(path, RULES_DB_LABEL)?;
    if is_empty_document(&doc) {
        return Err(ScannerError::Empty {
            path: path.display().to_string(),
        });
    }
    tracing::debug!(path = %path.display(), "loaded rules database");
    Ok(doc)
}

/// Returns true for documents that carry no content: null, `false`, zero,
/// the empty string, and empty sequences or mappings.
pub fn is_empty_document(doc: &Value) -> bool {
    match doc {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Tagged(tagged) => is_empty_document(&tagged.value),
    }
}

/// Render a scalar YAML value as text.
///
/// Used for rule identifiers, which YAML may spell as numbers or booleans.
/// Returns `None` for null, sequences, and mappings.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
