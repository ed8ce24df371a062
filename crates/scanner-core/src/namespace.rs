//! # Module Namespaces
//!
//! Discovery of module descriptors and the global namespace uniqueness
//! check. A descriptor is any file whose name ends with
//! [`DESCRIPTOR_SUFFIX`]; each one must declare a `namespace` and no two
//! descriptors in the scanned tree may share one.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use walkdir::WalkDir;

use crate::document::{read_yaml, DESCRIPTOR_LABEL};
use crate::error::{DuplicateSet, Result, ScannerError};

/// Filename suffix that marks a module descriptor.
pub const DESCRIPTOR_SUFFIX: &str = "module.yaml";

/// Key every descriptor must define.
pub const NAMESPACE_FIELD: &str = "namespace";

/// Recursively find every descriptor file under `root`.
///
/// Symlinked directories are not followed. Entries that cannot be read
/// are skipped with a warning. A root with no descriptors yields an empty
/// list, which is not an error. Results are sorted.
pub fn discover_descriptors(root: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(
                    root = %root.display(),
                    error = %e,
                    "failed to read entry during descriptor walk"
                );
                continue;
            }
        };
        if entry.file_type().is_dir() || !is_descriptor_name(entry.path()) {
            continue;
        }
        // Symlinks to regular files count; dangling links do not.
        if entry.file_type().is_file() || entry.path().is_file() {
            tracing::debug!(path = %entry.path().display(), "found module descriptor");
            results.push(entry.into_path());
        }
    }
    results.sort();
    results
}

fn is_descriptor_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|f| f.to_str())
        .is_some_and(|name| name.ends_with(DESCRIPTOR_SUFFIX))
}

/// Parse a descriptor and return its `namespace` value.
///
/// # Errors
///
/// - [`ScannerError::Parse`] if the file is not valid YAML.
/// - [`ScannerError::MissingField`] if the document is empty, is not a
///   mapping, or has no `namespace` key.
/// - [`ScannerError::InvalidField`] if `namespace` is not a string.
///   `namespace: 1` and `namespace: "1"` are different YAML values, so
///   numbers and booleans are rejected rather than compared as text.
pub fn extract_namespace(path: &Path) -> Result<String> {
    let doc = read_yaml(path, DESCRIPTOR_LABEL)?;
    namespace_from_document(&doc, path)
}

fn namespace_from_document(doc: &Value, path: &Path) -> Result<String> {
    let missing = || ScannerError::MissingField {
        path: path.display().to_string(),
        field: NAMESPACE_FIELD,
    };

    let mapping = doc.as_mapping().ok_or_else(missing)?;
    let value = mapping.get(NAMESPACE_FIELD).ok_or_else(missing)?;

    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(ScannerError::InvalidField {
            path: path.display().to_string(),
            field: NAMESPACE_FIELD,
            reason: format!("found {}", value_kind(other)),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Extract the namespace of every descriptor, in order.
///
/// Stops at the first descriptor that fails; later descriptors are not read.
pub fn collect_namespaces(descriptors: &[PathBuf]) -> Result<Vec<String>> {
    descriptors.iter().map(|p| extract_namespace(p)).collect()
}

/// Every namespace that appears more than once.
pub fn find_duplicates(namespaces: &[String]) -> BTreeSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for ns in namespaces {
        *counts.entry(ns.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(ns, _)| ns.to_string())
        .collect()
}

/// Fail if any two namespaces are equal.
///
/// # Errors
///
/// [`ScannerError::DuplicateNamespace`] listing every repeated value.
pub fn assert_unique(namespaces: &[String]) -> Result<()> {
    let distinct: BTreeSet<&str> = namespaces.iter().map(String::as_str).collect();
    if distinct.len() == namespaces.len() {
        return Ok(());
    }
    Err(ScannerError::DuplicateNamespace {
        duplicates: DuplicateSet(find_duplicates(namespaces)),
    })
}
