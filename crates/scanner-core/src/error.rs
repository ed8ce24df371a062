//! # Error Hierarchy
//!
//! Structured error types for both validators, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every variant is terminal: the binaries render it as `ERROR: <display>`
//! on standard output and exit non-zero. Display strings are part of the
//! user-facing contract and must stay stable for CI log matching.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Top-level error type for the namespace and rules-database validators.
#[derive(Error, Debug)]
pub enum ScannerError {
    /// The rules database path does not exist.
    #[error("Rules DB not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file exists but could not be read.
    #[error("unable to read {path}: {source}")]
    Unreadable {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file content is not valid YAML.
    #[error("Unable to parse {what} file: {path}: {reason}")]
    Parse {
        /// Human label of the document kind ("Rules DB", "module descriptor").
        what: &'static str,
        /// Path to the document.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// The rules database parsed to an empty (falsy) document.
    #[error("Rules DB is empty")]
    Empty {
        /// Path to the document.
        path: String,
    },

    /// The rules database does not conform to the schema.
    #[error("Rules db is invalid: \"{message}\"")]
    SchemaViolation {
        /// First violation reported by the schema validator.
        message: String,
        /// Total number of violations found.
        count: usize,
    },

    /// The embedded rules database schema could not be compiled. This is a
    /// defect in the tool, not in the document being checked.
    #[error("internal error: rules DB schema could not be compiled: {reason}")]
    SchemaUnavailable {
        /// Validator construction failure.
        reason: String,
    },

    /// A module descriptor has no `namespace` key.
    #[error("{field} not found in {path}")]
    MissingField {
        /// Descriptor path.
        path: String,
        /// Name of the missing key.
        field: &'static str,
    },

    /// A module descriptor's `namespace` is present but not a string.
    #[error("{field} in {path} is not a string: {reason}")]
    InvalidField {
        /// Descriptor path.
        path: String,
        /// Name of the offending key.
        field: &'static str,
        /// What was found instead.
        reason: String,
    },

    /// Two or more descriptors declare the same namespace.
    #[error("namespaces are not unique, duplicates found: {duplicates}")]
    DuplicateNamespace {
        /// Every namespace value that appears more than once.
        duplicates: DuplicateSet,
    },

    /// A rule's `name` differs from its mapping key.
    #[error("Rule name \"{key}\" does not match \"{name}\"")]
    NameMismatch {
        /// Mapping key of the rule.
        key: String,
        /// Value of the rule's `name` field.
        name: String,
    },

    /// A rule's `ref` does not start with an HTTP scheme.
    #[error("Url missing protocol: \"{url}\" from rule \"{rule}\"")]
    BadScheme {
        /// Rule name.
        rule: String,
        /// Offending reference URL.
        url: String,
    },

    /// A rule's `ref` could not be fetched at the transport level.
    #[error("Invalid link: \"{url}\" from rule \"{rule}\"")]
    UnreachableRef {
        /// Rule name.
        rule: String,
        /// Reference URL that failed.
        url: String,
        /// Transport error message.
        reason: String,
    },

    /// A rule's `categories` does not include `ALL`.
    #[error("Rule \"{rule}\" is missing category \"ALL\"")]
    MissingAllCategory {
        /// Rule name.
        rule: String,
    },

    /// A rule's `description` is longer than the allowed maximum.
    #[error("Rule \"{rule}\" description is too long: \"{description}\"")]
    DescriptionTooLong {
        /// Rule name.
        rule: String,
        /// Full description text.
        description: String,
        /// Length in characters.
        length: usize,
    },

    /// A rule passed schema validation but could not be decoded.
    #[error("Rule \"{key}\" could not be decoded: {reason}")]
    InvalidRule {
        /// Mapping key of the rule.
        key: String,
        /// Decoder message.
        reason: String,
    },
}

/// Sorted set of duplicated namespaces, rendered as `[a, b]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateSet(pub BTreeSet<String>);

impl DuplicateSet {
    /// Returns true if `namespace` is one of the duplicates.
    pub fn contains(&self, namespace: &str) -> bool {
        self.0.contains(namespace)
    }

    /// Number of distinct duplicated values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no duplicates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DuplicateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, ns) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{ns}'")?;
        }
        write!(f, "]")
    }
}

/// Convenience alias used across the workspace.
pub type Result<T, E = ScannerError> = std::result::Result<T, E>;
