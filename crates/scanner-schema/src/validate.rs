//! # Schema Validation
//!
//! Runtime validation of the rules database against its JSON Schema
//! (Draft 2020-12).
//!
//! The schema is a versioned data file, `schemas/rules-db.schema.json`,
//! embedded at compile time so the binaries need nothing on disk beyond
//! the document under test. [`RulesDbSchema::from_value`] accepts any other
//! schema document, which keeps shape validation testable on its own.
//!
//! Documents arrive as YAML and are serialized into `serde_json::Value`
//! before validation. Scalar mapping keys become JSON strings.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// The rules-database schema document.
pub const RULES_DB_SCHEMA: &str = include_str!("../schemas/rules-db.schema.json");

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("document has {} schema violation(s)", violations.len())]
    ValidationFailed {
        /// Every violation, in the order the validator reported them.
        violations: Vec<Violation>,
    },

    /// The schema text is not valid JSON.
    #[error("schema load error: {reason}")]
    SchemaLoadError {
        /// Reason the schema could not be parsed.
        reason: String,
    },

    /// The compiled validator could not be built.
    #[error("validator build error: {reason}")]
    ValidatorBuildError {
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The YAML document uses constructs JSON cannot represent.
    #[error("YAML-to-JSON conversion failed: {reason}")]
    Conversion {
        /// What could not be converted.
        reason: String,
    },
}

impl SchemaValidationError {
    /// True when the schema itself, not the document, is at fault.
    pub fn is_schema_defect(&self) -> bool {
        matches!(
            self,
            Self::SchemaLoadError { .. } | Self::ValidatorBuildError { .. }
        )
    }
}

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value; empty for the document root.
    pub instance_path: String,
    /// Validator message, e.g. `"driver" is a required property`.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "/"
        } else {
            &self.instance_path
        };
        write!(f, "{at}: {}", self.message)
    }
}

/// Compiled validator for rules-database documents.
pub struct RulesDbSchema {
    validator: Validator,
}

impl fmt::Debug for RulesDbSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulesDbSchema").finish_non_exhaustive()
    }
}

impl RulesDbSchema {
    /// Compile the embedded [`RULES_DB_SCHEMA`].
    pub fn new() -> Result<Self, SchemaValidationError> {
        let schema: Value = serde_json::from_str(RULES_DB_SCHEMA).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        Self::from_value(&schema)
    }

    /// Compile an arbitrary schema document.
    pub fn from_value(schema: &Value) -> Result<Self, SchemaValidationError> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Validate a parsed JSON value.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::ValidationFailed`] with every violation.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed { violations })
        }
    }

    /// Convert a YAML document to JSON and validate it.
    pub fn validate_yaml(&self, document: &serde_yaml::Value) -> Result<(), SchemaValidationError> {
        let json = serde_json::to_value(document).map_err(|e| {
            SchemaValidationError::Conversion {
                reason: e.to_string(),
            }
        })?;
        self.validate(&json)
    }
}
