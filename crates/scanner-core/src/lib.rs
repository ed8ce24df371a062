//! # scanner-core: Foundational Types for the Scanner Registry Tools
//!
//! Shared building blocks for the two registry validators: the namespace
//! uniqueness check over module descriptors and the rules-database check.
//!
//! ## Modules
//!
//! - [`document`]: YAML loading with the `NotFound` / `Parse` / `Empty`
//!   distinctions the CLIs report.
//! - [`namespace`]: descriptor discovery, namespace extraction, and the
//!   uniqueness assertion.
//! - [`rule`]: typed rule records and the pure per-rule business checks.
//! - [`error`]: the single [`ScannerError`] taxonomy.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `scanner-*` crates.
//! - No network access; the reference-URL probe belongs to `scanner-cli`.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod namespace;
pub mod rule;

pub use document::{is_empty_document, load_document, read_yaml};
pub use error::{DuplicateSet, ScannerError};
pub use namespace::{
    assert_unique, collect_namespaces, discover_descriptors, extract_namespace, find_duplicates,
    DESCRIPTOR_SUFFIX,
};
pub use rule::{
    validate_all_in_category, validate_description_length, validate_ref_scheme,
    validate_rule_name, Rule, RulesDb, ALL_CATEGORY, MAX_DESCRIPTION_LEN,
};
