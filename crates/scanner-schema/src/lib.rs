//! # scanner-schema: Rules Database Schema Validation
//!
//! Shape validation for the rules database, separate from the per-rule
//! business checks in `scanner-core`.
//!
//! The schema requires a top-level object with exactly one property,
//! `rules`, mapping rule identifiers to rule objects. Each rule object has
//! exactly seven string-typed properties (`categories` is an array of
//! strings), all required, no extras.
//!
//! ## Crate Policy
//!
//! - Depends on no other `scanner-*` crate.
//! - The schema text lives in `schemas/` and is embedded at build time;
//!   changes to it are versioned with the crate.
//! - Invalid documents are rejected with every violation, each carrying
//!   its instance path and message.

pub mod validate;

pub use validate::{RulesDbSchema, SchemaValidationError, Violation, RULES_DB_SCHEMA};
