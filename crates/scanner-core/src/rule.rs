//! # Rules Database Records
//!
//! Typed view of a rules database that has already passed schema
//! validation, plus the per-rule business checks. The checks are pure
//! functions; the reference-URL reachability probe lives with the HTTP
//! client in the CLI crate and only the scheme prefix is checked here.

use serde::Deserialize;
use serde_yaml::Value;

use crate::document::scalar_to_string;
use crate::error::{Result, ScannerError};

/// Category every rule must belong to.
pub const ALL_CATEGORY: &str = "ALL";

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Top-level key of the rules database.
pub const RULES_KEY: &str = "rules";

/// One entry of the rules database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub categories: Vec<String>,
    pub description: String,
    pub driver: String,
    pub group: String,
    pub name: String,
    pub pretty_name: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

/// The rules of a database, keyed by rule identifier, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesDb {
    rules: Vec<(String, Rule)>,
}

impl RulesDb {
    /// Decode the `rules` mapping of a schema-valid document.
    ///
    /// # Errors
    ///
    /// [`ScannerError::InvalidRule`] if a key is not a scalar or a rule does
    /// not decode into [`Rule`]. Schema validation rejects both cases first.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let Some(mapping) = doc.get(RULES_KEY).and_then(Value::as_mapping) else {
            return Ok(Self::default());
        };

        let mut rules = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = scalar_to_string(key).ok_or_else(|| ScannerError::InvalidRule {
                key: format!("{key:?}"),
                reason: "rule identifier is not a scalar".into(),
            })?;
            let rule: Rule =
                serde_yaml::from_value(value.clone()).map_err(|e| ScannerError::InvalidRule {
                    key: key.clone(),
                    reason: e.to_string(),
                })?;
            rules.push((key, rule));
        }
        Ok(Self { rules })
    }

    /// Iterate `(key, rule)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the database has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The rule's `name` must equal its mapping key.
pub fn validate_rule_name(key: &str, rule: &Rule) -> Result<()> {
    if key != rule.name {
        return Err(ScannerError::NameMismatch {
            key: key.to_string(),
            name: rule.name.clone(),
        });
    }
    Ok(())
}

/// The rule's `ref` must start with `http`.
///
/// This is a textual prefix check only; `https` is covered by the same
/// prefix and malformed variants such as `httpfoo` pass here and fail later
/// at the reachability probe.
pub fn validate_ref_scheme(rule: &Rule) -> Result<()> {
    if !rule.reference.starts_with("http") {
        return Err(ScannerError::BadScheme {
            rule: rule.name.clone(),
            url: rule.reference.clone(),
        });
    }
    Ok(())
}

/// `categories` must contain the literal `ALL`.
pub fn validate_all_in_category(rule: &Rule) -> Result<()> {
    if !rule.categories.iter().any(|c| c == ALL_CATEGORY) {
        return Err(ScannerError::MissingAllCategory {
            rule: rule.name.clone(),
        });
    }
    Ok(())
}

/// `description` must be at most [`MAX_DESCRIPTION_LEN`] characters.
pub fn validate_description_length(rule: &Rule) -> Result<()> {
    let length = rule.description.chars().count();
    if length > MAX_DESCRIPTION_LEN {
        return Err(ScannerError::DescriptionTooLong {
            rule: rule.name.clone(),
            description: rule.description.clone(),
            length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> Rule {
        Rule {
            categories: vec!["ALL".into(), "cwe-798".into()],
            description: "Hardcoded credentials".into(),
            driver: "gitleaks".into(),
            group: "Secrets".into(),
            name: name.into(),
            pretty_name: "Hardcoded secret".into(),
            reference: "https://owasp.org/Top10/A07_2021".into(),
        }
    }

    #[test]
    fn decode_preserves_document_order() {
        let doc: Value = serde_yaml::from_str(
            r#"
rules:
  zeta:
    categories: [ALL]
    description: z
    driver: d
    group: g
    name: zeta
    pretty_name: Z
    ref: https://example.com/z
  alpha:
    categories: [ALL]
    description: a
    driver: d
    group: g
    name: alpha
    pretty_name: A
    ref: https://example.com/a
"#,
        )
        .unwrap();
        let db = RulesDb::from_document(&doc).unwrap();
        let keys: Vec<&str> = db.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(db.iter().next().unwrap().1.reference, "https://example.com/z");
    }

    #[test]
    fn decode_rejects_unknown_field() {
        let doc: Value = serde_yaml::from_str(
            "rules:\n  a:\n    categories: [ALL]\n    description: a\n    driver: d\n    group: g\n    name: a\n    pretty_name: A\n    ref: http://x\n    extra: 1\n",
        )
        .unwrap();
        assert!(matches!(
            RulesDb::from_document(&doc),
            Err(ScannerError::InvalidRule { .. })
        ));
    }

    #[test]
    fn decode_without_rules_key_is_empty() {
        let doc: Value = serde_yaml::from_str("other: 1").unwrap();
        assert!(RulesDb::from_document(&doc).unwrap().is_empty());
    }

    #[test]
    fn name_must_match_key() {
        assert!(validate_rule_name("secrets", &rule("secrets")).is_ok());
        let err = validate_rule_name("secrets", &rule("secret")).unwrap_err();
        assert!(matches!(err, ScannerError::NameMismatch { .. }));
    }

    #[test]
    fn scheme_prefix_check() {
        let mut r = rule("a");
        assert!(validate_ref_scheme(&r).is_ok());

        r.reference = "http://plain.example".into();
        assert!(validate_ref_scheme(&r).is_ok());

        r.reference = "httpfoo".into();
        assert!(validate_ref_scheme(&r).is_ok(), "prefix check only");

        r.reference = "ftp://example.com".into();
        assert!(matches!(
            validate_ref_scheme(&r),
            Err(ScannerError::BadScheme { .. })
        ));

        r.reference = "example.com".into();
        let err = validate_ref_scheme(&r).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Url missing protocol: "example.com" from rule "a""#
        );
    }

    #[test]
    fn all_category_required() {
        let mut r = rule("a");
        assert!(validate_all_in_category(&r).is_ok());

        r.categories = vec!["all".into(), "cwe-1".into()];
        assert!(matches!(
            validate_all_in_category(&r),
            Err(ScannerError::MissingAllCategory { .. })
        ));

        r.categories.clear();
        assert!(validate_all_in_category(&r).is_err());
    }

    #[test]
    fn description_boundary() {
        let mut r = rule("a");
        r.description = "x".repeat(MAX_DESCRIPTION_LEN);
        assert!(validate_description_length(&r).is_ok());

        r.description.push('x');
        match validate_description_length(&r).unwrap_err() {
            ScannerError::DescriptionTooLong { length, .. } => {
                assert_eq!(length, MAX_DESCRIPTION_LEN + 1);
            }
            other => panic!("expected DescriptionTooLong, got: {other}"),
        }
    }

    #[test]
    fn description_counts_characters_not_bytes() {
        let mut r = rule("a");
        r.description = "é".repeat(MAX_DESCRIPTION_LEN);
        assert!(r.description.len() > MAX_DESCRIPTION_LEN);
        assert!(validate_description_length(&r).is_ok());
    }
}
