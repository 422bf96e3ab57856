//! Server-declared request schemas and completeness checks.
//!
//! The payments API describes, per country (or currency pair), entity type
//! and payment method, which request paths are required and which patterns
//! their values must satisfy. Schemas are fetched fresh for each `--validate`
//! run and never cached.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::field_registry::FlagRegistry;
use crate::request_error::RequestError;
use crate::request_tree::FlatFieldMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub rule: FieldRule,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Field {
    /// The provided value for this field, looked up by path and then by key.
    pub fn provided_value<'a>(&self, provided: &'a FlatFieldMap) -> Option<&'a str> {
        let by_path = if self.path.is_empty() {
            None
        } else {
            provided.get(&self.path)
        };
        by_path
            .filter(|v| !v.is_empty())
            .or_else(|| provided.get(&self.key).filter(|v| !v.is_empty()))
    }

    fn location(&self) -> &str {
        if self.path.is_empty() {
            &self.key
        } else {
            &self.path
        }
    }
}

/// A provided value the schema rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub path: String,
    pub value: String,
    pub reason: String,
}

/// Everything the schema found wrong with a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaReport<'a> {
    pub missing: Vec<&'a Field>,
    pub mismatches: Vec<FieldMismatch>,
}

impl SchemaReport<'_> {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.mismatches.is_empty()
    }

    /// Fold the report into a single error listing every problem.
    pub fn into_result(self, registry: &FlagRegistry) -> Result<(), RequestError> {
        if self.is_ok() {
            return Ok(());
        }
        let mut problems = Vec::new();
        if !self.missing.is_empty() {
            problems.push(format_missing_fields(&self.missing, registry));
        }
        for mismatch in &self.mismatches {
            problems.push(format!(
                "  - {} = '{}': {}",
                flag_label(&mismatch.path, registry),
                mismatch.value,
                mismatch.reason
            ));
        }
        Err(RequestError::SchemaValidation { problems })
    }
}

/// Check `provided` against every field of `schema`.
pub fn validate<'a>(schema: &'a Schema, provided: &FlatFieldMap) -> SchemaReport<'a> {
    let mut report = SchemaReport::default();

    for field in &schema.fields {
        let value = field.provided_value(provided);

        let value = match value {
            Some(value) => value,
            None => {
                if field.required {
                    debug!("Required field missing: {}", field.location());
                    report.missing.push(field);
                }
                continue;
            }
        };

        if let Some(pattern) = field.rule.pattern.as_deref().filter(|p| !p.is_empty()) {
            match validate_pattern(value, pattern) {
                Ok(true) => {}
                Ok(false) => report.mismatches.push(FieldMismatch {
                    path: field.location().to_string(),
                    value: value.to_string(),
                    reason: format!("does not match pattern {}", pattern),
                }),
                Err(e) => {
                    warn!("Schema pattern for {} does not compile: {}", field.location(), e);
                    report.mismatches.push(FieldMismatch {
                        path: field.location().to_string(),
                        value: value.to_string(),
                        reason: format!("schema pattern {} is invalid", pattern),
                    });
                }
            }
        }

        if let Some(allowed) = field.enum_values.as_ref().filter(|a| !a.is_empty()) {
            if !allowed.iter().any(|a| a == value) {
                report.mismatches.push(FieldMismatch {
                    path: field.location().to_string(),
                    value: value.to_string(),
                    reason: format!("must be one of {}", allowed.join(", ")),
                });
            }
        }
    }

    report
}

/// True when `pattern` matches the whole of `value`.
pub fn validate_pattern(value: &str, pattern: &str) -> Result<bool, regex::Error> {
    let anchored = Regex::new(&format!("^(?:{})$", pattern))?;
    Ok(anchored.is_match(value))
}

/// Render missing fields, naming each by its flag where one exists.
pub fn format_missing_fields(missing: &[&Field], registry: &FlagRegistry) -> String {
    let lines: Vec<String> = missing
        .iter()
        .map(|field| format!("  - {}", flag_label(field.location(), registry)))
        .collect();
    format!("missing required fields:\n{}", lines.join("\n"))
}

fn flag_label(path: &str, registry: &FlagRegistry) -> String {
    match registry.flag_for_path(path) {
        Some(mapping) => format!("--{} ({})", mapping.flag_name, path),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(path: &str) -> Field {
        Field {
            key: path.rsplit('.').next().unwrap().to_string(),
            path: path.to_string(),
            required: true,
            ..Default::default()
        }
    }

    fn provided(pairs: &[(&str, &str)]) -> FlatFieldMap {
        pairs.iter().map(|(p, v)| (*p, *v)).collect()
    }

    #[test]
    fn test_missing_iff_required_absent() {
        let schema = Schema {
            fields: vec![
                required("beneficiary.bank_details.account_name"),
                required("beneficiary.bank_details.account_routing_value1"),
                Field {
                    key: "nickname".to_string(),
                    path: "nickname".to_string(),
                    ..Default::default()
                },
            ],
        };

        let report = validate(&schema, &provided(&[]));
        assert_eq!(report.missing.len(), 2);

        let report = validate(
            &schema,
            &provided(&[
                ("beneficiary.bank_details.account_name", "John Doe"),
                ("beneficiary.bank_details.account_routing_value1", ""),
            ]),
        );
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].path, "beneficiary.bank_details.account_routing_value1");

        let report = validate(
            &schema,
            &provided(&[
                ("beneficiary.bank_details.account_name", "John Doe"),
                ("beneficiary.bank_details.account_routing_value1", "001"),
            ]),
        );
        assert!(report.is_ok());
    }

    #[test]
    fn test_key_fallback() {
        let schema = Schema {
            fields: vec![required("beneficiary.bank_details.account_name")],
        };
        let report = validate(&schema, &provided(&[("account_name", "John Doe")]));
        assert!(report.is_ok());
    }

    #[test]
    fn test_pattern_is_full_match() {
        assert!(validate_pattern("123456", r"\d{6}").unwrap());
        assert!(!validate_pattern("1234567", r"\d{6}").unwrap());
        assert!(!validate_pattern("a123456", r"\d{6}").unwrap());
        assert!(validate_pattern("AB", "A|AB").unwrap());
        assert!(validate_pattern("x", "(").is_err());
    }

    #[test]
    fn test_pattern_and_enum_mismatches() {
        let schema = Schema {
            fields: vec![
                Field {
                    key: "sort_code".to_string(),
                    path: "beneficiary.bank_details.account_routing_value1".to_string(),
                    required: true,
                    rule: FieldRule {
                        pattern: Some(r"\d{6}".to_string()),
                    },
                    enum_values: None,
                },
                Field {
                    key: "entity_type".to_string(),
                    path: "beneficiary.entity_type".to_string(),
                    required: true,
                    rule: FieldRule::default(),
                    enum_values: Some(vec!["COMPANY".to_string(), "PERSONAL".to_string()]),
                },
            ],
        };
        let report = validate(
            &schema,
            &provided(&[
                ("beneficiary.bank_details.account_routing_value1", "12345"),
                ("beneficiary.entity_type", "TRUST"),
            ]),
        );
        assert!(report.missing.is_empty());
        assert_eq!(report.mismatches.len(), 2);
    }

    #[test]
    fn test_format_missing_fields_uses_flag_names() {
        let registry = FlagRegistry::beneficiary();
        let account_name = required("beneficiary.bank_details.account_name");
        let slot = required("beneficiary.bank_details.account_routing_value1");
        let rendered = format_missing_fields(&[&account_name, &slot], &registry);
        assert!(rendered.contains("--account-name (beneficiary.bank_details.account_name)"));
        assert!(rendered.contains("  - beneficiary.bank_details.account_routing_value1"));
    }

    #[test]
    fn test_report_lists_every_problem() {
        let registry = FlagRegistry::beneficiary();
        let schema = Schema {
            fields: vec![
                required("beneficiary.bank_details.account_name"),
                required("beneficiary.first_name"),
            ],
        };
        let err = validate(&schema, &provided(&[])).into_result(&registry).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("--account-name"));
        assert!(message.contains("--first-name"));
    }

    #[test]
    fn test_schema_deserializes_enum_key() {
        let schema: Schema = serde_json::from_str(
            r#"{"fields":[{"key":"entity_type","path":"beneficiary.entity_type","required":true,
                "rule":{"pattern":"^(COMPANY|PERSONAL)$"},"enum":["COMPANY","PERSONAL"]}]}"#,
        )
        .unwrap();
        assert_eq!(schema.fields[0].enum_values.as_ref().unwrap().len(), 2);
        assert_eq!(schema.fields[0].rule.pattern.as_deref(), Some("^(COMPANY|PERSONAL)$"));
    }
}
