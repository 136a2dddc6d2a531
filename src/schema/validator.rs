//! Schema validation with aggregated, path-qualified violations.

use crate::document::{ConfigValue, ScalarOrTranslated};
use crate::error::BuildError;
use crate::schema::rules::{resume_schema, Field, Schema};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    MissingRequiredField,
    TypeMismatch,
    PatternMismatch,
    EnumViolation,
    UnknownField,
}

/// One schema violation, rendered as `<field-path>: <reason>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub path: String,
    pub reason: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// One violation per line.
pub fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of validating a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Every violation found, in document order
    pub errors: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no violation was found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check for a violation of a given kind at an exact path.
    pub fn has(&self, kind: ViolationKind, path: &str) -> bool {
        self.errors
            .iter()
            .any(|violation| violation.kind == kind && violation.path == path)
    }
}

/// Validate a document against the résumé schema.
pub fn validate(document: &ConfigValue) -> ValidationReport {
    let mut walker = Walker::default();
    walker.check(resume_schema(), document, "");
    ValidationReport {
        errors: walker.violations,
    }
}

/// Validate and turn any violation into `BuildError::SchemaValidation`.
pub fn validate_and_throw(document: &ConfigValue) -> Result<(), BuildError> {
    let report = validate(document);
    if report.is_valid() {
        Ok(())
    } else {
        Err(BuildError::SchemaValidation(report.errors))
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}

#[derive(Default)]
struct Walker {
    violations: Vec<Violation>,
}

impl Walker {
    fn report(&mut self, kind: ViolationKind, path: &str, reason: impl Into<String>) {
        self.violations
            .push(Violation::new(kind, display_path(path), reason));
    }

    fn type_mismatch(&mut self, path: &str, expected: &str, value: &ConfigValue) {
        self.report(
            ViolationKind::TypeMismatch,
            path,
            format!("expected {}, found {}", expected, value.kind()),
        );
    }

    fn check(&mut self, schema: &Schema, value: &ConfigValue, path: &str) {
        match schema {
            Schema::Text { non_empty } => self.check_text(value, path, *non_empty),
            Schema::PlainText { non_empty } => match value.as_str() {
                Some(text) => {
                    if *non_empty && text.trim().is_empty() {
                        self.report(ViolationKind::PatternMismatch, path, "must not be empty");
                    }
                }
                None => self.type_mismatch(path, "a string", value),
            },
            Schema::StringOrNumber => match value {
                ConfigValue::Number(_) => {}
                _ if value.as_str().is_some() => {}
                _ => self.type_mismatch(path, "a string or a number", value),
            },
            Schema::Boolean => {
                if value.as_bool().is_none() {
                    self.type_mismatch(path, "a boolean", value);
                }
            }
            Schema::Formatted(format) => match value.as_str() {
                Some(text) if format.matches(text) => {}
                Some(_) => self.report(ViolationKind::PatternMismatch, path, format.reason()),
                None => self.type_mismatch(path, "a string", value),
            },
            Schema::Enum(allowed) => match value.as_str() {
                Some(text) if allowed.contains(&text) => {}
                Some(_) => self.report(
                    ViolationKind::EnumViolation,
                    path,
                    format!("must be one of: {}", allowed.join(", ")),
                ),
                None => self.type_mismatch(path, "a string", value),
            },
            Schema::Nullable(inner) => {
                if !matches!(value, ConfigValue::Null) {
                    self.check(inner, value, path);
                }
            }
            Schema::Array { items, unique } => self.check_array(items, *unique, value, path),
            Schema::Object(fields) => self.check_object(fields, value, path),
        }
    }

    fn check_text(&mut self, value: &ConfigValue, path: &str, non_empty: bool) {
        match value.as_text() {
            Some(ScalarOrTranslated::Scalar(text)) => {
                if non_empty && text.trim().is_empty() {
                    self.report(ViolationKind::PatternMismatch, path, "must not be empty");
                }
            }
            Some(ScalarOrTranslated::Translated(translations)) => {
                if non_empty {
                    for (code, text) in translations.iter() {
                        if text.trim().is_empty() {
                            self.report(
                                ViolationKind::PatternMismatch,
                                &child_path(path, code.as_str()),
                                "must not be empty",
                            );
                        }
                    }
                }
            }
            None => self.type_mismatch(
                path,
                "a string or a map of two-letter language codes to strings",
                value,
            ),
        }
    }

    fn check_array(&mut self, items: &Schema, unique: bool, value: &ConfigValue, path: &str) {
        let Some(elements) = value.as_sequence() else {
            self.type_mismatch(path, "a list", value);
            return;
        };

        let mut seen = HashSet::new();
        for (index, element) in elements.iter().enumerate() {
            let element_path = index_path(path, index);
            self.check(items, element, &element_path);
            if unique {
                if let Some(text) = element.as_str() {
                    if !seen.insert(text) {
                        self.report(
                            ViolationKind::PatternMismatch,
                            &element_path,
                            format!("duplicate entry \"{}\"", text),
                        );
                    }
                }
            }
        }
    }

    fn check_object(&mut self, fields: &[Field], value: &ConfigValue, path: &str) {
        let Some(mapping) = value.as_mapping() else {
            self.type_mismatch(path, "a map", value);
            return;
        };

        for field in fields {
            let field_path = child_path(path, field.name);
            match mapping.get(field.name) {
                Some(field_value) => self.check(&field.schema, field_value, &field_path),
                None if field.required => self.report(
                    ViolationKind::MissingRequiredField,
                    &field_path,
                    "missing required field",
                ),
                None => {}
            }
        }

        for (key, _) in mapping.iter() {
            if !fields.iter().any(|field| field.name == key) {
                self.report(
                    ViolationKind::UnknownField,
                    &child_path(path, key),
                    "unknown field is not allowed",
                );
            }
        }
    }
}
