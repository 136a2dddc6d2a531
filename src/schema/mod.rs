//! Validation of the résumé configuration document.
//!
//! - `rules`: the closed schema, declared as data
//! - `validator`: walks a `ConfigValue` against the rules and aggregates
//!   every violation with its field path

pub mod rules;
mod validator;

pub use rules::{resume_schema, Format, Schema, PROFICIENCY_LEVELS};
pub use validator::{
    format_violations, validate, validate_and_throw, ValidationReport, Violation, ViolationKind,
};
