//! Build error taxonomy.
//!
//! `BuildError` variants are fatal: they abort the build and surface as a
//! single message. `BuildWarning` variants are reported and collected, but
//! the build still succeeds.

use crate::i18n::{join_codes, LanguageCode};
use crate::schema::{format_violations, Violation};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid YAML syntax in {file}: {message}")]
    ConfigParse { file: String, message: String },

    #[error("Configuration validation failed:\n{}", format_violations(.0))]
    SchemaValidation(Vec<Violation>),

    #[error("Theme \"{name}\" not found. Available themes: {}", .available.join(", "))]
    ThemeNotFound { name: String, available: Vec<String> },

    #[error("Invalid theme configuration for \"{name}\": {reason}")]
    ThemeConfigInvalid { name: String, reason: String },

    #[error(
        "Configured language(s) not available in theme or locales: {}. Available: {}",
        join_codes(.requested),
        join_codes(.available)
    )]
    UnavailableLanguage {
        requested: Vec<LanguageCode>,
        available: Vec<LanguageCode>,
    },

    #[error(
        "Default language \"{language}\" not found in available languages: {}",
        join_codes(.available)
    )]
    UnknownDefaultLanguage {
        language: LanguageCode,
        available: Vec<LanguageCode>,
    },

    #[error("Failed to load template \"{template}\": {reason}")]
    TemplateLoad { template: String, reason: String },

    #[error("Failed to render {language} page: {reason}")]
    Render {
        language: LanguageCode,
        reason: String,
    },

    #[error("CSS processing failed: {0}")]
    CssProcessing(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Problems that are reported but do not fail the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildWarning {
    #[error("Could not copy asset {}: {reason}", .path.display())]
    AssetCopy { path: PathBuf, reason: String },

    #[error("Could not copy profile photo \"{photo}\": {reason}")]
    PhotoCopy { photo: String, reason: String },

    #[error("Could not copy configuration file: {reason}")]
    ConfigCopy { reason: String },

    #[error("Could not generate build summary: {reason}")]
    Summary { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ViolationKind;

    fn code(c: &str) -> LanguageCode {
        LanguageCode::from_code(c).unwrap()
    }

    #[test]
    fn test_schema_error_lists_every_violation() {
        let err = BuildError::SchemaValidation(vec![
            Violation::new(ViolationKind::MissingRequiredField, "profile.name", "missing required field"),
            Violation::new(ViolationKind::UnknownField, "profile.nickname", "unknown field is not allowed"),
        ]);
        let message = err.to_string();
        assert!(message.starts_with("Configuration validation failed:\n"));
        assert!(message.contains("profile.name: missing required field"));
        assert!(message.contains("profile.nickname: unknown field is not allowed"));
    }

    #[test]
    fn test_unavailable_language_names_offenders_and_available() {
        let err = BuildError::UnavailableLanguage {
            requested: vec![code("de")],
            available: vec![code("en"), code("fr")],
        };
        let message = err.to_string();
        assert!(message.contains("de"));
        assert!(message.contains("Available: en, fr"));
    }

    #[test]
    fn test_theme_not_found_lists_themes() {
        let err = BuildError::ThemeNotFound {
            name: "missing".to_string(),
            available: vec!["classic".to_string(), "modern".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Theme \"missing\" not found. Available themes: classic, modern"
        );
    }

    #[test]
    fn test_warning_messages() {
        let warning = BuildWarning::PhotoCopy {
            photo: "me.jpg".to_string(),
            reason: "No such file".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Could not copy profile photo \"me.jpg\": No such file"
        );
    }
}
