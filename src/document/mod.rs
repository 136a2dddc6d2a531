//! Loading the résumé configuration document.

mod value;

pub use value::{ConfigValue, Mapping, ScalarOrTranslated, Translations};

use crate::error::BuildError;
use crate::i18n::{resolve, LanguageCode};
use crate::schema::validate_and_throw;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sections that hold lists, in display order.
pub const LIST_SECTIONS: [&str; 6] = [
    "experience",
    "education",
    "skills",
    "languages",
    "hobbies",
    "social",
];

/// Read and parse a YAML document into a `ConfigValue` tree.
///
/// The root must be a mapping.
pub async fn load_document(path: &Path) -> Result<ConfigValue, BuildError> {
    let source = match tokio::fs::read_to_string(path).await {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BuildError::ConfigNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(BuildError::io(path, e)),
    };

    parse_document(&source, path)
}

fn parse_document(source: &str, path: &Path) -> Result<ConfigValue, BuildError> {
    let parse_error = |message: String| BuildError::ConfigParse {
        file: path.display().to_string(),
        message,
    };

    let raw: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| parse_error(e.to_string()))?;
    let document = ConfigValue::from_yaml(raw).map_err(parse_error)?;
    if document.as_mapping().is_none() {
        return Err(parse_error(format!(
            "the document root must be a map, found {}",
            document.kind()
        )));
    }
    Ok(document)
}

/// Options from the `site` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteOptions {
    pub default_language: Option<LanguageCode>,
    /// Explicit allow-list of languages to build
    pub languages: Option<Vec<LanguageCode>>,
    pub effects: bool,
}

impl SiteOptions {
    fn from_document(document: &ConfigValue) -> Self {
        let Some(site) = document.get("site") else {
            return Self::default();
        };

        Self {
            default_language: site
                .get("defaultLanguage")
                .and_then(ConfigValue::as_str)
                .and_then(|code| LanguageCode::from_code(code).ok()),
            languages: site
                .get("languages")
                .and_then(ConfigValue::as_sequence)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(ConfigValue::as_str)
                        .filter_map(|code| LanguageCode::from_code(code).ok())
                        .collect()
                }),
            effects: site
                .get("effects")
                .and_then(ConfigValue::as_bool)
                .unwrap_or(false),
        }
    }
}

/// A loaded and validated configuration document.
#[derive(Debug, Clone)]
pub struct ResumeConfig {
    source: PathBuf,
    document: ConfigValue,
    site: SiteOptions,
}

impl ResumeConfig {
    /// Load, parse and validate a configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let path = path.as_ref();
        let document = load_document(path).await?;
        let config = Self::from_document(path, document)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate an already parsed document.
    pub fn from_document(source: impl Into<PathBuf>, document: ConfigValue) -> Result<Self, BuildError> {
        validate_and_throw(&document)?;
        let site = SiteOptions::from_document(&document);
        Ok(Self {
            source: source.into(),
            document,
            site,
        })
    }

    pub fn document(&self) -> &ConfigValue {
        &self.document
    }

    pub fn source_path(&self) -> &Path {
        &self.source
    }

    /// Directory holding the configuration file; user locales live here.
    pub fn config_dir(&self) -> PathBuf {
        match self.source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn site(&self) -> &SiteOptions {
        &self.site
    }

    /// `profile.name` resolved for a language.
    pub fn profile_name(&self, language: &str, fallback: &str) -> Option<String> {
        self.document
            .get("profile")?
            .get("name")?
            .as_text()
            .map(|name| resolve(name, language, fallback).to_string())
    }

    /// `profile.photo`, when set and non-empty.
    pub fn photo(&self) -> Option<&str> {
        self.document
            .get("profile")?
            .get("photo")?
            .as_str()
            .filter(|photo| !photo.trim().is_empty())
    }

    /// Entry counts for each list section present in the document.
    pub fn describe_sections(&self) -> Vec<(&'static str, usize)> {
        LIST_SECTIONS
            .iter()
            .filter_map(|section| {
                self.document
                    .get(section)
                    .and_then(ConfigValue::as_sequence)
                    .map(|items| (*section, items.len()))
            })
            .collect()
    }
}
