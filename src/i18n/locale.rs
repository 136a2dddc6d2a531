//! Locale bundles: UI labels for one language.
//!
//! A theme ships default bundles under `<theme>/locales/<lang>/content.yaml`
//! and the user may override any key from
//! `<config-dir>/locales/<lang>/content.yaml`.

use crate::error::BuildError;
use crate::i18n::LanguageCode;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCALES_DIR: &str = "locales";
pub const BUNDLE_FILE: &str = "content.yaml";

/// One value of a locale bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocaleEntry {
    Text(String),
    List(Vec<String>),
    Nested(LocaleBundle),
}

/// Nested mapping of label keys for one language.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct LocaleBundle {
    entries: BTreeMap<String, LocaleEntry>,
}

impl LocaleBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse bundle YAML. An empty document is an empty bundle.
    pub fn from_yaml_str(source: &str) -> Result<Self, String> {
        let value: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
        Self::from_yaml(value)
    }

    /// Convert a parsed YAML value. Numbers and booleans become text.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, String> {
        use serde_yaml::Value;

        let map = match value {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(map) => map,
            Value::Tagged(tagged) => return Self::from_yaml(tagged.value),
            other => {
                return Err(format!(
                    "expected a mapping at the top of the bundle, found {}",
                    yaml_kind(&other)
                ))
            }
        };

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            let key = scalar_text(&key).ok_or_else(|| format!("unsupported key: {:?}", key))?;
            let entry = entry_from_yaml(value).map_err(|reason| format!("{}: {}", key, reason))?;
            entries.insert(key, entry);
        }
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: LocaleEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Look up a dotted key (`sections.experience`).
    pub fn get(&self, key: &str) -> Option<&LocaleEntry> {
        let mut parts = key.split('.');
        let mut current = self.entries.get(parts.next()?)?;
        for part in parts {
            match current {
                LocaleEntry::Nested(bundle) => current = bundle.entries.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Text at a dotted key, if that key holds text.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            LocaleEntry::Text(text) => Some(text),
            _ => None,
        }
    }

    /// List at a dotted key, if that key holds a list.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.get(key)? {
            LocaleEntry::List(items) => Some(items),
            _ => None,
        }
    }

    /// Overlay `overrides` on this bundle.
    ///
    /// Keys from `overrides` win. When both sides hold nested bundles the
    /// merge recurses; any other pair is replaced whole.
    pub fn merge(mut self, overrides: LocaleBundle) -> LocaleBundle {
        for (key, entry) in overrides.entries {
            let merged = match (self.entries.remove(&key), entry) {
                (Some(LocaleEntry::Nested(base)), LocaleEntry::Nested(over)) => {
                    LocaleEntry::Nested(base.merge(over))
                }
                (_, over) => over,
            };
            self.entries.insert(key, merged);
        }
        self
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a map",
        Value::Tagged(_) => "a tagged value",
    }
}

fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn entry_from_yaml(value: serde_yaml::Value) -> Result<LocaleEntry, String> {
    use serde_yaml::Value;

    match value {
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                scalar_text(item)
                    .ok_or_else(|| format!("list items must be text, found {}", yaml_kind(item)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(LocaleEntry::List),
        Value::Mapping(_) => LocaleBundle::from_yaml(value).map(LocaleEntry::Nested),
        Value::Tagged(tagged) => entry_from_yaml(tagged.value),
        Value::Null => Ok(LocaleEntry::Text(String::new())),
        other => scalar_text(&other)
            .map(LocaleEntry::Text)
            .ok_or_else(|| format!("unsupported value: {}", yaml_kind(&other))),
    }
}

/// Path of a language's bundle under `base`.
pub fn bundle_path(base: &Path, language: &LanguageCode) -> PathBuf {
    base.join(LOCALES_DIR).join(language.as_str()).join(BUNDLE_FILE)
}

/// Load `<base>/locales/<lang>/content.yaml`.
///
/// A missing file is `Ok(None)`; an unreadable or malformed one is an error.
pub async fn load_bundle(
    base: &Path,
    language: &LanguageCode,
) -> Result<Option<LocaleBundle>, BuildError> {
    let path = bundle_path(base, language);
    let source = match tokio::fs::read_to_string(&path).await {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No locale bundle at {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(BuildError::ConfigParse {
                file: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };

    let bundle = LocaleBundle::from_yaml_str(&source).map_err(|message| BuildError::ConfigParse {
        file: path.display().to_string(),
        message,
    })?;
    debug!("Loaded locale bundle {} ({} keys)", path.display(), bundle.len());
    Ok(Some(bundle))
}

/// Theme defaults overlaid with user overrides for one language.
pub async fn merge_locales(
    theme_base: &Path,
    user_base: &Path,
    language: &LanguageCode,
) -> Result<Option<LocaleBundle>, BuildError> {
    let theme = load_bundle(theme_base, language).await?;
    let user = load_bundle(user_base, language).await?;

    Ok(match (theme, user) {
        (None, None) => None,
        (Some(bundle), None) | (None, Some(bundle)) => Some(bundle),
        (Some(theme), Some(user)) => Some(theme.merge(user)),
    })
}

/// Languages with a directory under `<base>/locales`.
///
/// A missing `locales` directory yields an empty set. Directory names that
/// are not two-letter codes are ignored.
pub async fn available_languages(base: &Path) -> Result<BTreeSet<LanguageCode>, BuildError> {
    let root = base.join(LOCALES_DIR);
    let mut languages = BTreeSet::new();

    let mut entries = match tokio::fs::read_dir(&root).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(languages),
        Err(e) => return Err(BuildError::io(root, e)),
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| BuildError::io(&root, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| BuildError::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match LanguageCode::from_code(&name) {
            Ok(code) => {
                languages.insert(code);
            }
            Err(_) => debug!("Ignoring locale directory {}", entry.path().display()),
        }
    }

    Ok(languages)
}

/// Sorted union of the theme's and the user's locale languages.
pub async fn all_available_languages(
    theme_base: &Path,
    user_base: &Path,
) -> Result<BTreeSet<LanguageCode>, BuildError> {
    let mut languages = available_languages(theme_base).await?;
    languages.extend(available_languages(user_base).await?);
    Ok(languages)
}
