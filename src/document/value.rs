//! The configuration tree.
//!
//! Raw YAML is converted once into `ConfigValue`. At that point every
//! string-like leaf becomes a `ScalarOrTranslated`: either a plain string or
//! a per-language map. Later stages match on the variant instead of
//! re-inspecting key shapes.

use crate::i18n::{is_translatable, LanguageCode};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Ordered, non-empty map from language code to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    entries: Vec<(LanguageCode, String)>,
}

impl Translations {
    /// Build from entries in declaration order.
    ///
    /// Returns `None` when `entries` is empty or names a language twice.
    pub fn new(entries: Vec<(LanguageCode, String)>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        for (i, (code, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(seen, _)| seen == code) {
                return None;
            }
        }
        Some(Self { entries })
    }

    /// Text for an exact language code.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(lang, _)| lang.as_str() == code)
            .map(|(_, text)| text.as_str())
    }

    /// First declared entry.
    pub fn first(&self) -> (&LanguageCode, &str) {
        let (code, text) = &self.entries[0];
        (code, text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageCode, &str)> {
        self.entries.iter().map(|(code, text)| (code, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A text leaf: plain, or one string per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarOrTranslated {
    Scalar(String),
    Translated(Translations),
}

impl ScalarOrTranslated {
    /// The plain string, if this is not a per-language map.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ScalarOrTranslated::Scalar(text) => Some(text),
            ScalarOrTranslated::Translated(_) => None,
        }
    }
}

/// Insertion-ordered string-keyed map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(String, ConfigValue)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Insert or replace, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ConfigValue)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

/// A node of the configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    Text(ScalarOrTranslated),
    Sequence(Vec<ConfigValue>),
    Mapping(Mapping),
}

impl ConfigValue {
    /// Convenience constructor for a plain text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        ConfigValue::Text(ScalarOrTranslated::Scalar(value.into()))
    }

    /// Convert a parsed YAML value, tagging per-language maps.
    ///
    /// A map is tagged as translated only when its keys are language codes
    /// and every value is a string; any other map stays a `Mapping` so the
    /// schema can report it precisely.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, String> {
        use serde_yaml::Value;

        if is_translatable(&value) {
            if let Some(translations) = translations_from_yaml(&value) {
                return Ok(ConfigValue::Text(ScalarOrTranslated::Translated(
                    translations,
                )));
            }
        }

        Ok(match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(flag) => ConfigValue::Bool(flag),
            Value::Number(number) => ConfigValue::Number(number),
            Value::String(text) => ConfigValue::text(text),
            Value::Sequence(items) => ConfigValue::Sequence(
                items
                    .into_iter()
                    .map(ConfigValue::from_yaml)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut mapping = Mapping::new();
                for (key, value) in map {
                    mapping.insert(key_to_string(&key)?, ConfigValue::from_yaml(value)?);
                }
                ConfigValue::Mapping(mapping)
            }
            Value::Tagged(tagged) => ConfigValue::from_yaml(tagged.value)?,
        })
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigValue::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            ConfigValue::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&ScalarOrTranslated> {
        match self {
            ConfigValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Plain string content; `None` for per-language maps and non-text.
    pub fn as_str(&self) -> Option<&str> {
        self.as_text().and_then(ScalarOrTranslated::as_scalar)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Look up a key when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|mapping| mapping.get(key))
    }

    /// Short description of the node kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "a boolean",
            ConfigValue::Number(_) => "a number",
            ConfigValue::Text(ScalarOrTranslated::Scalar(_)) => "a string",
            ConfigValue::Text(ScalarOrTranslated::Translated(_)) => "a per-language map",
            ConfigValue::Sequence(_) => "a list",
            ConfigValue::Mapping(_) => "a map",
        }
    }
}

fn key_to_string(key: &serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value;

    match key {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(format!("unsupported mapping key: {:?}", other)),
    }
}

fn translations_from_yaml(value: &serde_yaml::Value) -> Option<Translations> {
    let map = value.as_mapping()?;
    let mut entries = Vec::with_capacity(map.len());
    for (key, text) in map {
        let code = LanguageCode::from_code(key.as_str()?).ok()?;
        entries.push((code, text.as_str()?.to_string()));
    }
    Translations::new(entries)
}

impl Serialize for Translations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, text) in &self.entries {
            map.serialize_entry(code.as_str(), text)?;
        }
        map.end()
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(flag) => serializer.serialize_bool(*flag),
            ConfigValue::Number(number) => number.serialize(serializer),
            ConfigValue::Text(ScalarOrTranslated::Scalar(text)) => serializer.serialize_str(text),
            ConfigValue::Text(ScalarOrTranslated::Translated(translations)) => {
                translations.serialize(serializer)
            }
            ConfigValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigValue::Mapping(mapping) => mapping.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ConfigValue {
        ConfigValue::from_yaml(serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn test_plain_string_becomes_scalar_text() {
        let value = parse("hello");
        assert_eq!(value.as_str(), Some("hello"));
    }

    #[test]
    fn test_language_map_becomes_translated() {
        let value = parse("{en: Engineer, fr: Ingénieur}");
        match value {
            ConfigValue::Text(ScalarOrTranslated::Translated(t)) => {
                assert_eq!(t.len(), 2);
                assert_eq!(t.get("fr"), Some("Ingénieur"));
                assert_eq!(t.first().0.as_str(), "en");
            }
            other => panic!("expected translated text, got {:?}", other),
        }
    }

    #[test]
    fn test_translated_preserves_declaration_order() {
        let value = parse("{fr: Bonjour, en: Hello, es: Hola}");
        let text = value.as_text().unwrap();
        let ScalarOrTranslated::Translated(t) = text else {
            panic!("expected translated text");
        };
        let codes: Vec<_> = t.iter().map(|(code, _)| code.as_str()).collect();
        assert_eq!(codes, vec!["fr", "en", "es"]);
    }

    #[test]
    fn test_language_keys_with_non_string_value_stay_mapping() {
        let value = parse("{en: 3, fr: trois}");
        assert!(value.as_mapping().is_some());
    }

    #[test]
    fn test_regular_section_stays_mapping() {
        let value = parse("{name: John, email: john@example.com}");
        let mapping = value.as_mapping().unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("name").and_then(ConfigValue::as_str), Some("John"));
    }

    #[test]
    fn test_empty_map_stays_mapping() {
        let value = parse("{}");
        assert!(value.as_mapping().unwrap().is_empty());
    }

    #[test]
    fn test_numeric_keys_are_stringified() {
        let value = parse("{2020: launch}");
        assert!(value.get("2020").is_some());
    }

    #[test]
    fn test_translations_reject_empty_and_duplicates() {
        let en = LanguageCode::from_code("en").unwrap();
        assert!(Translations::new(vec![]).is_none());
        assert!(Translations::new(vec![
            (en.clone(), "a".to_string()),
            (en, "b".to_string())
        ])
        .is_none());
    }

    #[test]
    fn test_mapping_insert_replaces_in_place() {
        let mut mapping = Mapping::new();
        mapping.insert("a", ConfigValue::text("1"));
        mapping.insert("b", ConfigValue::text("2"));
        mapping.insert("a", ConfigValue::text("3"));

        let keys: Vec<_> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(mapping.get("a").and_then(ConfigValue::as_str), Some("3"));
    }

    #[test]
    fn test_serializes_to_json_shape() {
        let value = parse("{profile: {name: {en: John, fr: Jean}}, tags: [a, 1, true, null]}");
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["profile"]["name"]["fr"], "Jean");
        assert_eq!(json["tags"][1], 1);
        assert_eq!(json["tags"][2], true);
        assert!(json["tags"][3].is_null());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(parse("1").kind(), "a number");
        assert_eq!(parse("[1]").kind(), "a list");
        assert_eq!(parse("{en: x}").kind(), "a per-language map");
    }
}
