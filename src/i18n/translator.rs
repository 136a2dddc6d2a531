//! Resolution of per-language values.

use crate::document::{ConfigValue, Mapping, ScalarOrTranslated};
use crate::i18n::LanguageCode;

/// Language used when neither the target nor the configured fallback has a
/// translation.
pub const DEFAULT_FALLBACK: &str = "en";

/// Check whether a raw YAML value has the shape of a per-language map.
///
/// True when the value is a mapping with at least one key and every key is a
/// two-letter lowercase language code. Values are not inspected here.
pub fn is_translatable(value: &serde_yaml::Value) -> bool {
    let Some(map) = value.as_mapping() else {
        return false;
    };

    !map.is_empty()
        && map.keys().all(|key| {
            key.as_str()
                .map(LanguageCode::is_valid)
                .unwrap_or(false)
        })
}

/// Pick the text for `target`, then `fallback`, then the first declared
/// entry. Plain strings are returned as-is.
pub fn resolve<'a>(value: &'a ScalarOrTranslated, target: &str, fallback: &str) -> &'a str {
    match value {
        ScalarOrTranslated::Scalar(text) => text,
        ScalarOrTranslated::Translated(translations) => translations
            .get(target)
            .or_else(|| translations.get(fallback))
            .unwrap_or_else(|| translations.first().1),
    }
}

/// Resolve every translatable value in a tree for one language.
///
/// Returns an independent copy; the input is left untouched.
pub fn resolve_deep(value: &ConfigValue, target: &str, fallback: &str) -> ConfigValue {
    match value {
        ConfigValue::Text(text) => ConfigValue::text(resolve(text, target, fallback)),
        ConfigValue::Sequence(items) => ConfigValue::Sequence(
            items
                .iter()
                .map(|item| resolve_deep(item, target, fallback))
                .collect(),
        ),
        ConfigValue::Mapping(mapping) => ConfigValue::Mapping(
            mapping
                .iter()
                .map(|(key, item)| (key.to_string(), resolve_deep(item, target, fallback)))
                .collect::<Mapping>(),
        ),
        other => other.clone(),
    }
}
