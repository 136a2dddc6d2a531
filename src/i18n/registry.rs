//! Language registry: display metadata for well-known languages.
//!
//! The build accepts any well-formed language code; this registry only
//! supplies human-facing names (for the language selector, the language
//! switcher links and the build summary) and per-language selector strings.
//! It is immutable static data, initialised once on first access.

use crate::i18n::strings::{
    SelectorStrings, ENGLISH_STRINGS, FRENCH_STRINGS, GERMAN_STRINGS, SPANISH_STRINGS,
};
use std::sync::OnceLock;

/// Code of the language every other one falls back to.
pub const CANONICAL_CODE: &str = "en";

/// Display metadata for one language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    pub code: &'static str,
    /// English name, e.g. "French"
    pub name: &'static str,
    /// Name in the language itself, e.g. "Français"
    pub native_name: &'static str,
    pub strings: Option<&'static SelectorStrings>,
}

impl LanguageConfig {
    pub fn is_canonical(&self) -> bool {
        self.code == CANONICAL_CODE
    }
}

pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    canonical: LanguageConfig,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: known_languages(),
            canonical: entry(CANONICAL_CODE, "English", "English", Some(&ENGLISH_STRINGS)),
        })
    }

    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    pub fn canonical(&self) -> &LanguageConfig {
        &self.canonical
    }

    /// Selector strings for a code; languages without their own use the
    /// canonical ones.
    pub fn selector_strings(&self, code: &str) -> &'static SelectorStrings {
        self.get_by_code(code)
            .and_then(|lang| lang.strings)
            .unwrap_or(&ENGLISH_STRINGS)
    }
}

fn entry(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    strings: Option<&'static SelectorStrings>,
) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
        strings,
    }
}

fn known_languages() -> Vec<LanguageConfig> {
    vec![
        entry("en", "English", "English", Some(&ENGLISH_STRINGS)),
        entry("fr", "French", "Français", Some(&FRENCH_STRINGS)),
        entry("es", "Spanish", "Español", Some(&SPANISH_STRINGS)),
        entry("de", "German", "Deutsch", Some(&GERMAN_STRINGS)),
        entry("it", "Italian", "Italiano", None),
        entry("pt", "Portuguese", "Português", None),
        entry("nl", "Dutch", "Nederlands", None),
        entry("pl", "Polish", "Polski", None),
        entry("ja", "Japanese", "日本語", None),
        entry("zh", "Chinese", "中文", None),
        entry("ko", "Korean", "한국어", None),
        entry("ru", "Russian", "Русский", None),
    ]
}
