//! Language codes: validated two-letter identifiers.
//!
//! Every place that names a language (locale directories, translatable
//! values, `site.languages`, the build language set) goes through
//! `LanguageCode`, so an invalid code is rejected once at the edge instead of
//! being re-checked downstream.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;

/// A validated ISO 639-1 style language code (`^[a-z]{2}$`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Create a language code from a string.
    ///
    /// # Returns
    /// * `Ok(LanguageCode)` if the code is exactly two lowercase ASCII letters
    /// * `Err` otherwise
    ///
    /// # Example
    /// ```ignore
    /// let french = LanguageCode::from_code("fr")?;
    /// ```
    pub fn from_code(code: &str) -> Result<LanguageCode> {
        if !Self::is_valid(code) {
            bail!(
                "Invalid language code: '{}' (expected two lowercase letters)",
                code
            );
        }
        Ok(LanguageCode(code.to_string()))
    }

    /// Check whether a string has the shape of a language code.
    pub fn is_valid(code: &str) -> bool {
        code.len() == 2 && code.bytes().all(|b| b.is_ascii_lowercase())
    }

    /// The canonical language, used when nothing else selects one.
    pub fn canonical() -> LanguageCode {
        LanguageCode(LanguageRegistry::get().canonical().code.to_string())
    }

    /// Get the code as a string slice (e.g., "en", "fr").
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Registry metadata for this code, if the language is known.
    pub fn config(&self) -> Option<&'static LanguageConfig> {
        LanguageRegistry::get().get_by_code(&self.0)
    }

    /// English name of the language, falling back to the upper-cased code.
    pub fn name(&self) -> String {
        self.config()
            .map(|config| config.name.to_string())
            .unwrap_or_else(|| self.0.to_uppercase())
    }

    /// Native name of the language, falling back to the upper-cased code.
    pub fn native_name(&self) -> String {
        self.config()
            .map(|config| config.native_name.to_string())
            .unwrap_or_else(|| self.0.to_uppercase())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Join codes for human-readable messages (`en, fr`).
pub fn join_codes(codes: &[LanguageCode]) -> String {
    codes
        .iter()
        .map(LanguageCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_accepts_two_lowercase_letters() {
        let code = LanguageCode::from_code("fr").expect("Should succeed");
        assert_eq!(code.as_str(), "fr");
    }

    #[test]
    fn test_from_code_accepts_unknown_but_well_formed_code() {
        let code = LanguageCode::from_code("xx").expect("Should succeed");
        assert_eq!(code.as_str(), "xx");
        assert!(code.config().is_none());
    }

    #[test]
    fn test_from_code_rejects_uppercase() {
        let result = LanguageCode::from_code("EN");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid"));
    }

    #[test]
    fn test_from_code_rejects_wrong_length() {
        assert!(LanguageCode::from_code("").is_err());
        assert!(LanguageCode::from_code("e").is_err());
        assert!(LanguageCode::from_code("eng").is_err());
        assert!(LanguageCode::from_code("pt-BR").is_err());
    }

    #[test]
    fn test_from_code_rejects_non_ascii() {
        assert!(LanguageCode::from_code("é1").is_err());
        assert!(LanguageCode::from_code("ñ").is_err());
    }

    // ==================== canonical Tests ====================

    #[test]
    fn test_canonical_is_english() {
        assert_eq!(LanguageCode::canonical().as_str(), "en");
    }

    // ==================== Name Tests ====================

    #[test]
    fn test_names_for_known_language() {
        let french = LanguageCode::from_code("fr").unwrap();
        assert_eq!(french.name(), "French");
        assert_eq!(french.native_name(), "Français");
    }

    #[test]
    fn test_names_fall_back_to_uppercase_code() {
        let unknown = LanguageCode::from_code("qq").unwrap();
        assert_eq!(unknown.name(), "QQ");
        assert_eq!(unknown.native_name(), "QQ");
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display_writes_code() {
        let code = LanguageCode::from_code("es").unwrap();
        assert_eq!(code.to_string(), "es");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut codes = vec![
            LanguageCode::from_code("fr").unwrap(),
            LanguageCode::from_code("de").unwrap(),
            LanguageCode::from_code("en").unwrap(),
        ];
        codes.sort();
        assert_eq!(join_codes(&codes), "de, en, fr");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let code = LanguageCode::from_code("en").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"en\"");
    }
}
