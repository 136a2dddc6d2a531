//! Effective build language set.

use crate::error::BuildError;
use crate::i18n::LanguageCode;
use std::collections::BTreeSet;

/// Compute the ordered set of languages to build.
///
/// Without an allow-list this is the sorted union of theme and user
/// languages. With one, every entry must be in that union and the
/// allow-list order is kept.
pub fn resolve_languages(
    theme_languages: &[LanguageCode],
    user_languages: &[LanguageCode],
    allow_list: Option<&[LanguageCode]>,
) -> Result<Vec<LanguageCode>, BuildError> {
    let union: BTreeSet<LanguageCode> = theme_languages
        .iter()
        .chain(user_languages)
        .cloned()
        .collect();

    let Some(allow_list) = allow_list else {
        return Ok(union.into_iter().collect());
    };

    let missing: Vec<LanguageCode> = allow_list
        .iter()
        .filter(|code| !union.contains(*code))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(BuildError::UnavailableLanguage {
            requested: missing,
            available: union.into_iter().collect(),
        });
    }

    let mut resolved: Vec<LanguageCode> = Vec::with_capacity(allow_list.len());
    for code in allow_list {
        if !resolved.contains(code) {
            resolved.push(code.clone());
        }
    }
    Ok(resolved)
}

/// Ensure the configured default language is part of the build.
pub fn check_default_language(
    resolved: &[LanguageCode],
    default_language: Option<&LanguageCode>,
) -> Result<(), BuildError> {
    match default_language {
        Some(language) if !resolved.contains(language) => {
            Err(BuildError::UnknownDefaultLanguage {
                language: language.clone(),
                available: resolved.to_vec(),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<LanguageCode> {
        list.iter().map(|c| LanguageCode::from_code(c).unwrap()).collect()
    }

    #[test]
    fn test_union_is_sorted_and_deduplicated() {
        let resolved = resolve_languages(&codes(&["fr", "en"]), &codes(&["es", "en"]), None).unwrap();
        assert_eq!(resolved, codes(&["en", "es", "fr"]));
    }

    #[test]
    fn test_allow_list_keeps_its_order() {
        let allow = codes(&["fr", "en"]);
        let resolved =
            resolve_languages(&codes(&["en", "fr", "es"]), &[], Some(&allow)).unwrap();
        assert_eq!(resolved, codes(&["fr", "en"]));
    }

    #[test]
    fn test_allow_list_entry_from_user_locales() {
        let allow = codes(&["en", "de"]);
        let resolved = resolve_languages(&codes(&["en"]), &codes(&["de"]), Some(&allow)).unwrap();
        assert_eq!(resolved, codes(&["en", "de"]));
    }

    #[test]
    fn test_unavailable_allow_list_entry_fails() {
        let allow = codes(&["en", "ja", "ko"]);
        let err = resolve_languages(&codes(&["en", "fr"]), &[], Some(&allow)).unwrap_err();
        match err {
            BuildError::UnavailableLanguage {
                requested,
                available,
            } => {
                assert_eq!(requested, codes(&["ja", "ko"]));
                assert_eq!(available, codes(&["en", "fr"]));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_sources_without_allow_list() {
        assert!(resolve_languages(&[], &[], None).unwrap().is_empty());
    }

    #[test]
    fn test_default_language_check() {
        let resolved = codes(&["en", "fr"]);
        assert!(check_default_language(&resolved, None).is_ok());
        assert!(check_default_language(&resolved, Some(&codes(&["fr"])[0])).is_ok());

        let err = check_default_language(&resolved, Some(&codes(&["de"])[0])).unwrap_err();
        assert!(matches!(err, BuildError::UnknownDefaultLanguage { .. }));
        assert!(err.to_string().contains("\"de\""));
    }
}
