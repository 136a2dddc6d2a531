use crate::build::plan::{assets_href, photo_reference, stylesheet_href, LanguageLink};
use crate::document::ConfigValue;
use crate::i18n::{LanguageCode, LocaleBundle};
use serde::Serialize;

/// Data model handed to the templates for one language.
///
/// The resolved configuration sections sit at the top level next to the
/// page metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedUnit {
    #[serde(flatten)]
    pub content: ConfigValue,
    pub locale: LocaleBundle,
    pub current_language: LanguageCode,
    pub available_languages: Vec<LanguageCode>,
    pub is_multi_language: bool,
    pub is_at_root: bool,
    pub css_path: String,
    pub assets_path: String,
    pub language_links: Vec<LanguageLink>,
}

impl LocalizedUnit {
    /// Combine resolved content with its locale and page metadata.
    ///
    /// `profile.photo` is rewritten to the copied file's path relative to
    /// the page.
    pub fn assemble(
        mut content: ConfigValue,
        locale: LocaleBundle,
        current_language: LanguageCode,
        available_languages: Vec<LanguageCode>,
        is_multi_language: bool,
        nested: bool,
        language_links: Vec<LanguageLink>,
    ) -> Self {
        rewrite_photo(&mut content, nested);

        Self {
            content,
            locale,
            current_language,
            available_languages,
            is_multi_language,
            is_at_root: !nested,
            css_path: stylesheet_href(nested),
            assets_path: assets_href(nested),
            language_links,
        }
    }
}

fn rewrite_photo(content: &mut ConfigValue, nested: bool) {
    let Some(profile) = content
        .as_mapping_mut()
        .and_then(|root| root.get_mut("profile"))
        .and_then(ConfigValue::as_mapping_mut)
    else {
        return;
    };

    let reference = match profile.get("photo").and_then(ConfigValue::as_str) {
        Some(photo) if !photo.trim().is_empty() => photo_reference(photo, nested),
        _ => return,
    };
    profile.insert("photo", ConfigValue::text(reference));
}
