//! Output layout: how many pages are built and where each one lives.

use crate::i18n::LanguageCode;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";
pub const STYLESHEET_FILE: &str = "styles.css";
pub const ASSETS_DIR: &str = "assets";
pub const SUMMARY_FILE: &str = "README.md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildMode {
    /// One page for this language at the output root
    Single(LanguageCode),
    /// One page per resolved language
    Multi,
}

impl BuildMode {
    pub fn is_multi(&self) -> bool {
        matches!(self, BuildMode::Multi)
    }
}

/// Choose between a single page and one page per language.
///
/// Multi when forced, or when nothing disables it, no language was
/// requested and more than one language resolved. An empty language set
/// always builds a single page.
pub fn decide_mode(
    force_multi: Option<bool>,
    requested: Option<&LanguageCode>,
    resolved: &[LanguageCode],
) -> BuildMode {
    let multi = force_multi == Some(true)
        || (force_multi != Some(false) && requested.is_none() && resolved.len() > 1);

    if multi && !resolved.is_empty() {
        return BuildMode::Multi;
    }

    let target = requested
        .cloned()
        .or_else(|| resolved.first().cloned())
        .unwrap_or_else(LanguageCode::canonical);
    BuildMode::Single(target)
}

/// Where one language's page is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPlacement {
    pub language: LanguageCode,
    pub output_dir: PathBuf,
    /// True when the page lives in `<root>/<code>/`
    pub nested: bool,
}

impl UnitPlacement {
    pub fn page_path(&self) -> PathBuf {
        self.output_dir.join(INDEX_FILE)
    }

    /// Page path relative to the output root, for reports.
    pub fn relative_page(&self) -> PathBuf {
        if self.nested {
            Path::new(self.language.as_str()).join(INDEX_FILE)
        } else {
            PathBuf::from(INDEX_FILE)
        }
    }
}

/// Placement of every page for a build mode.
///
/// In multi mode the default language is written at the root and every
/// other language in its own directory.
pub fn plan_units(
    mode: &BuildMode,
    languages: &[LanguageCode],
    default_language: Option<&LanguageCode>,
    root: &Path,
) -> Vec<UnitPlacement> {
    match mode {
        BuildMode::Single(language) => vec![UnitPlacement {
            language: language.clone(),
            output_dir: root.to_path_buf(),
            nested: false,
        }],
        BuildMode::Multi => languages
            .iter()
            .map(|language| {
                let nested = Some(language) != default_language;
                UnitPlacement {
                    language: language.clone(),
                    output_dir: if nested {
                        root.join(language.as_str())
                    } else {
                        root.to_path_buf()
                    },
                    nested,
                }
            })
            .collect(),
    }
}

/// Languages the pages of a mode advertise.
pub fn advertised_languages(mode: &BuildMode, languages: &[LanguageCode]) -> Vec<LanguageCode> {
    match mode {
        BuildMode::Single(language) => vec![language.clone()],
        BuildMode::Multi => languages.to_vec(),
    }
}

fn up(nested: bool) -> &'static str {
    if nested {
        "../"
    } else {
        ""
    }
}

pub fn stylesheet_href(nested: bool) -> String {
    format!("{}{}", up(nested), STYLESHEET_FILE)
}

pub fn assets_href(nested: bool) -> String {
    format!("{}{}", up(nested), ASSETS_DIR)
}

/// File name of the photo, prefixed with `../` for nested pages.
pub fn photo_reference(photo: &str, nested: bool) -> String {
    let file_name = Path::new(photo)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| photo.to_string());
    format!("{}{}", up(nested), file_name)
}

/// Link from one page's directory to another page's directory.
pub fn language_href(from: &UnitPlacement, to: &UnitPlacement) -> String {
    match (from.nested, to.nested) {
        (true, true) => format!("../{}/", to.language),
        (true, false) => "../".to_string(),
        (false, true) => format!("{}/", to.language),
        (false, false) => "./".to_string(),
    }
}

/// One entry of a page's language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLink {
    pub code: LanguageCode,
    /// Native language name
    pub label: String,
    pub href: String,
    pub current: bool,
}

/// Switcher links for the page at `current`, one per placement.
pub fn language_links(current: &UnitPlacement, placements: &[UnitPlacement]) -> Vec<LanguageLink> {
    placements
        .iter()
        .map(|target| LanguageLink {
            code: target.language.clone(),
            label: target.language.native_name(),
            href: language_href(current, target),
            current: target.language == current.language,
        })
        .collect()
}
