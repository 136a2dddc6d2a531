//! Internationalization: language codes, per-language values and locale
//! bundles.
//!
//! # Architecture
//!
//! - `registry`: known languages and their display metadata
//! - `language`: validated `LanguageCode` type
//! - `strings`: labels for the generated language selector page
//! - `translator`: resolution of per-language configuration values
//! - `locale`: theme and user locale bundles and their merge
//! - `availability`: the effective build language set
//!
//! # Example
//!
//! ```rust,ignore
//! use resume_forge::i18n::{resolve_deep, LanguageCode};
//!
//! let french = LanguageCode::from_code("fr")?;
//! let resolved = resolve_deep(&document, french.as_str(), "en");
//! ```

mod availability;
mod language;
mod locale;
mod registry;
mod strings;
mod translator;

pub use availability::{check_default_language, resolve_languages};
pub use language::{join_codes, LanguageCode};
pub use locale::{
    all_available_languages, available_languages, bundle_path, load_bundle, merge_locales,
    LocaleBundle, LocaleEntry, BUNDLE_FILE, LOCALES_DIR,
};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::SelectorStrings;
pub use translator::{is_translatable, resolve, resolve_deep, DEFAULT_FALLBACK};
