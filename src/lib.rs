//! resume-forge: multi-language static résumé websites from a YAML profile.

pub mod build;
pub mod config;
pub mod document;
pub mod error;
pub mod i18n;
pub mod scaffold;
pub mod schema;
pub mod theme;

pub use build::{BuildOptions, BuildReport, SiteBuilder};
pub use config::AppConfig;
pub use error::{BuildError, BuildWarning};
