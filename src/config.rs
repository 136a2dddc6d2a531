use crate::i18n::{LanguageCode, DEFAULT_FALLBACK};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Themes
    pub themes_dir: PathBuf,

    // Translation
    pub fallback_language: LanguageCode,

    // Output
    pub preserve_git: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Themes root, relative to the working directory
            themes_dir: std::env::var("RESUME_FORGE_THEMES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("themes")),

            // Translation
            fallback_language: match std::env::var("RESUME_FORGE_FALLBACK_LANGUAGE") {
                Ok(code) => LanguageCode::from_code(code.trim())
                    .context("RESUME_FORGE_FALLBACK_LANGUAGE is not a valid language code")?,
                Err(_) => LanguageCode::from_code(DEFAULT_FALLBACK)?,
            },

            // Output
            preserve_git: std::env::var("RESUME_FORGE_PRESERVE_GIT")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }

    /// Override the themes root (from the command line).
    pub fn with_themes_dir(mut self, themes_dir: impl Into<PathBuf>) -> Self {
        self.themes_dir = themes_dir.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            themes_dir: PathBuf::from("themes"),
            fallback_language: LanguageCode::canonical(),
            preserve_git: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 3] = [
        "RESUME_FORGE_THEMES_DIR",
        "RESUME_FORGE_FALLBACK_LANGUAGE",
        "RESUME_FORGE_PRESERVE_GIT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.themes_dir, PathBuf::from("themes"));
        assert_eq!(config.fallback_language.as_str(), "en");
        assert!(config.preserve_git);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("RESUME_FORGE_THEMES_DIR", "/opt/themes");
        std::env::set_var("RESUME_FORGE_FALLBACK_LANGUAGE", "fr");
        std::env::set_var("RESUME_FORGE_PRESERVE_GIT", "false");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.themes_dir, PathBuf::from("/opt/themes"));
        assert_eq!(config.fallback_language.as_str(), "fr");
        assert!(!config.preserve_git);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_fallback_language_is_rejected() {
        clear_env();
        std::env::set_var("RESUME_FORGE_FALLBACK_LANGUAGE", "French");
        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("RESUME_FORGE_FALLBACK_LANGUAGE"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_unrecognised_flag_keeps_default() {
        clear_env();
        std::env::set_var("RESUME_FORGE_PRESERVE_GIT", "maybe");
        assert!(AppConfig::from_env().unwrap().preserve_git);
        clear_env();
    }

    #[test]
    fn test_with_themes_dir() {
        let config = AppConfig::default().with_themes_dir("custom");
        assert_eq!(config.themes_dir, PathBuf::from("custom"));
    }
}
