//! Theme discovery and loading.

use crate::error::BuildError;
use crate::i18n::{available_languages, LanguageCode};
use crate::theme::descriptor::{ThemeDescriptor, DESCRIPTOR_FILE};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const TEMPLATES_DIR: &str = "templates";
pub const ASSETS_DIR: &str = "assets";

/// A named template and its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ThemeTemplates {
    pub main: TemplateSource,
    /// Partials that loaded; unreadable ones are skipped
    pub partials: Vec<TemplateSource>,
}

/// A loaded theme: descriptor plus template sources.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub path: PathBuf,
    pub descriptor: ThemeDescriptor,
    pub templates: ThemeTemplates,
}

impl Theme {
    pub fn assets_dir(&self) -> PathBuf {
        self.path.join(ASSETS_DIR)
    }

    /// Source stylesheet named by `assets.styles`.
    pub fn stylesheet_path(&self) -> PathBuf {
        self.assets_dir().join(&self.descriptor.assets.styles)
    }

    /// Languages the theme provides: its locale directories plus the
    /// two-letter codes listed in `supportedLanguages`, sorted.
    pub async fn languages(&self) -> Result<Vec<LanguageCode>, BuildError> {
        let mut languages: BTreeSet<LanguageCode> = available_languages(&self.path).await?;
        for code in &self.descriptor.supported_languages {
            match LanguageCode::from_code(code) {
                Ok(code) => {
                    languages.insert(code);
                }
                Err(_) => debug!(
                    "Theme {} lists \"{}\", which is not a two-letter code",
                    self.name, code
                ),
            }
        }
        Ok(languages.into_iter().collect())
    }
}

async fn has_descriptor(dir: &Path) -> bool {
    tokio::fs::metadata(dir.join(DESCRIPTOR_FILE))
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Themes found under one root directory.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    root: PathBuf,
}

impl ThemeRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of directories under the root that contain a `theme.json`,
    /// sorted. A missing root yields no themes.
    pub async fn discover(&self) -> Result<Vec<String>, BuildError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Themes directory {} does not exist", self.root.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(BuildError::io(&self.root, e)),
        };

        let mut themes = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| BuildError::io(&self.root, e))?
        {
            if has_descriptor(&entry.path()).await {
                themes.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        themes.sort();
        Ok(themes)
    }

    fn theme_path(&self, name: &str) -> Option<PathBuf> {
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        plain.then(|| self.root.join(name))
    }

    async fn not_found(&self, name: &str) -> BuildError {
        BuildError::ThemeNotFound {
            name: name.to_string(),
            available: self.discover().await.unwrap_or_default(),
        }
    }

    /// Read and validate `<root>/<name>/theme.json`.
    pub async fn load_descriptor(&self, name: &str) -> Result<ThemeDescriptor, BuildError> {
        let Some(path) = self.theme_path(name) else {
            return Err(self.not_found(name).await);
        };
        let descriptor_path = path.join(DESCRIPTOR_FILE);

        let source = match tokio::fs::read_to_string(&descriptor_path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(self.not_found(name).await)
            }
            Err(e) => return Err(BuildError::io(descriptor_path, e)),
        };

        ThemeDescriptor::from_json(&source).map_err(|reason| BuildError::ThemeConfigInvalid {
            name: name.to_string(),
            reason,
        })
    }

    /// Load a theme with its main template and partials.
    ///
    /// The main template must be readable. Partials that cannot be read are
    /// skipped with a warning.
    pub async fn load(&self, name: &str) -> Result<Theme, BuildError> {
        let descriptor = self.load_descriptor(name).await?;
        let path = self.root.join(name);
        let templates_dir = path.join(TEMPLATES_DIR);

        let main_name = descriptor.templates.main.clone();
        let main = tokio::fs::read_to_string(templates_dir.join(&main_name))
            .await
            .map_err(|e| BuildError::TemplateLoad {
                template: main_name.clone(),
                reason: e.to_string(),
            })?;

        let mut partials = Vec::with_capacity(descriptor.templates.partials.len());
        for partial in &descriptor.templates.partials {
            match tokio::fs::read_to_string(templates_dir.join(partial)).await {
                Ok(content) => partials.push(TemplateSource {
                    name: partial.clone(),
                    content,
                }),
                Err(e) => warn!("Could not load partial \"{}\": {}", partial, e),
            }
        }

        info!(
            "Loaded theme {} v{} ({} partials)",
            descriptor.name,
            descriptor.version,
            partials.len()
        );

        Ok(Theme {
            name: name.to_string(),
            path,
            descriptor,
            templates: ThemeTemplates {
                main: TemplateSource {
                    name: main_name,
                    content: main,
                },
                partials,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_theme(root: &Path, name: &str, descriptor: &str, files: &[(&str, &str)]) {
        let dir = root.join(name);
        std::fs::create_dir_all(dir.join(TEMPLATES_DIR)).unwrap();
        std::fs::write(dir.join(DESCRIPTOR_FILE), descriptor).unwrap();
        for (path, content) in files {
            let target = dir.join(path);
            std::fs::create_dir_all(target.parent().unwrap()).unwrap();
            std::fs::write(target, content).unwrap();
        }
    }

    const DESCRIPTOR: &str = r#"{
        "name": "Plain",
        "version": "1.0.0",
        "supportedLanguages": ["en", "de", "en-US"],
        "templates": {"main": "index.html", "partials": ["header.html", "missing.html"]}
    }"#;

    // ==================== Discovery Tests ====================

    #[tokio::test]
    async fn test_discover_sorted_and_requires_descriptor() {
        let root = TempDir::new().unwrap();
        write_theme(root.path(), "zeta", DESCRIPTOR, &[]);
        write_theme(root.path(), "alpha", DESCRIPTOR, &[]);
        std::fs::create_dir_all(root.path().join("not-a-theme")).unwrap();

        let registry = ThemeRegistry::new(root.path());
        assert_eq!(registry.discover().await.unwrap(), vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_discover_missing_root() {
        let root = TempDir::new().unwrap();
        let registry = ThemeRegistry::new(root.path().join("nothing"));
        assert!(registry.discover().await.unwrap().is_empty());
    }

    // ==================== Loading Tests ====================

    #[tokio::test]
    async fn test_theme_name_cannot_leave_root() {
        let root = TempDir::new().unwrap();
        write_theme(root.path(), "classic", DESCRIPTOR, &[]);
        let registry = ThemeRegistry::new(root.path().join("classic"));

        for name in ["..", "../classic", "."] {
            let err = registry.load_descriptor(name).await.unwrap_err();
            assert!(matches!(err, BuildError::ThemeNotFound { .. }), "{} should be rejected", name);
        }
    }

    #[tokio::test]
    async fn test_missing_theme_lists_available() {
        let root = TempDir::new().unwrap();
        write_theme(root.path(), "classic", DESCRIPTOR, &[]);

        let err = ThemeRegistry::new(root.path()).load("modern").await.unwrap_err();
        match err {
            BuildError::ThemeNotFound { name, available } => {
                assert_eq!(name, "modern");
                assert_eq!(available, vec!["classic"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_descriptor() {
        let root = TempDir::new().unwrap();
        write_theme(root.path(), "broken", r#"{"name": "Broken"}"#, &[]);

        let err = ThemeRegistry::new(root.path()).load("broken").await.unwrap_err();
        assert!(matches!(err, BuildError::ThemeConfigInvalid { .. }));
    }

    #[tokio::test]
    async fn test_missing_main_template_is_fatal() {
        let root = TempDir::new().unwrap();
        write_theme(root.path(), "plain", DESCRIPTOR, &[]);

        let err = ThemeRegistry::new(root.path()).load("plain").await.unwrap_err();
        match err {
            BuildError::TemplateLoad { template, .. } => assert_eq!(template, "index.html"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_load_skips_missing_partials_and_reports_languages() {
        let root = TempDir::new().unwrap();
        write_theme(
            root.path(),
            "plain",
            DESCRIPTOR,
            &[
                ("templates/index.html", "<h1>{{ profile.name }}</h1>"),
                ("templates/header.html", "<header></header>"),
                ("locales/fr/content.yaml", "title: CV\n"),
            ],
        );

        let theme = ThemeRegistry::new(root.path()).load("plain").await.unwrap();
        assert_eq!(theme.templates.main.name, "index.html");
        assert_eq!(theme.templates.partials.len(), 1);
        assert_eq!(theme.templates.partials[0].name, "header.html");
        assert!(theme.stylesheet_path().ends_with("assets/styles.css"));

        let languages: Vec<String> = theme
            .languages()
            .await
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(languages, vec!["de", "en", "fr"]);
    }
}
