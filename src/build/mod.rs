//! Site build orchestration.
//!
//! A build moves through these stages:
//!
//! 1. `Init` / `Validate`: load and validate the configuration
//! 2. `LoadTheme`: load the theme descriptor and templates
//! 3. `ResolveLanguages`: compute the language set and check the default
//! 4. `SingleLanguage` or `MultiLanguage`: render every page
//! 5. `ProcessSharedAssets`: stylesheet, assets, photo, config copy, README
//! 6. `Finalize`: return the `BuildReport`
//!
//! Nothing is written to the output directory before stage 3 succeeds and
//! the templates compile.

pub mod css;
pub mod files;
pub mod plan;
mod selector;
mod summary;
mod unit;

pub use css::{process_stylesheet, CssProcessor, StandardCssProcessor};
pub use plan::{
    decide_mode, language_links, plan_units, BuildMode, LanguageLink, UnitPlacement, ASSETS_DIR,
    INDEX_FILE, STYLESHEET_FILE, SUMMARY_FILE,
};
pub use selector::render_language_selector;
pub use summary::{render_summary, SummaryInfo};
pub use unit::LocalizedUnit;

use crate::config::AppConfig;
use crate::document::ResumeConfig;
use crate::error::{BuildError, BuildWarning};
use crate::i18n::{
    available_languages, check_default_language, join_codes, merge_locales, resolve_deep,
    resolve_languages, LanguageCode,
};
use crate::theme::{HelperTable, Renderer, TeraRenderer, Theme, ThemeRegistry};
use futures::future::try_join_all;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What to build and where.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub config_path: PathBuf,
    pub theme_name: String,
    pub output_path: PathBuf,
    /// Build only this language
    pub language: Option<LanguageCode>,
    /// `Some(true)` forces one page per language, `Some(false)` forces one page
    pub multi_language: Option<bool>,
}

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub mode: BuildMode,
    pub languages: Vec<LanguageCode>,
    pub default_language: Option<LanguageCode>,
    /// Pages written, relative to the output root
    pub pages: Vec<PathBuf>,
    pub warnings: Vec<BuildWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Init,
    Validate,
    LoadTheme,
    ResolveLanguages,
    SingleLanguage,
    MultiLanguage,
    ProcessSharedAssets,
    Finalize,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Init => "init",
            BuildStage::Validate => "validate",
            BuildStage::LoadTheme => "load-theme",
            BuildStage::ResolveLanguages => "resolve-languages",
            BuildStage::SingleLanguage => "single-language",
            BuildStage::MultiLanguage => "multi-language",
            BuildStage::ProcessSharedAssets => "shared-assets",
            BuildStage::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

fn enter(stage: BuildStage) {
    debug!(stage = %stage, "Entering build stage");
}

/// Builds résumé sites from a configuration file and a theme.
pub struct SiteBuilder {
    registry: ThemeRegistry,
    fallback: LanguageCode,
    preserve_git: bool,
    css: Arc<dyn CssProcessor>,
    helpers: HelperTable,
}

impl SiteBuilder {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            registry: ThemeRegistry::new(&config.themes_dir),
            fallback: config.fallback_language.clone(),
            preserve_git: config.preserve_git,
            css: Arc::new(StandardCssProcessor),
            helpers: HelperTable::standard(),
        }
    }

    pub fn with_css_processor(mut self, processor: Arc<dyn CssProcessor>) -> Self {
        self.css = processor;
        self
    }

    /// Add helpers on top of the standard table.
    pub fn with_helpers(mut self, helpers: HelperTable) -> Self {
        self.helpers.extend(helpers);
        self
    }

    pub async fn build(&self, options: &BuildOptions) -> Result<BuildReport, BuildError> {
        enter(BuildStage::Init);
        info!("Loading configuration: {}", options.config_path.display());

        enter(BuildStage::Validate);
        let config = ResumeConfig::load(&options.config_path).await?;
        info!("✓ Configuration validated successfully");

        enter(BuildStage::LoadTheme);
        let theme = self.registry.load(&options.theme_name).await?;
        info!("✓ Theme loaded: {}", theme.descriptor.name);
        if let Some(name) = config.profile_name(self.fallback.as_str(), self.fallback.as_str()) {
            info!("✓ Loaded profile for: {}", name);
        }

        enter(BuildStage::ResolveLanguages);
        let config_dir = config.config_dir();
        let theme_languages = theme.languages().await?;
        let user_languages: Vec<LanguageCode> =
            available_languages(&config_dir).await?.into_iter().collect();
        let site = config.site();
        let languages = resolve_languages(
            &theme_languages,
            &user_languages,
            site.languages.as_deref(),
        )?;
        check_default_language(&languages, site.default_language.as_ref())?;
        if site.languages.is_some() {
            info!("✓ Using configured languages: {}", join_codes(&languages));
        } else {
            info!("✓ Found {} language(s): {}", languages.len(), join_codes(&languages));
        }

        let mode = decide_mode(options.multi_language, options.language.as_ref(), &languages);
        let default_language = match mode {
            BuildMode::Multi => site.default_language.clone(),
            BuildMode::Single(_) => None,
        };

        let renderer = TeraRenderer::new(&theme, self.helpers.clone())?;

        let root = options.output_path.as_path();
        info!("Output directory: {}", root.display());
        files::clean_dir(root, self.preserve_git).await?;

        let placements = plan_units(&mode, &languages, default_language.as_ref(), root);
        let advertised = plan::advertised_languages(&mode, &languages);

        match &mode {
            BuildMode::Single(language) => {
                enter(BuildStage::SingleLanguage);
                info!("Building single language ({})...", language);
            }
            BuildMode::Multi => {
                enter(BuildStage::MultiLanguage);
                info!("Building multi-language site ({})...", join_codes(&languages));
                if let Some(default) = &default_language {
                    info!("Default language: {} (at root)", default);
                }
            }
        }

        let jobs = placements.iter().map(|placement| {
            self.build_unit(
                &config,
                &theme,
                &renderer,
                placement,
                &placements,
                &advertised,
                mode.is_multi(),
            )
        });
        let mut pages: Vec<PathBuf> = try_join_all(jobs).await?;

        if mode.is_multi() && default_language.is_none() {
            files::write_file(&root.join(INDEX_FILE), &render_language_selector(&languages)).await?;
            info!("✓ Generated {} (language selector)", INDEX_FILE);
            pages.insert(0, PathBuf::from(INDEX_FILE));
        }

        enter(BuildStage::ProcessSharedAssets);
        let mut warnings = Vec::new();
        process_stylesheet(self.css.as_ref(), &theme.stylesheet_path(), &root.join(STYLESHEET_FILE))
            .await?;
        self.copy_assets(&theme, root, &mut warnings).await;
        self.copy_photo(&config, root, &mut warnings).await;
        copy_config(&config, root, &mut warnings).await;

        let config_file = file_name_of(config.source_path());
        let summary = render_summary(&SummaryInfo {
            theme_name: &options.theme_name,
            theme_description: theme.descriptor.description.as_deref(),
            config_file: &config_file,
            mode: &mode,
            languages: &languages,
            default_language: default_language.as_ref(),
            pages: &pages,
            generated_on: chrono::Local::now().date_naive(),
        });
        match files::write_file(&root.join(SUMMARY_FILE), &summary).await {
            Ok(()) => info!("✓ {} generated", SUMMARY_FILE),
            Err(e) => record(&mut warnings, BuildWarning::Summary { reason: e.to_string() }),
        }

        enter(BuildStage::Finalize);
        info!(
            "✅ Build completed: {} page(s), {} warning(s)",
            pages.len(),
            warnings.len()
        );

        Ok(BuildReport {
            mode,
            languages,
            default_language,
            pages,
            warnings,
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn build_unit(
        &self,
        config: &ResumeConfig,
        theme: &Theme,
        renderer: &dyn Renderer,
        placement: &UnitPlacement,
        placements: &[UnitPlacement],
        advertised: &[LanguageCode],
        is_multi_language: bool,
    ) -> Result<PathBuf, BuildError> {
        let language = &placement.language;
        debug!("Generating {} version", language);

        let content = resolve_deep(config.document(), language.as_str(), self.fallback.as_str());
        let locale = merge_locales(&theme.path, &config.config_dir(), language)
            .await?
            .unwrap_or_default();

        let unit = LocalizedUnit::assemble(
            content,
            locale,
            language.clone(),
            advertised.to_vec(),
            is_multi_language,
            placement.nested,
            language_links(placement, placements),
        );
        let html = renderer.render(&unit)?;
        files::write_file(&placement.page_path(), &html).await?;

        let page = placement.relative_page();
        info!("✓ Generated {} ({})", page.display(), language);
        Ok(page)
    }

    /// Copy everything under the theme's `assets/` except the stylesheet
    /// source into `<root>/assets`.
    async fn copy_assets(&self, theme: &Theme, root: &Path, warnings: &mut Vec<BuildWarning>) {
        let source = theme.assets_dir();
        let stylesheet = theme.stylesheet_path();
        let dest = root.join(ASSETS_DIR);

        let mut entries = match tokio::fs::read_dir(&source).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("ℹ No additional assets to copy");
                return;
            }
            Err(e) => {
                record(
                    warnings,
                    BuildWarning::AssetCopy {
                        path: source,
                        reason: e.to_string(),
                    },
                );
                return;
            }
        };

        let mut copied = 0usize;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    record(
                        warnings,
                        BuildWarning::AssetCopy {
                            path: source.clone(),
                            reason: e.to_string(),
                        },
                    );
                    break;
                }
            };

            let path = entry.path();
            if path == stylesheet {
                continue;
            }
            let target = dest.join(entry.file_name());
            let is_dir = tokio::fs::metadata(&path)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            let result = if is_dir {
                files::copy_dir_recursive(&path, &target, Some(&stylesheet)).await
            } else {
                files::copy_file(&path, &target).await.map(|()| 1)
            };
            match result {
                Ok(count) => copied += count,
                Err(e) => record(
                    warnings,
                    BuildWarning::AssetCopy {
                        path,
                        reason: e.to_string(),
                    },
                ),
            }
        }

        if copied > 0 {
            info!("✓ Assets copied ({} file(s))", copied);
        }
    }

    async fn copy_photo(&self, config: &ResumeConfig, root: &Path, warnings: &mut Vec<BuildWarning>) {
        let Some(photo) = config.photo() else {
            return;
        };

        let source = config.config_dir().join(photo);
        let file_name = file_name_of(Path::new(photo));
        match files::copy_file(&source, &root.join(&file_name)).await {
            Ok(()) => info!("✓ Profile photo copied: {}", file_name),
            Err(e) => record(
                warnings,
                BuildWarning::PhotoCopy {
                    photo: photo.to_string(),
                    reason: e.to_string(),
                },
            ),
        }
    }
}

async fn copy_config(config: &ResumeConfig, root: &Path, warnings: &mut Vec<BuildWarning>) {
    let file_name = file_name_of(config.source_path());
    match files::copy_file(config.source_path(), &root.join(&file_name)).await {
        Ok(()) => info!("✓ Configuration copied: {}", file_name),
        Err(e) => record(warnings, BuildWarning::ConfigCopy { reason: e.to_string() }),
    }
}

fn record(warnings: &mut Vec<BuildWarning>, warning: BuildWarning) {
    warn!("⚠ {}", warning);
    warnings.push(warning);
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
