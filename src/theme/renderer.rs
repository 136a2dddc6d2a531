//! Rendering a localized build unit to HTML.

use crate::build::LocalizedUnit;
use crate::error::BuildError;
use crate::theme::helpers::HelperTable;
use crate::theme::registry::Theme;
use tera::{Context, Tera};
use tracing::debug;

/// Turns one localized build unit into page text.
pub trait Renderer: Send + Sync {
    fn render(&self, unit: &LocalizedUnit) -> Result<String, BuildError>;
}

/// Tera-backed renderer for a loaded theme.
///
/// Templates are compiled once at construction. Each render works on a
/// copy of the engine with the unit's localized helpers installed on top of
/// the base table.
#[derive(Debug)]
pub struct TeraRenderer {
    tera: Tera,
    main: String,
}

impl TeraRenderer {
    pub fn new(theme: &Theme, helpers: HelperTable) -> Result<Self, BuildError> {
        let mut tera = Tera::default();
        helpers.install(&mut tera);

        let templates = &theme.templates;
        let sources = templates
            .partials
            .iter()
            .chain(std::iter::once(&templates.main))
            .map(|source| (source.name.as_str(), source.content.as_str()));
        tera.add_raw_templates(sources)
            .map_err(|e| BuildError::TemplateLoad {
                template: templates.main.name.clone(),
                reason: error_chain(&e),
            })?;

        debug!(
            "Compiled {} templates for theme {}",
            templates.partials.len() + 1,
            theme.name
        );

        Ok(Self {
            tera,
            main: templates.main.name.clone(),
        })
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, unit: &LocalizedUnit) -> Result<String, BuildError> {
        let render_error = |reason: String| BuildError::Render {
            language: unit.current_language.clone(),
            reason,
        };

        let mut tera = self.tera.clone();
        HelperTable::localized(&unit.locale).install(&mut tera);

        let context = Context::from_serialize(unit).map_err(|e| render_error(error_chain(&e)))?;
        tera.render(&self.main, &context)
            .map_err(|e| render_error(error_chain(&e)))
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(err) = source {
        chain.push(err.to_string());
        source = err.source();
    }
    chain.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::LocalizedUnit;
    use crate::document::ConfigValue;
    use crate::i18n::{LanguageCode, LocaleBundle};
    use crate::theme::descriptor::ThemeDescriptor;
    use crate::theme::registry::{TemplateSource, ThemeTemplates};
    use std::path::PathBuf;

    fn theme(main: &str, partials: &[(&str, &str)]) -> Theme {
        Theme {
            name: "test".to_string(),
            path: PathBuf::from("themes/test"),
            descriptor: ThemeDescriptor::from_json(
                r#"{"name": "Test", "version": "1.0.0", "templates": {"main": "index.html"}}"#,
            )
            .unwrap(),
            templates: ThemeTemplates {
                main: TemplateSource {
                    name: "index.html".to_string(),
                    content: main.to_string(),
                },
                partials: partials
                    .iter()
                    .map(|(name, content)| TemplateSource {
                        name: name.to_string(),
                        content: content.to_string(),
                    })
                    .collect(),
            },
        }
    }

    fn unit(yaml: &str, locale: &str) -> LocalizedUnit {
        let content = ConfigValue::from_yaml(serde_yaml::from_str(yaml).unwrap()).unwrap();
        let en = LanguageCode::from_code("en").unwrap();
        LocalizedUnit::assemble(
            content,
            LocaleBundle::from_yaml_str(locale).unwrap(),
            en.clone(),
            vec![en],
            false,
            false,
            Vec::new(),
        )
    }

    #[test]
    fn test_renders_partials_and_helpers() {
        let renderer = TeraRenderer::new(
            &theme(
                r#"{% include "header.html" %}<p>{{ t(key="labels.since") }} {{ since | format_date }}</p>"#,
                &[("header.html", "<h1>{{ profile.name }}</h1>")],
            ),
            HelperTable::standard(),
        )
        .unwrap();

        let html = renderer
            .render(&unit(
                "profile:\n  name: Jane <Co>\nsince: 2018-09\n",
                "labels: {since: Since}\n",
            ))
            .unwrap();
        assert_eq!(html, "<h1>Jane &lt;Co&gt;</h1><p>Since Sep 2018</p>");
    }

    #[test]
    fn test_exposes_unit_metadata() {
        let renderer = TeraRenderer::new(
            &theme(
                "{{ currentLanguage }}|{{ cssPath }}|{{ assetsPath }}|{{ isAtRoot }}",
                &[],
            ),
            HelperTable::standard(),
        )
        .unwrap();

        let html = renderer.render(&unit("profile: {name: X}\n", "")).unwrap();
        assert_eq!(html, "en|styles.css|assets|true");
    }

    #[test]
    fn test_syntax_error_is_template_load_error() {
        let err = TeraRenderer::new(&theme("{% if %}", &[]), HelperTable::standard()).unwrap_err();
        assert!(matches!(err, BuildError::TemplateLoad { .. }));
    }

    #[test]
    fn test_missing_variable_is_render_error() {
        let renderer =
            TeraRenderer::new(&theme("{{ nowhere.to_be_found }}", &[]), HelperTable::standard())
                .unwrap();
        let err = renderer.render(&unit("profile: {name: X}\n", "")).unwrap_err();
        match err {
            BuildError::Render { language, .. } => assert_eq!(language.as_str(), "en"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
