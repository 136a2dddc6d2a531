//! `theme.json`: the declarative theme descriptor.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

pub const DESCRIPTOR_FILE: &str = "theme.json";

static SEMVER_REGEX: OnceLock<Regex> = OnceLock::new();

fn semver_regex() -> &'static Regex {
    SEMVER_REGEX.get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").unwrap())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeDescriptor {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub supported_languages: Vec<String>,
    pub templates: TemplateSpec,
    #[serde(default)]
    pub assets: AssetSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSpec {
    pub main: String,
    #[serde(default)]
    pub partials: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetSpec {
    #[serde(default = "default_stylesheet")]
    pub styles: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub fonts: Vec<String>,
}

fn default_stylesheet() -> String {
    "styles.css".to_string()
}

impl Default for AssetSpec {
    fn default() -> Self {
        Self {
            styles: default_stylesheet(),
            images: Vec::new(),
            fonts: Vec::new(),
        }
    }
}

impl ThemeDescriptor {
    /// Parse and validate descriptor JSON.
    pub fn from_json(source: &str) -> Result<Self, String> {
        let descriptor: ThemeDescriptor =
            serde_json::from_str(source).map_err(|e| e.to_string())?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name must not be empty".to_string());
        }
        if !semver_regex().is_match(&self.version) {
            problems.push(format!(
                "version \"{}\" must be in MAJOR.MINOR.PATCH format",
                self.version
            ));
        }
        if self.templates.main.trim().is_empty() {
            problems.push("templates.main must not be empty".to_string());
        }
        for code in &self.supported_languages {
            if !(2..=5).contains(&code.len()) {
                problems.push(format!(
                    "supportedLanguages entry \"{}\" must be 2 to 5 characters",
                    code
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join(", "))
        }
    }
}
