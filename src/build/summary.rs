use crate::build::plan::{BuildMode, ASSETS_DIR, STYLESHEET_FILE};
use crate::i18n::LanguageCode;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Facts about a finished build, for the output README.
#[derive(Debug, Clone)]
pub struct SummaryInfo<'a> {
    pub theme_name: &'a str,
    pub theme_description: Option<&'a str>,
    pub config_file: &'a str,
    pub mode: &'a BuildMode,
    pub languages: &'a [LanguageCode],
    pub default_language: Option<&'a LanguageCode>,
    pub pages: &'a [PathBuf],
    pub generated_on: NaiveDate,
}

/// Markdown README describing the generated site.
pub fn render_summary(info: &SummaryInfo<'_>) -> String {
    let mut out = String::new();
    out.push_str("# Resume Website\n\n");
    out.push_str("This static resume website was generated by resume-forge.\n\n");

    out.push_str("## Theme\n\n");
    out.push_str(&format!("Built with the **{}** theme.\n", info.theme_name));
    if let Some(description) = info.theme_description.filter(|d| !d.trim().is_empty()) {
        out.push_str(&format!("\n*{}*\n", description));
    }

    out.push_str("\n## Languages\n\n");
    match info.mode {
        BuildMode::Single(language) => {
            out.push_str(&format!(
                "Single-language build: {} ({}).\n",
                language.native_name(),
                language
            ));
        }
        BuildMode::Multi => {
            for language in info.languages {
                let marker = if Some(language) == info.default_language {
                    " (default, at the site root)"
                } else {
                    ""
                };
                out.push_str(&format!(
                    "- {} ({}){}\n",
                    language.native_name(),
                    language,
                    marker
                ));
            }
        }
    }

    out.push_str("\n## Generated Files\n\n");
    for page in info.pages {
        out.push_str(&format!("- `{}`\n", page.display()));
    }
    out.push_str(&format!("- `{}` - processed stylesheet\n", STYLESHEET_FILE));
    out.push_str(&format!("- `{}/` - theme assets\n", ASSETS_DIR));
    out.push_str(&format!(
        "- `{}` - the configuration used for this build\n",
        info.config_file
    ));

    out.push_str("\n## Updating\n\n");
    out.push_str(&format!(
        "Edit `{}` and rebuild:\n\n```bash\nresume-forge build -c {} -t {}\n```\n",
        info.config_file, info.config_file, info.theme_name
    ));

    out.push_str(&format!(
        "\n---\n\nGenerated on {}\n",
        info.generated_on.format("%Y-%m-%d")
    ));
    out
}
