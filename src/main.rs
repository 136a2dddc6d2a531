use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resume_forge::build::{BuildMode, BuildOptions, SiteBuilder};
use resume_forge::config::AppConfig;
use resume_forge::document::ResumeConfig;
use resume_forge::i18n::{join_codes, LanguageCode};
use resume_forge::scaffold::init_config;
use resume_forge::theme::ThemeRegistry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "resume-forge")]
#[command(version)]
#[command(about = "Build multi-language static résumé websites from a YAML profile")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a résumé website from a configuration file
    Build {
        /// Path to the configuration file
        #[arg(short, long, default_value = "resumes/resume.yaml")]
        config: PathBuf,

        /// Theme name
        #[arg(short, long, default_value = "classic")]
        theme: String,

        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// Build a single page in this language (e.g. en, fr, es)
        #[arg(short, long)]
        language: Option<String>,

        /// Build one page even when several languages are available
        #[arg(long)]
        single_language: bool,

        /// Directory containing themes (overrides RESUME_FORGE_THEMES_DIR)
        #[arg(long)]
        themes_dir: Option<PathBuf>,
    },

    /// Validate a configuration file without building
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "resumes/resume.yaml")]
        config: PathBuf,
    },

    /// List available themes
    ListThemes {
        /// Directory containing themes (overrides RESUME_FORGE_THEMES_DIR)
        #[arg(long)]
        themes_dir: Option<PathBuf>,
    },

    /// Create a starter configuration file
    Init {
        /// Where to write the configuration
        #[arg(short, long, default_value = "resumes/resume.yaml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resume_forge=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::Build {
            config: config_path,
            theme,
            output,
            language,
            single_language,
            themes_dir,
        } => {
            let config = match themes_dir {
                Some(dir) => config.with_themes_dir(dir),
                None => config,
            };
            let language = language
                .map(|code| LanguageCode::from_code(&code))
                .transpose()?;

            let options = BuildOptions {
                config_path,
                theme_name: theme,
                output_path: output,
                language,
                multi_language: single_language.then_some(false),
            };

            let report = SiteBuilder::new(&config)
                .build(&options)
                .await
                .context("Build failed")?;

            match &report.mode {
                BuildMode::Single(language) => println!("✓ Built {} page", language),
                BuildMode::Multi => println!(
                    "✓ Built {} language(s): {}",
                    report.languages.len(),
                    join_codes(&report.languages)
                ),
            }
            for page in &report.pages {
                println!("  {}", options.output_path.join(page).display());
            }
            if !report.warnings.is_empty() {
                println!("⚠ {} warning(s):", report.warnings.len());
                for warning in &report.warnings {
                    println!("  {}", warning);
                }
            }
            println!("✓ Resume built successfully!");
        }

        Commands::Validate {
            config: config_path,
        } => {
            info!("Validating: {}", config_path.display());
            let resume = ResumeConfig::load(&config_path)
                .await
                .context("✗ Validation failed")?;

            println!("✓ Configuration is valid!");
            let fallback = config.fallback_language.as_str();
            if let Some(name) = resume.profile_name(fallback, fallback) {
                println!("  Profile: {}", name);
            }
            let sections: Vec<String> = resume
                .describe_sections()
                .into_iter()
                .map(|(section, count)| format!("{} {}", count, section_label(section)))
                .collect();
            if !sections.is_empty() {
                println!("  Content: {}", sections.join(", "));
            }
        }

        Commands::ListThemes { themes_dir } => {
            let config = match themes_dir {
                Some(dir) => config.with_themes_dir(dir),
                None => config,
            };
            let registry = ThemeRegistry::new(&config.themes_dir);
            let themes = registry.discover().await?;

            println!("Available themes:\n");
            for name in &themes {
                let descriptor = registry.load_descriptor(name).await?;
                println!("  {}", name);
                println!("    Name: {}", descriptor.name);
                println!("    Version: {}", descriptor.version);
                if let Some(description) = &descriptor.description {
                    println!("    Description: {}", description);
                }
                if !descriptor.supported_languages.is_empty() {
                    println!("    Languages: {}", descriptor.supported_languages.join(", "));
                }
                println!();
            }
            println!("Total: {} theme(s)", themes.len());
        }

        Commands::Init { output } => {
            init_config(&output).await?;
            println!("✓ Created starter configuration!");
            println!("  File: {}", output.display());
            println!("\nNext steps:");
            println!("  1. Edit the configuration file with your information");
            println!("  2. Build your resume: resume-forge build -c {}", output.display());
        }
    }

    Ok(())
}

fn section_label(section: &str) -> &'static str {
    match section {
        "experience" => "experience entries",
        "education" => "education entries",
        "skills" => "skill categories",
        "languages" => "languages",
        "hobbies" => "hobbies",
        "social" => "social links",
        _ => "entries",
    }
}
