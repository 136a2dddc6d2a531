//! `init`: write a starter configuration.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Starter résumé written by `init`.
pub const STARTER_CONFIG: &str = include_str!("../demos/starter/resume.yaml");

/// Write the starter configuration to `path`, creating parent directories.
///
/// Refuses to overwrite an existing file.
pub async fn init_config(path: &Path) -> Result<()> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        bail!(
            "File already exists at {}. Use a different path or remove the existing file.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    tokio::fs::write(path, STARTER_CONFIG)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
