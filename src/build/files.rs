//! Filesystem helpers for the output directory.

use crate::error::BuildError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const GIT_DIR: &str = ".git";

/// Empty `path` and make sure it exists.
///
/// With `preserve_git`, a top-level `.git` directory survives.
pub async fn clean_dir(path: &Path, preserve_git: bool) -> Result<(), BuildError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            let mut entries = tokio::fs::read_dir(path)
                .await
                .map_err(|e| BuildError::io(path, e))?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| BuildError::io(path, e))?
            {
                let entry_path = entry.path();
                if preserve_git && entry.file_name() == GIT_DIR {
                    debug!("Preserving {}", entry_path.display());
                    continue;
                }
                remove_entry(&entry_path).await?;
            }
        }
        Ok(_) => remove_entry(path).await?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(BuildError::io(path, e)),
    }

    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| BuildError::io(path, e))
}

async fn remove_entry(path: &Path) -> Result<(), BuildError> {
    let meta = tokio::fs::symlink_metadata(path)
        .await
        .map_err(|e| BuildError::io(path, e))?;
    let result = if meta.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    result.map_err(|e| BuildError::io(path, e))
}

/// Write a file, creating its parent directories.
pub async fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BuildError::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| BuildError::io(path, e))
}

/// Copy one file, creating the destination's parent directories.
pub async fn copy_file(src: &Path, dest: &Path) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::copy(src, dest).await.map(|_| ())
}

/// Copy a directory tree, skipping `skip` if it lies inside it.
///
/// Returns the number of files copied.
pub async fn copy_dir_recursive(
    src: &Path,
    dest: &Path,
    skip: Option<&Path>,
) -> std::io::Result<usize> {
    let (src_root, dest_root) = (src.to_path_buf(), dest.to_path_buf());
    let skip = skip.map(Path::to_path_buf);
    let (dirs, files) = tokio::task::spawn_blocking(move || {
        list_tree(&src_root, &dest_root, skip.as_deref())
    })
    .await
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;

    for dir in &dirs {
        tokio::fs::create_dir_all(dir).await?;
    }
    for (from, to) in &files {
        copy_file(from, to).await?;
    }
    Ok(files.len())
}

type TreePlan = (Vec<PathBuf>, Vec<(PathBuf, PathBuf)>);

/// Directories to create and (source, target) file pairs under `src`.
fn list_tree(src: &Path, dest: &Path, skip: Option<&Path>) -> std::io::Result<TreePlan> {
    let mut dirs: Vec<PathBuf> = vec![dest.to_path_buf()];
    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if skip == Some(entry.path()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            dirs.push(target);
        } else {
            files.push((entry.into_path(), target));
        }
    }
    Ok((dirs, files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clean_dir_preserves_git() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        std::fs::create_dir_all(out.join(".git")).unwrap();
        std::fs::write(out.join(".git").join("HEAD"), "ref").unwrap();
        std::fs::create_dir_all(out.join("fr")).unwrap();
        std::fs::write(out.join("index.html"), "old").unwrap();

        clean_dir(&out, true).await.unwrap();

        assert!(out.join(".git").join("HEAD").exists());
        assert!(!out.join("fr").exists());
        assert!(!out.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_clean_dir_without_preserve_removes_everything() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        std::fs::create_dir_all(out.join(".git")).unwrap();

        clean_dir(&out, false).await.unwrap();

        assert!(out.is_dir());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_clean_dir_creates_missing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("a").join("b");
        clean_dir(&out, true).await.unwrap();
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_copy_dir_recursive_with_skip() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("assets");
        std::fs::create_dir_all(src.join("fonts")).unwrap();
        std::fs::write(src.join("styles.css"), "body{}").unwrap();
        std::fs::write(src.join("logo.svg"), "<svg/>").unwrap();
        std::fs::write(src.join("fonts").join("a.woff"), "font").unwrap();

        let dest = dir.path().join("out");
        let skip = src.join("styles.css");
        let copied = copy_dir_recursive(&src, &dest, Some(&skip)).await.unwrap();

        assert_eq!(copied, 2);
        assert!(dest.join("logo.svg").exists());
        assert!(dest.join("fonts").join("a.woff").exists());
        assert!(!dest.join("styles.css").exists());
    }

    #[tokio::test]
    async fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fr").join("index.html");
        write_file(&path, "<html></html>").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
