//! Directory enumeration for checksum snapshots.

use crate::error::ModError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Predicate over a root-relative, `/`-separated path.
pub type PathFilter<'a> = &'a dyn Fn(&str) -> bool;

/// A file selected for hashing.
#[derive(Debug, Clone)]
pub(crate) struct WalkedFile {
    pub relative_path: String,
    pub path: PathBuf,
}

/// Enumerate every regular file under `root` whose relative path passes `filter`.
///
/// Symlinks are never descended into. A symlink that resolves to a regular
/// file is reported like a file; dangling links and links to directories are
/// skipped.
pub(crate) fn walk_files(
    root: &Path,
    filter: Option<PathFilter<'_>>,
) -> Result<Vec<WalkedFile>, ModError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .min_depth(1)
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ModError::read_failure(path, e.into())
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(target) if target.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(
                        path = %entry.path().display(),
                        error = %e,
                        "Skipping unresolvable symlink"
                    );
                    continue;
                }
            }
        } else if !file_type.is_file() {
            continue;
        }

        let relative_path = relative_path(root, entry.path());
        if let Some(filter) = filter {
            if !filter(&relative_path) {
                continue;
            }
        }

        files.push(WalkedFile {
            relative_path,
            path: entry.into_path(),
        });
    }

    Ok(files)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
