//! Directory Checksums
//!
//! Point-in-time snapshots of a directory tree (relative path -> content
//! digest) and the before/after comparison used to detect whether an external
//! tool touched the tree.

pub mod diff;
pub mod hasher;
pub mod walker;

pub use diff::{ChangeKind, ChecksumChange, ChecksumDiff};
pub use walker::PathFilter;

use crate::error::ModError;
use crate::types::{hash_hex, Hash};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Content digest of one file, keyed by its root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub path: String,
    pub hash: Hash,
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", hash_hex(&self.hash), self.path)
    }
}

/// Digests of every matching regular file under a root, taken at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumSnapshot {
    entries: BTreeMap<String, FileDigest>,
}

impl ChecksumSnapshot {
    /// Hash every file under `root` that passes `filter`.
    ///
    /// `root` must exist; use [`DirectoryScan::scan`] when it may not.
    pub fn compute(root: &Path, filter: Option<PathFilter<'_>>) -> Result<Self, ModError> {
        let files = walker::walk_files(root, filter)?;
        let mut entries = BTreeMap::new();
        for file in files {
            let hash = hasher::hash_file(&file.path)
                .map_err(|e| ModError::read_failure(&file.path, e))?;
            entries.insert(
                file.relative_path.clone(),
                FileDigest {
                    path: file.relative_path,
                    hash,
                },
            );
        }
        tracing::debug!(
            root = %root.display(),
            files = entries.len(),
            "Computed directory checksums"
        );
        Ok(ChecksumSnapshot { entries })
    }

    /// Build a snapshot from precomputed digests. Later duplicates win.
    pub fn from_digests(digests: impl IntoIterator<Item = FileDigest>) -> Self {
        ChecksumSnapshot {
            entries: digests
                .into_iter()
                .map(|d| (d.path.clone(), d))
                .collect(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&FileDigest> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> &BTreeMap<String, FileDigest> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Changes going from `self` (before) to `after`.
    pub fn diff(&self, after: &ChecksumSnapshot) -> ChecksumDiff {
        ChecksumDiff::between(self, after)
    }
}

/// Result of scanning a directory that may not exist.
///
/// "Never created" and "created but empty" are different outcomes, so absence
/// is not folded into an empty snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryScan {
    Absent,
    Present(ChecksumSnapshot),
}

impl DirectoryScan {
    pub fn scan(root: &Path, filter: Option<PathFilter<'_>>) -> Result<Self, ModError> {
        match std::fs::metadata(root) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(DirectoryScan::Absent),
            Err(e) => Err(ModError::read_failure(root, e)),
            Ok(meta) if !meta.is_dir() => Err(ModError::read_failure(
                root,
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            )),
            Ok(_) => Ok(DirectoryScan::Present(ChecksumSnapshot::compute(
                root, filter,
            )?)),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, DirectoryScan::Present(_))
    }

    pub fn snapshot(&self) -> Option<&ChecksumSnapshot> {
        match self {
            DirectoryScan::Absent => None,
            DirectoryScan::Present(snapshot) => Some(snapshot),
        }
    }
}

/// Whether a directory existed before and after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorPresence {
    AbsentBeforeAndAfter,
    PresentBeforeAndAfter,
    /// `created` is true when the directory appeared, false when it vanished.
    ChangedExistence { created: bool },
}

impl VendorPresence {
    pub fn between(before: &DirectoryScan, after: &DirectoryScan) -> Self {
        match (before.is_present(), after.is_present()) {
            (false, false) => VendorPresence::AbsentBeforeAndAfter,
            (true, true) => VendorPresence::PresentBeforeAndAfter,
            (before_present, _) => VendorPresence::ChangedExistence {
                created: !before_present,
            },
        }
    }
}
