//! Manifest checksums for `go.mod` and `go.sum`.

use crate::checksum::hasher;
use crate::error::{Manifest, ModError};
use crate::types::Hash;
use std::io;
use std::path::Path;

/// Digest of an optional manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestDigest {
    Absent,
    Present(Hash),
}

/// Digests of the module-definition file and the lock file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestPairDigest {
    pub go_mod: Hash,
    pub go_sum: ManifestDigest,
}

impl ManifestPairDigest {
    /// Hash `go.mod` (required) and `go.sum` (optional) directly under `project_dir`.
    pub fn compute(project_dir: &Path) -> Result<Self, ModError> {
        let go_mod_path = project_dir.join(Manifest::GoMod.file_name());
        let go_mod = match hasher::hash_file(&go_mod_path) {
            Ok(hash) => hash,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ModError::MissingFile { path: go_mod_path });
            }
            Err(e) => return Err(ModError::read_failure(go_mod_path, e)),
        };

        let go_sum_path = project_dir.join(Manifest::GoSum.file_name());
        let go_sum = match hasher::hash_file(&go_sum_path) {
            Ok(hash) => ManifestDigest::Present(hash),
            Err(e) if e.kind() == io::ErrorKind::NotFound => ManifestDigest::Absent,
            Err(e) => return Err(ModError::read_failure(go_sum_path, e)),
        };

        Ok(ManifestPairDigest { go_mod, go_sum })
    }

    /// The first manifest that differs between `self` (before) and `after`.
    ///
    /// `go.mod` is checked before `go.sum`.
    pub fn changed_manifest(&self, after: &ManifestPairDigest) -> Option<Manifest> {
        if self.go_mod != after.go_mod {
            Some(Manifest::GoMod)
        } else if self.go_sum != after.go_sum {
            Some(Manifest::GoSum)
        } else {
            None
        }
    }

    /// Fail with the manifest-specific mismatch error if anything changed.
    pub fn verify_unchanged(&self, after: &ManifestPairDigest) -> Result<(), ModError> {
        match self.changed_manifest(after) {
            Some(manifest) => Err(ModError::ManifestMismatch { manifest }),
            None => Ok(()),
        }
    }
}
