//! Module Operation
//!
//! Runs `tidy` followed (in vendor mode) by `vendor`. In verification mode,
//! snapshots `go.mod`/`go.sum` and the vendor tree around each operation and
//! fails if the operation changed anything.
//!
//! Sequence:
//! `Idle -> ManifestSnapshotTaken -> TidyRan -> ManifestVerified ->
//! VendorModeChecked -> [VendorSnapshotTaken -> VendorRan -> VendorVerified] -> Done`.
//! The bracketed part is skipped when vendor mode is off. Every error is
//! terminal; nothing the tool already wrote is rolled back.

use crate::checksum::{DirectoryScan, VendorPresence};
use crate::error::ModError;
use crate::manifest::ManifestPairDigest;
use crate::runner::CommandRunner;
use std::io::Write;
use std::path::Path;

pub const TIDY: &str = "tidy";
pub const VENDOR: &str = "vendor";
pub const VENDOR_DIR: &str = "vendor";

/// GOFLAGS token that turns on vendor mode.
pub const MOD_VENDOR_FLAG: &str = "-mod=vendor";

/// Options fixed when the operation is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Whether `go mod vendor` runs after `go mod tidy`.
    pub vendor: bool,
}

impl VerifyOptions {
    /// Vendor mode is on when any whitespace-separated token of `goflags` is `-mod=vendor`.
    pub fn from_goflags(goflags: &str) -> Self {
        VerifyOptions {
            vendor: goflags.split_whitespace().any(|f| f == MOD_VENDOR_FLAG),
        }
    }
}

/// Progress through one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ManifestSnapshotTaken,
    TidyRan,
    ManifestVerified,
    VendorModeChecked,
    VendorSnapshotTaken,
    VendorRan,
    VendorVerified,
    Done,
}

/// Tidy/vendor sequence over an injectable [`CommandRunner`].
pub struct ModOperation<R> {
    runner: R,
    options: VerifyOptions,
}

impl<R: CommandRunner> ModOperation<R> {
    pub fn new(runner: R, options: VerifyOptions) -> Self {
        Self { runner, options }
    }

    pub fn options(&self) -> VerifyOptions {
        self.options
    }

    /// Run against `project_dir`. With `verify`, any change to tracked state is an error.
    pub fn run(&self, project_dir: &Path, verify: bool, out: &mut dyn Write) -> Result<(), ModError> {
        let mut stage = Stage::Idle;
        let result = self.run_stages(project_dir, verify, out, &mut stage);
        match &result {
            Ok(()) => tracing::info!(project = %project_dir.display(), verify, "Module state up to date"),
            Err(e) => tracing::warn!(
                project = %project_dir.display(),
                verify,
                stage = ?stage,
                error = %e,
                "Module operation failed"
            ),
        }
        result
    }

    fn run_stages(
        &self,
        project_dir: &Path,
        verify: bool,
        out: &mut dyn Write,
        stage: &mut Stage,
    ) -> Result<(), ModError> {
        let manifests_before = if verify {
            let digest = ManifestPairDigest::compute(project_dir)?;
            advance(stage, Stage::ManifestSnapshotTaken);
            Some(digest)
        } else {
            None
        };

        self.runner.run(TIDY, out)?;
        advance(stage, Stage::TidyRan);

        if let Some(before) = manifests_before {
            let after = ManifestPairDigest::compute(project_dir)?;
            before.verify_unchanged(&after)?;
            advance(stage, Stage::ManifestVerified);
        }

        advance(stage, Stage::VendorModeChecked);
        if !self.options.vendor {
            advance(stage, Stage::Done);
            return Ok(());
        }

        let vendor_dir = project_dir.join(VENDOR_DIR);
        let vendor_before = if verify {
            let scan = DirectoryScan::scan(&vendor_dir, None)?;
            advance(stage, Stage::VendorSnapshotTaken);
            Some(scan)
        } else {
            None
        };

        self.runner.run(VENDOR, out)?;
        advance(stage, Stage::VendorRan);

        if let Some(before) = vendor_before {
            let after = DirectoryScan::scan(&vendor_dir, None)?;
            verify_vendor_unchanged(&before, &after)?;
            advance(stage, Stage::VendorVerified);
        }

        advance(stage, Stage::Done);
        Ok(())
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!(from = ?*stage, to = ?next, "Stage transition");
    *stage = next;
}

/// Presence changes are reported before (and instead of) content changes.
fn verify_vendor_unchanged(before: &DirectoryScan, after: &DirectoryScan) -> Result<(), ModError> {
    match VendorPresence::between(before, after) {
        VendorPresence::AbsentBeforeAndAfter => Ok(()),
        VendorPresence::ChangedExistence { created } => {
            Err(ModError::VendorPresenceMismatch { created })
        }
        VendorPresence::PresentBeforeAndAfter => {
            let (Some(before), Some(after)) = (before.snapshot(), after.snapshot()) else {
                return Ok(());
            };
            let diff = before.diff(after);
            if diff.is_empty() {
                Ok(())
            } else {
                Err(ModError::VendorContentMismatch {
                    diff: diff.to_string(),
                })
            }
        }
    }
}
