//! Error types
//!
//! Every failure is terminal: the first error aborts the remaining steps and is
//! reported to the caller as a single human-readable line.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which tracked manifest a mismatch refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manifest {
    GoMod,
    GoSum,
}

impl Manifest {
    /// File name of the manifest directly under the project root.
    pub fn file_name(self) -> &'static str {
        match self {
            Manifest::GoMod => "go.mod",
            Manifest::GoSum => "go.sum",
        }
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Error)]
pub enum ModError {
    /// The external tool could not be started at all.
    #[error("failed to execute command {command}: {source}")]
    LaunchFailure {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool exited unsuccessfully. Its own diagnostics already
    /// went to the output sink, so the message is intentionally empty.
    #[error("")]
    ExternalToolFailure,

    #[error("failed to wait for {command}: {source}")]
    WaitFailure {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to relay output of {command}: {source}")]
    OutputRelay {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not exist", .path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{manifest} modified")]
    ManifestMismatch { manifest: Manifest },

    #[error("vendor directory {}", presence_change(.created))]
    VendorPresenceMismatch { created: bool },

    #[error("vendor directory modified:\n{diff}")]
    VendorContentMismatch { diff: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ModError {
    fn from(err: config::ConfigError) -> Self {
        ModError::Config(err.to_string())
    }
}

fn presence_change(created: &bool) -> &'static str {
    if *created {
        "created"
    } else {
        "removed"
    }
}

impl ModError {
    pub(crate) fn read_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ModError::ReadFailure {
            path: path.into(),
            source,
        }
    }
}
