//! mod-plugin: Go module state maintenance
//!
//! Runs `go mod tidy` and, in vendor mode, `go mod vendor` for a project. In
//! verification mode the run fails if either operation changed `go.mod`,
//! `go.sum` or the vendor tree.

pub mod checksum;
pub mod config;
pub mod error;
pub mod gomod;
pub mod logging;
pub mod manifest;
pub mod plugin_info;
pub mod runner;
pub mod tooling;
pub mod types;

pub use error::ModError;
pub use gomod::{ModOperation, VerifyOptions};
