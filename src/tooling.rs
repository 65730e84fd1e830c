//! Tooling & Integration Layer
//!
//! Command-line surface used by the host build tool to invoke the plugin.

pub mod cli;

pub use cli::{report_result, Cli, CliContext, Commands};
