//! CLI Tooling
//!
//! Command-line interface invoked by the host build tool. The host passes the
//! project directory and, during its verify run, `--verify`.

use crate::config::{ConfigLoader, ModConfig};
use crate::error::ModError;
use crate::gomod::{ModOperation, VerifyOptions};
use crate::plugin_info::PluginInfo;
use crate::runner::{CommandRunner, ProcessRunner};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable whose tokens select vendor mode.
pub const GOFLAGS_ENV: &str = "GOFLAGS";

/// Exit code reported for any failure.
pub const EXIT_FAILURE: u8 = 1;

/// mod-plugin CLI - keeps Go module state up to date
#[derive(Parser)]
#[command(name = "mod-plugin")]
#[command(about = "Runs 'go mod tidy' followed by 'go mod vendor' for a project")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Configuration file path (overrides project config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ensures that the go module state for the project is up-to-date
    #[command(
        long_about = "Executes \"go mod tidy\" followed by \"go mod vendor\" to ensure that the module state for the repository is\n\
                      up-to-date. When run in verification mode, fails if either operation resulted in project state being modified."
    )]
    Mod {
        /// verify that go module state is up-to-date
        #[arg(long)]
        verify: bool,
    },
    /// Print plugin metadata as JSON
    #[command(name = "_pluginInfo", hide = true)]
    PluginInfo,
}

/// CLI context: project location plus configuration resolved once per invocation.
pub struct CliContext {
    project_dir: PathBuf,
    config: ModConfig,
    options: VerifyOptions,
}

impl CliContext {
    /// Create a new CLI context, loading config and reading GOFLAGS once.
    pub fn new(project_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ModError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&project_dir)?,
        };
        let goflags = std::env::var(GOFLAGS_ENV).unwrap_or_default();
        Ok(Self::with_config(project_dir, config, &goflags))
    }

    /// Create a context from already-resolved configuration.
    pub fn with_config(project_dir: PathBuf, config: ModConfig, goflags: &str) -> Self {
        let options = config.verify_options(goflags);
        Self {
            project_dir: dunce::canonicalize(&project_dir).unwrap_or(project_dir),
            config,
            options,
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn config(&self) -> &ModConfig {
        &self.config
    }

    pub fn options(&self) -> VerifyOptions {
        self.options
    }

    /// Execute a CLI command, streaming output to `out`.
    pub fn execute(&self, command: &Commands, out: &mut dyn Write) -> Result<(), ModError> {
        match command {
            Commands::Mod { verify } => {
                let runner = ProcessRunner::go_mod(&self.config.go_binary, &self.project_dir);
                self.run_mod(runner, *verify, out)
            }
            Commands::PluginInfo => {
                let relay_error = |source: std::io::Error| ModError::OutputRelay {
                    command: "_pluginInfo".to_string(),
                    source,
                };
                serde_json::to_writer(&mut *out, &PluginInfo::current())
                    .map_err(|e| relay_error(e.into()))?;
                writeln!(out).map_err(relay_error)
            }
        }
    }

    /// Run the module operation with a specific runner.
    pub fn run_mod<R: CommandRunner>(
        &self,
        runner: R,
        verify: bool,
        out: &mut dyn Write,
    ) -> Result<(), ModError> {
        tracing::debug!(
            project = %self.project_dir.display(),
            verify,
            vendor = self.options.vendor,
            "Running mod task"
        );
        ModOperation::new(runner, self.options).run(&self.project_dir, verify, out)
    }
}

/// Write the final `Error: <message>` line for a failed result and pick the exit code.
///
/// An empty message (external tool failure) writes nothing: the tool's own
/// diagnostics are already in `out`.
pub fn report_result(result: Result<(), ModError>, out: &mut dyn Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            let message = e.to_string();
            if !message.is_empty() {
                let _ = writeln!(out, "Error: {}", message);
            }
            let _ = out.flush();
            EXIT_FAILURE
        }
    }
}
