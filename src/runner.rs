//! External command execution.
//!
//! The orchestrator only sees [`CommandRunner`]; [`ProcessRunner`] is the
//! implementation that actually shells out to the Go toolchain.

use crate::error::ModError;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Runs one module operation (`tidy`, `vendor`) and relays its output.
pub trait CommandRunner {
    /// Run `operation`, writing the tool's combined stdout/stderr to `out`.
    ///
    /// Returns [`ModError::ExternalToolFailure`] on non-zero exit and
    /// [`ModError::LaunchFailure`] when the process cannot be started.
    fn run(&self, operation: &str, out: &mut dyn Write) -> Result<(), ModError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, operation: &str, out: &mut dyn Write) -> Result<(), ModError> {
        (**self).run(operation, out)
    }
}

/// Runs `<program> <base_args..> <operation>` in a working directory.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: OsString,
    base_args: Vec<OsString>,
    working_dir: PathBuf,
}

impl ProcessRunner {
    /// `go mod <operation>` using the given Go binary.
    pub fn go_mod(go_binary: impl Into<OsString>, working_dir: impl Into<PathBuf>) -> Self {
        Self::new(go_binary, ["mod"], working_dir)
    }

    pub fn new<I, S>(program: impl Into<OsString>, base_args: I, working_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            base_args: base_args.into_iter().map(Into::into).collect(),
            working_dir: working_dir.into(),
        }
    }

    fn command_line(&self, operation: &str) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.base_args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.push(operation.to_string());
        parts.join(" ")
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, operation: &str, out: &mut dyn Write) -> Result<(), ModError> {
        let command_line = self.command_line(operation);
        let relay_error = |source: io::Error| ModError::OutputRelay {
            command: command_line.clone(),
            source,
        };
        let launch_error = |source: io::Error| ModError::LaunchFailure {
            command: command_line.clone(),
            source,
        };
        let wait_error = |source: io::Error| ModError::WaitFailure {
            command: command_line.clone(),
            source,
        };

        // stdout and stderr share one pipe so the sink sees bytes in write order.
        let (mut reader, writer) = io::pipe().map_err(launch_error)?;
        let writer_err = writer.try_clone().map_err(launch_error)?;

        tracing::debug!(command = %command_line, dir = %self.working_dir.display(), "Running external command");

        let mut child = {
            let mut cmd = Command::new(&self.program);
            cmd.args(&self.base_args)
                .arg(operation)
                .current_dir(&self.working_dir)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(writer_err);
            cmd.spawn().map_err(launch_error)?
            // `cmd` drops here, closing our copies of the write end.
        };

        let relayed = io::copy(&mut reader, out).and_then(|_| out.flush());
        // Close the read end so a child still writing gets EPIPE instead of
        // blocking on a full pipe once the sink has failed.
        drop(reader);
        let status = child.wait().map_err(wait_error)?;
        if let Err(e) = relayed {
            tracing::info!(command = %command_line, status = %status, "Output relay failed");
            return Err(relay_error(e));
        }

        if status.success() {
            tracing::debug!(command = %command_line, "External command succeeded");
            Ok(())
        } else {
            tracing::info!(command = %command_line, status = %status, "External command failed");
            Err(ModError::ExternalToolFailure)
        }
    }
}
