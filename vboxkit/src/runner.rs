//! Process invocation seam for the client.

use std::process::Command;

use tracing::debug;

use crate::error::Result;

/// Captured output streams and exit status of one tool invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Exit status (-1 if the process was terminated by a signal)
    pub status: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl RunOutput {
    /// A zero-status output carrying `stdout`.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A non-zero-status output carrying `stderr`.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Seam between the command layer and the operating system.
///
/// The client drives every invocation through this trait, so tests can
/// substitute a scripted runner ([`crate::mock::MockRunner`]) for the real
/// process spawner.
pub trait CommandRunner: Send + Sync {
    /// Run `binary` with `args` and capture both output streams.
    fn run(&self, binary: &str, args: &[String]) -> Result<RunOutput>;
}

/// Runner that spawns the real binary.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, binary: &str, args: &[String]) -> Result<RunOutput> {
        debug!(binary, ?args, "Invoking external tool");

        let output = Command::new(binary).args(args).output()?;

        Ok(RunOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_output_constructors() {
        let ok = RunOutput::success("out");
        assert_eq!(ok.status, 0);
        assert_eq!(ok.stdout, "out");
        assert!(ok.stderr.is_empty());

        let err = RunOutput::failure(1, "boom");
        assert_eq!(err.status, 1);
        assert_eq!(err.stderr, "boom");
    }
}
