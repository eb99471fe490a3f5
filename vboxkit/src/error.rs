//! Error types for VBoxManage invocations and output parsing.

use thiserror::Error;

/// Errors that can occur while invoking VBoxManage or parsing its output.
#[derive(Error, Debug)]
pub enum ManageError {
    /// VBoxManage reported a non-zero exit status.
    ///
    /// Carries the full invocation context: exit status, the command line
    /// that was run, and both captured output streams.
    #[error("VBoxManage exited with status {status}: {command}")]
    CommandFailed {
        /// Exit status reported by the process (-1 if terminated by signal).
        status: i32,
        /// The command line that was executed.
        command: String,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// Captured output did not match the expected grammar.
    ///
    /// Never recovered locally; propagates to the caller with no partial
    /// result.
    #[error("Failed to parse VBoxManage output: {0}")]
    ParseFailed(String),

    /// The VBoxManage binary could not be executed at all.
    #[error("Failed to run VBoxManage: {0}")]
    Spawn(#[from] std::io::Error),

    /// An operation was invoked without a required selector.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),
}

/// Result type alias for VBoxManage operations.
pub type Result<T> = std::result::Result<T, ManageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let err = ManageError::CommandFailed {
            status: 1,
            command: "VBoxManage createvm --name taco".to_string(),
            stdout: String::new(),
            stderr: "VBoxManage: error: Machine settings file exists".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("status 1"));
        assert!(msg.contains("createvm --name taco"));
    }

    #[test]
    fn test_parse_failed_display() {
        let err = ManageError::ParseFailed("expected 'UUID:' anchor".to_string());
        assert!(err.to_string().contains("UUID:"));
    }
}
