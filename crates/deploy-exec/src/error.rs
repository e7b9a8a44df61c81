//! Error types for deploy-exec

use thiserror::Error;

/// Errors that can occur while running a local command
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// The program could not be started (missing binary, permissions)
    #[error("failed to spawn {program}: {message}")]
    Spawn {
        /// Program that was being launched
        program: String,
        /// Underlying OS error
        message: String,
    },

    /// I/O error while waiting for the child process
    #[error("I/O error while waiting for {program}: {message}")]
    Wait {
        /// Program that was running
        program: String,
        /// Underlying OS error
        message: String,
    },

    /// Command line with no program
    #[error("empty command line")]
    EmptyCommand,
}

impl ExecError {
    /// Check if the error happened before the child ever ran
    #[must_use]
    pub fn is_spawn(&self) -> bool {
        matches!(self, ExecError::Spawn { .. } | ExecError::EmptyCommand)
    }
}
