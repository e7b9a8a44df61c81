//! Error types for deploy-pkg

use deploy_exec::error::ExecError;
use thiserror::Error;

/// Errors that can occur during package operations
#[derive(Error, Debug, Clone)]
pub enum PackageError {
    /// Package name the package manager would misinterpret
    #[error("invalid package name: {0:?}")]
    InvalidName(String),

    /// The package manager could not be run at all
    #[error("execution error: {0}")]
    ExecutionError(#[from] ExecError),
}

impl PackageError {
    /// Check if the package manager itself could not be launched
    #[must_use]
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, PackageError::ExecutionError(e) if e.is_spawn())
    }
}
