//! Core error types for deploy-core

use deploy_pkg::error::PackageError;
use deploy_pkg::types::PackageName;
use thiserror::Error;

/// Errors that stop an installation run
///
/// A package that fails to install is not an error; it ends up in the
/// failure list returned by `Installer::run`.
#[derive(Error, Debug, Clone)]
pub enum InstallError {
    /// The package manager binary could not be started
    #[error("cannot launch package manager while installing {package}: {source}")]
    Launch {
        /// Package being installed when the launch failed
        package: PackageName,
        /// Underlying error
        source: PackageError,
    },

    /// The package manager started but could not be waited on
    #[error("package manager error while installing {package}: {source}")]
    Execution {
        /// Package being installed
        package: PackageName,
        /// Underlying error
        source: PackageError,
    },
}

impl InstallError {
    /// Package that was being installed when the run stopped
    #[must_use]
    pub fn package(&self) -> &PackageName {
        match self {
            InstallError::Launch { package, .. } | InstallError::Execution { package, .. } => {
                package
            }
        }
    }
}
