//! Package manager traits

use async_trait::async_trait;
use deploy_exec::result::CommandLine;

use crate::error::PackageError;
use crate::types::{InstallAttempt, PackageManagerType, PackageName};

#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Command line that installs `package` without prompting
    fn install_command(&self, package: &PackageName) -> CommandLine;

    /// Install one package and report the exit status
    ///
    /// # Errors
    /// Returns `PackageError` only when the package manager could not be
    /// run. A non-zero exit status is reported through `InstallAttempt`.
    async fn install(&self, package: &PackageName) -> Result<InstallAttempt, PackageError>;

    fn manager_type(&self) -> PackageManagerType;
}
