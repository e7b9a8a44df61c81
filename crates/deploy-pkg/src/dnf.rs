//! DNF package manager (Fedora/RHEL/CentOS)

use std::sync::Arc;

use async_trait::async_trait;
use deploy_exec::result::CommandLine;
use deploy_exec::traits::CommandExecutor;
use tracing::instrument;

use crate::error::PackageError;
use crate::traits::PackageManager;
use crate::types::{InstallAttempt, PackageManagerType, PackageName};

/// DNF package manager implementation
pub struct DnfManager {
    executor: Arc<dyn CommandExecutor>,
    use_sudo: bool,
}

impl DnfManager {
    /// Create a new DNF manager
    pub fn new(executor: Arc<dyn CommandExecutor>, use_sudo: bool) -> Self {
        Self { executor, use_sudo }
    }
}

#[async_trait]
impl PackageManager for DnfManager {
    fn install_command(&self, package: &PackageName) -> CommandLine {
        let cmd = CommandLine::new("dnf").args(["install", package.as_str(), "-y"]);
        if self.use_sudo { cmd.with_sudo() } else { cmd }
    }

    #[instrument(skip(self), fields(package = %package))]
    async fn install(&self, package: &PackageName) -> Result<InstallAttempt, PackageError> {
        let result = self.executor.run(&self.install_command(package)).await?;

        Ok(InstallAttempt {
            package: package.clone(),
            status: result.status,
            duration: result.duration,
        })
    }

    fn manager_type(&self) -> PackageManagerType {
        PackageManagerType::Dnf
    }
}
