//! APT package manager (Debian/Ubuntu)

use std::sync::Arc;

use async_trait::async_trait;
use deploy_exec::result::CommandLine;
use deploy_exec::traits::CommandExecutor;
use tracing::instrument;

use crate::error::PackageError;
use crate::traits::PackageManager;
use crate::types::{InstallAttempt, PackageManagerType, PackageName};

/// APT package manager implementation
pub struct AptManager {
    /// Executor for running commands
    executor: Arc<dyn CommandExecutor>,
    /// Whether to use sudo
    use_sudo: bool,
}

impl AptManager {
    /// Create a new APT manager
    ///
    /// # Arguments
    /// * `executor` - Executor for running apt commands
    /// * `use_sudo` - Whether to prefix commands with sudo
    pub fn new(executor: Arc<dyn CommandExecutor>, use_sudo: bool) -> Self {
        Self { executor, use_sudo }
    }

    /// Build apt command with optional sudo
    fn apt_cmd<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = CommandLine::new("apt").args(args);
        if self.use_sudo { cmd.with_sudo() } else { cmd }
    }
}

#[async_trait]
impl PackageManager for AptManager {
    fn install_command(&self, package: &PackageName) -> CommandLine {
        // -y keeps apt from blocking on the confirmation prompt
        self.apt_cmd(["install", package.as_str(), "-y"])
    }

    #[instrument(skip(self), fields(package = %package))]
    async fn install(&self, package: &PackageName) -> Result<InstallAttempt, PackageError> {
        let cmd = self.install_command(package);
        let result = self.executor.run(&cmd).await?;

        Ok(InstallAttempt {
            package: package.clone(),
            status: result.status,
            duration: result.duration,
        })
    }

    fn manager_type(&self) -> PackageManagerType {
        PackageManagerType::Apt
    }
}
