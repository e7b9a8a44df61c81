//! deploy-pkg: Package manager abstraction
//!
//! Provides the `PackageManager` trait and implementations for apt and dnf

use std::sync::Arc;

use deploy_exec::traits::CommandExecutor;

pub mod apt;
pub mod dnf;
pub mod error;
pub mod traits;
pub mod types;

use crate::apt::AptManager;
use crate::dnf::DnfManager;
use crate::traits::PackageManager;
use crate::types::PackageManagerType;

/// Build the package manager of the given type
pub fn manager_for(
    kind: PackageManagerType,
    executor: Arc<dyn CommandExecutor>,
    use_sudo: bool,
) -> Arc<dyn PackageManager> {
    match kind {
        PackageManagerType::Apt => Arc::new(AptManager::new(executor, use_sudo)),
        PackageManagerType::Dnf => Arc::new(DnfManager::new(executor, use_sudo)),
    }
}
