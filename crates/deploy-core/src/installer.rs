//! Sequential package installation with failure collection

use std::sync::Arc;

use deploy_log::critical;
use deploy_pkg::traits::PackageManager;
use deploy_pkg::types::PackageName;
use tracing::{debug, error, info, instrument, warn};

use crate::error::InstallError;

const SUMMARY_HEADER: &str = "The following packages failed to install:";

/// Installs packages one at a time through a package manager
pub struct Installer {
    manager: Arc<dyn PackageManager>,
}

impl Installer {
    pub fn new(manager: Arc<dyn PackageManager>) -> Self {
        Self { manager }
    }

    /// Install every package in order and return the ones that failed
    ///
    /// Each package gets exactly one attempt. The returned list keeps
    /// attempt order. When it is non-empty a single warning summarises it.
    ///
    /// # Errors
    /// Returns `InstallError` when the package manager itself cannot be run;
    /// the remaining packages are not attempted. Failures collected before
    /// that point are still summarised.
    #[instrument(skip_all, fields(manager = %self.manager.manager_type(), count = packages.len()))]
    pub async fn run(&self, packages: &[PackageName]) -> Result<Vec<PackageName>, InstallError> {
        let mut failures = Vec::new();

        for package in packages {
            info!("Installing package {package} ...");

            let attempt = match self.manager.install(package).await {
                Ok(attempt) => attempt,
                Err(e) if e.is_launch_failure() => {
                    critical!("Cannot launch package manager: {e}");
                    report(&failures);
                    return Err(InstallError::Launch {
                        package: package.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    critical!("Package manager failed while installing {package}: {e}");
                    report(&failures);
                    return Err(InstallError::Execution {
                        package: package.clone(),
                        source: e,
                    });
                }
            };

            if attempt.succeeded() {
                debug!(duration = ?attempt.duration, "Installed package {package}");
            } else {
                error!("Failed to install {package}. ({})", attempt.status);
                failures.push(package.clone());
            }
        }

        report(&failures);
        Ok(failures)
    }
}

fn report(failures: &[PackageName]) {
    if let Some(summary) = failure_summary(failures) {
        warn!("{summary}");
    }
}

/// Header line plus one `-- <name>` line per failure; `None` when empty
#[must_use]
pub fn failure_summary(failures: &[PackageName]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(failures.len() + 1);
    lines.push(SUMMARY_HEADER.to_string());
    lines.extend(failures.iter().map(|name| format!("-- {name}")));
    Some(lines.join("\n"))
}
