//! deploy
//!
//! Installs a fixed list of OS packages, one package manager call each,
//! logging to the console and to a per-run log file

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use color_eyre::Result;
use deploy_core::Installer;
use deploy_exec::local::LocalExecutor;
use eyre::WrapErr;
use tracing::debug;

mod config;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "deploy", version)]
#[command(about = "Install the provisioning package list on this host", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $DEPLOY_CONFIG, ./deploy.toml, /etc/deploy/deploy.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let started = Local::now();
    let loaded = Config::locate(cli.config.as_deref())?;
    let config = loaded.config;

    let session = deploy_log::init(&config.logging.to_log_config()?, started)
        .wrap_err("failed to initialize logging")?;

    debug!(
        path = %session.path.display(),
        color = session.color.is_enabled(),
        "logging initialized"
    );
    match &loaded.source {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file found, using defaults"),
    }

    let executor = Arc::new(LocalExecutor::new());
    let manager = deploy_pkg::manager_for(config.install.manager, executor, config.install.sudo);
    let installer = Installer::new(manager);

    let failures = installer.run(&config.install.packages).await?;

    // Failed packages were already reported by the installer
    if failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
