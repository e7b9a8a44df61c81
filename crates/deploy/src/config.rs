//! Configuration loading and types

use std::path::{Path, PathBuf};

use deploy_core::default_packages;
use deploy_log::LogConfig;
use deploy_pkg::types::{PackageManagerType, PackageName};
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "DEPLOY_CONFIG";

/// Top-level configuration for a deploy run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// What to install and how
    #[serde(default)]
    pub install: InstallConfig,
    /// Sink thresholds and log location
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Package installation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Package manager to invoke
    #[serde(default)]
    pub manager: PackageManagerType,
    /// Prefix package manager commands with sudo
    #[serde(default)]
    pub sudo: bool,
    /// Packages to install, in order
    #[serde(default = "default_packages")]
    pub packages: Vec<PackageName>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            manager: PackageManagerType::default(),
            sudo: false,
            packages: default_packages(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Console threshold (trace, debug, info, warn, error, off)
    #[serde(default = "default_console_level")]
    pub console_level: String,
    /// Log file threshold
    #[serde(default = "default_file_level")]
    pub file_level: String,
    /// Directory for the log file, defaults to the working directory
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: default_console_level(),
            file_level: default_file_level(),
            directory: None,
        }
    }
}

fn default_console_level() -> String {
    "info".to_string()
}

fn default_file_level() -> String {
    "debug".to_string()
}

impl LoggingConfig {
    /// Convert into the logger's settings
    ///
    /// # Errors
    /// Returns error if a level name is not recognised
    pub fn to_log_config(&self) -> eyre::Result<LogConfig> {
        Ok(LogConfig {
            console_level: parse_level(&self.console_level)
                .wrap_err("invalid logging.console_level")?,
            file_level: parse_level(&self.file_level).wrap_err("invalid logging.file_level")?,
            directory: self.directory.clone(),
        })
    }
}

fn parse_level(level: &str) -> eyre::Result<LevelFilter> {
    level
        .parse::<LevelFilter>()
        .map_err(|e| eyre::eyre!("{level:?}: {e}"))
}

/// Configuration together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when no file was found and defaults apply
    pub source: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not valid configuration
    pub fn parse(content: &str) -> eyre::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read config file {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("invalid config file {}", path.display()))
    }

    /// Find and load configuration, falling back to defaults
    ///
    /// Lookup order: `explicit`, `$DEPLOY_CONFIG`, then the default paths.
    ///
    /// # Errors
    /// Returns error if a selected file cannot be read or parsed
    pub fn locate(explicit: Option<&Path>) -> eyre::Result<LoadedConfig> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::locate_with(explicit, from_env, &default_paths())
    }

    fn locate_with(
        explicit: Option<&Path>,
        from_env: Option<PathBuf>,
        candidates: &[PathBuf],
    ) -> eyre::Result<LoadedConfig> {
        // An explicitly named file must exist
        if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
            return Ok(LoadedConfig {
                config: Self::load(&path)?,
                source: Some(path),
            });
        }

        for path in candidates {
            if path.exists() {
                return Ok(LoadedConfig {
                    config: Self::load(path)?,
                    source: Some(path.clone()),
                });
            }
        }

        Ok(LoadedConfig {
            config: Config::default(),
            source: None,
        })
    }
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("deploy.toml"),
        PathBuf::from("/etc/deploy/deploy.toml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("deploy/deploy.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.install.manager, PackageManagerType::Apt);
        assert!(!config.install.sudo);
        assert_eq!(config.install.packages, default_packages());

        let log = config.logging.to_log_config().unwrap();
        assert_eq!(log.console_level, LevelFilter::INFO);
        assert_eq!(log.file_level, LevelFilter::DEBUG);
        assert!(log.directory.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
[install]
manager = "dnf"
sudo = true
packages = ["gdb", "nmap"]

[logging]
console_level = "warn"
file_level = "info"
directory = "/var/log/deploy"
"#,
        )
        .unwrap();

        assert_eq!(config.install.manager, PackageManagerType::Dnf);
        assert!(config.install.sudo);
        assert_eq!(
            config.install.packages,
            vec![PackageName::new("gdb"), PackageName::new("nmap")]
        );

        let log = config.logging.to_log_config().unwrap();
        assert_eq!(log.console_level, LevelFilter::WARN);
        assert_eq!(log.file_level, LevelFilter::INFO);
        assert_eq!(log.directory, Some(PathBuf::from("/var/log/deploy")));
    }

    #[test]
    fn test_empty_package_list_is_allowed() {
        let config = Config::parse("[install]\npackages = []\n").unwrap();
        assert!(config.install.packages.is_empty());
    }

    #[test]
    fn test_rejects_option_like_package() {
        assert!(Config::parse("[install]\npackages = [\"--purge\"]\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_manager() {
        assert!(Config::parse("[install]\nmanager = \"pacman\"\n").is_err());
    }

    #[test]
    fn test_rejects_bad_level() {
        let config = Config::parse("[logging]\nconsole_level = \"loud\"\n").unwrap();
        assert!(config.logging.to_log_config().is_err());
    }

    #[test]
    fn test_locate_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = [dir.path().join("deploy.toml")];

        let loaded = Config::locate_with(None, None, &candidates).unwrap();

        assert!(loaded.source.is_none());
        assert_eq!(loaded.config.install.packages, default_packages());
    }

    #[test]
    fn test_locate_prefers_explicit_over_env() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let env = dir.path().join("env.toml");
        std::fs::write(&explicit, "[install]\npackages = [\"gdb\"]\n").unwrap();
        std::fs::write(&env, "[install]\npackages = [\"upx\"]\n").unwrap();

        let loaded = Config::locate_with(Some(&explicit), Some(env.clone()), &[]).unwrap();
        assert_eq!(loaded.source, Some(explicit));
        assert_eq!(loaded.config.install.packages, vec![PackageName::new("gdb")]);

        let loaded = Config::locate_with(None, Some(env.clone()), &[]).unwrap();
        assert_eq!(loaded.source, Some(env));
        assert_eq!(loaded.config.install.packages, vec![PackageName::new("upx")]);
    }

    #[test]
    fn test_locate_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("present.toml");
        std::fs::write(&present, "[install]\nsudo = true\n").unwrap();

        let loaded = Config::locate_with(None, None, &[missing, present.clone()]).unwrap();

        assert_eq!(loaded.source, Some(present));
        assert!(loaded.config.install.sudo);
    }

    #[test]
    fn test_locate_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(Config::locate_with(Some(&missing), None, &[]).is_err());
    }
}
