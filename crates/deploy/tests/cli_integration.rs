#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Stand-in for apt: fails every package whose name starts with "bad"
const FAKE_APT: &str = "#!/bin/sh
case \"$2\" in
  bad*) exit 100 ;;
esac
exit 0
";

fn write_fake_apt(dir: &TempDir) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let bin = dir.path().join("bin");
    fs::create_dir_all(&bin)?;
    let apt = bin.join("apt");
    fs::write(&apt, FAKE_APT)?;
    fs::set_permissions(&apt, fs::Permissions::from_mode(0o755))?;
    Ok(bin)
}

fn write_config(dir: &TempDir, packages: &[&str]) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let list: Vec<String> = packages.iter().map(|p| format!("\"{p}\"")).collect();
    let content = format!(
        "[install]\npackages = [{}]\n\n[logging]\ndirectory = \"{}\"\n",
        list.join(", "),
        dir.path().join("logs").display()
    );
    let path = dir.path().join("deploy.toml");
    fs::write(&path, content)?;
    Ok(path)
}

fn log_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir.join("logs"))
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| {
                    let name = p.file_name().unwrap_or_default().to_string_lossy();
                    name.starts_with("deployment-") && name.ends_with(".log")
                })
                .collect()
        })
        .unwrap_or_default()
}

fn deploy(
    dir: &TempDir,
    path_env: &Path,
    config: &Path,
) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("deploy")?;
    cmd.current_dir(dir.path())
        .env("PATH", path_env)
        .env_remove("DEPLOY_CONFIG")
        .arg("--config")
        .arg(config);
    Ok(cmd)
}

#[test]
fn all_packages_installed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let bin = write_fake_apt(&dir)?;
    let config = write_config(&dir, &["gdb", "nmap"])?;

    deploy(&dir, &bin, &config)?
        .assert()
        .success()
        .stdout(predicate::str::contains("INFO     [+] Installing package gdb ..."))
        .stdout(predicate::str::contains("Installing package nmap ..."))
        .stdout(predicate::str::contains("failed to install").not())
        .stdout(predicate::str::contains("\x1b[").not());

    assert_eq!(log_files(dir.path()).len(), 1);
    Ok(())
}

#[test]
fn failures_are_summarised_and_exit_non_zero() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let bin = write_fake_apt(&dir)?;
    let config = write_config(&dir, &["gdb", "bad-one", "nmap", "bad-two"])?;

    deploy(&dir, &bin, &config)?
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ERROR    [*] Failed to install bad-one. (100)"))
        .stdout(predicate::str::contains("Failed to install bad-two. (100)"))
        .stdout(predicate::str::contains(
            "The following packages failed to install:\n-- bad-one\n-- bad-two",
        ))
        .stdout(predicate::str::contains("DEBUG").not());

    let logs = log_files(dir.path());
    assert_eq!(logs.len(), 1);

    let content = fs::read_to_string(&logs[0])?;
    assert!(content.contains("DEBUG"));
    assert!(content.contains("Executing command: apt install gdb -y"));
    assert!(content.contains("Failed to install bad-one. (100)"));
    assert!(!content.contains('\x1b'));
    Ok(())
}

#[test]
fn missing_package_manager_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let empty = dir.path().join("empty");
    fs::create_dir_all(&empty)?;
    let config = write_config(&dir, &["gdb", "nmap"])?;

    deploy(&dir, &empty, &config)?
        .assert()
        .failure()
        .stdout(predicate::str::contains("CRITICAL [!] Cannot launch package manager"))
        .stdout(predicate::str::contains("Installing package nmap").not())
        .stderr(predicate::str::contains("cannot launch package manager"));
    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let bin = write_fake_apt(&dir)?;
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[install]\npackages = [\"-y\"]\n")?;

    deploy(&dir, &bin, &config)?
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));

    assert!(log_files(dir.path()).is_empty());
    Ok(())
}
