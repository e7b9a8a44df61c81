//! Type definitions for package management

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PackageError;

/// Name of an OS package as the package manager knows it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Wrap a package name without validation
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Package name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PackageName {
    type Error = PackageError;

    /// Rejects names that the package manager would misread: empty names,
    /// names containing whitespace, and names starting with `-` (options).
    fn try_from(name: String) -> Result<Self, Self::Error> {
        if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
            return Err(PackageError::InvalidName(name));
        }
        Ok(Self(name))
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a single install invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallAttempt {
    /// Package that was installed
    pub package: PackageName,
    /// Exit status reported by the package manager
    pub status: i32,
    /// Time the package manager took
    pub duration: Duration,
}

impl InstallAttempt {
    /// Whether the package manager exited with status 0
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status == 0
    }
}

/// Package manager type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageManagerType {
    /// APT (Debian/Ubuntu)
    #[default]
    Apt,
    /// DNF (Fedora/RHEL)
    Dnf,
}

impl fmt::Display for PackageManagerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageManagerType::Apt => write!(f, "apt"),
            PackageManagerType::Dnf => write!(f, "dnf"),
        }
    }
}
