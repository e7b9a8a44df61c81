//! deploy-core: installation run
//!
//! Drives a package manager over an ordered package list and reports the
//! packages that failed.

pub mod error;
pub mod installer;
pub mod packages;

pub use error::InstallError;
pub use installer::{Installer, failure_summary};
pub use packages::{DEFAULT_PACKAGES, default_packages};
