//! Package list installed when no configuration overrides it

use deploy_pkg::types::PackageName;

pub const DEFAULT_PACKAGES: &[&str] = &[
    "binwalk",
    "gdb",
    "lib32stdc++6",
    "lib32z1",
    "libpam-cracklib",
    "netcat",
    "nmap",
    "python2.7",
    "socat",
    "tcpflow",
    "upx",
];

#[must_use]
pub fn default_packages() -> Vec<PackageName> {
    DEFAULT_PACKAGES.iter().copied().map(PackageName::new).collect()
}
