// SPDX-License-Identifier: MIT

use fc_core::error::{Error, Result};

/// Package-manager families the installer knows how to drive. Out of
/// scope per §1 non-goals ("does not define the agent-side runtime") is
/// the original's full per-distro command table; this is a small enum
/// dispatch covering the package managers each family uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Debian,
    RedHat,
    Arch,
    Unknown,
}

fc_core::simple_display!(TargetOs {
    Debian => "debian",
    RedHat => "redhat",
    Arch => "arch",
    Unknown => "unknown",
});

impl TargetOs {
    /// Classify a distro id as reported by `/etc/os-release`'s `ID` (or
    /// `ID_LIKE`) field.
    pub fn from_distro_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "debian" | "ubuntu" | "raspbian" | "linuxmint" => Self::Debian,
            "rhel" | "centos" | "fedora" | "rocky" | "almalinux" => Self::RedHat,
            "arch" | "manjaro" => Self::Arch,
            _ => Self::Unknown,
        }
    }

    /// The shell command that installs a local package file for this
    /// family, given a path the binary was already uploaded to.
    pub fn package_install_command(&self, package_path: &str) -> Result<String> {
        match self {
            Self::Debian => Ok(format!("dpkg -i {package_path}")),
            Self::RedHat => Ok(format!("rpm -U {package_path}")),
            Self::Arch => Ok(format!("pacman -U --noconfirm {package_path}")),
            Self::Unknown => Err(Error::unavailable(
                "no package install routine for this distro",
            )),
        }
    }
}

/// Parsed `uname -m` output, mapped to the architecture names the rest of
/// the system uses (matching Go's `GOARCH`-shaped strings).
pub fn normalize_arch(uname_m: &str) -> String {
    match uname_m.trim() {
        "x86_64" => "amd64".to_string(),
        "aarch64" | "arm64" => "arm64".to_string(),
        "armv7l" => "arm".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "os_detect_tests.rs"]
mod tests;
