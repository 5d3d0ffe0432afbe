use anyhow::Result;
use std::borrow::Cow;
use std::path::Path;

use crate::cfg::Platform;
use crate::proc;
use crate::ui;

/// Package managers recognized as top-level config keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    AptGet,
    Brew,
    Pacman,
}

impl PackageManager {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "apt-get" => Some(PackageManager::AptGet),
            "brew" => Some(PackageManager::Brew),
            "pacman" => Some(PackageManager::Pacman),
            _ => None,
        }
    }

    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::AptGet => "apt-get",
            PackageManager::Brew => "brew",
            PackageManager::Pacman => "pacman",
        }
    }

    /// The platform this manager is expected on. Installs are skipped
    /// elsewhere even when the binary happens to exist.
    pub fn platform(self) -> Platform {
        match self {
            PackageManager::AptGet | PackageManager::Pacman => Platform::Linux,
            PackageManager::Brew => Platform::Macos,
        }
    }

    fn install_command(self, packages: &str) -> String {
        match self {
            PackageManager::Pacman => format!("sudo pacman -S {}", packages),
            PackageManager::AptGet => {
                format!("sudo apt-get update && sudo apt-get install {}", packages)
            }
            PackageManager::Brew => format!("brew update && brew install {}", packages),
        }
    }
}

/// Install packages with the given manager. Silently skipped when the list
/// is empty, the platform does not match, or the manager binary is absent.
pub fn install_system_packages(
    manager: PackageManager,
    packages: &[String],
    platform: Platform,
    cwd: &Path,
) -> Result<()> {
    if packages.is_empty() || manager.platform() != platform {
        return Ok(());
    }

    if !proc::program_exists(manager.binary()) {
        return Ok(());
    }

    let joined = packages
        .iter()
        .map(|package| shell_escape::escape(Cow::from(package.as_str())).into_owned())
        .collect::<Vec<_>>()
        .join(" ");

    ui::info(&format!(
        "Installing {} package(s) with {}",
        packages.len(),
        manager.binary()
    ));

    proc::run_command(&manager.install_command(&joined), cwd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_managers() {
        assert_eq!(PackageManager::from_key("apt-get"), Some(PackageManager::AptGet));
        assert_eq!(PackageManager::from_key("brew"), Some(PackageManager::Brew));
        assert_eq!(PackageManager::from_key("pacman"), Some(PackageManager::Pacman));
        assert_eq!(PackageManager::from_key("link"), None);
        assert_eq!(PackageManager::from_key("yum"), None);
    }

    #[test]
    fn managers_are_gated_to_their_platform() {
        assert_eq!(PackageManager::AptGet.platform(), Platform::Linux);
        assert_eq!(PackageManager::Pacman.platform(), Platform::Linux);
        assert_eq!(PackageManager::Brew.platform(), Platform::Macos);
    }

    #[test]
    fn install_commands_update_then_install() {
        assert_eq!(
            PackageManager::Pacman.install_command("vim zsh"),
            "sudo pacman -S vim zsh"
        );
        assert_eq!(
            PackageManager::AptGet.install_command("vim-nox"),
            "sudo apt-get update && sudo apt-get install vim-nox"
        );
        assert_eq!(
            PackageManager::Brew.install_command("macvim"),
            "brew update && brew install macvim"
        );
    }
}
