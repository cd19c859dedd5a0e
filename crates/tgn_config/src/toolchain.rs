use camino::{Utf8Path, Utf8PathBuf};

use crate::{ConfigError, slash_path, utf8_path};

/// Name of the directory bundling `gn`, `ninja` and the shared build files
pub const GNFILES_DIR: &str = ".gnfiles";

/// Host flavours that ship their own `gn`/`ninja` binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    Mac,
    LinuxArm64,
    LinuxX64,
}

impl HostPlatform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            HostPlatform::Windows
        } else if cfg!(target_os = "macos") {
            HostPlatform::Mac
        } else {
            Self::linux_for_arch(std::env::consts::ARCH)
        }
    }

    fn linux_for_arch(arch: &str) -> Self {
        match arch {
            "arm64" | "aarch64" => HostPlatform::LinuxArm64,
            _ => HostPlatform::LinuxX64,
        }
    }

    fn bin_subdir(self) -> &'static str {
        match self {
            HostPlatform::Windows => "win",
            HostPlatform::Mac => "mac",
            HostPlatform::LinuxArm64 => "linux/arm64",
            HostPlatform::LinuxX64 => "linux/x64",
        }
    }

    fn exe_suffix(self) -> &'static str {
        if self == HostPlatform::Windows {
            ".exe"
        } else {
            ""
        }
    }
}

/// Locations of the bundled tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    home: Utf8PathBuf,
    gn: Utf8PathBuf,
    ninja: Utf8PathBuf,
}

impl Toolchain {
    /// `.gnfiles/` next to the running executable
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path can't be determined.
    pub fn default_home() -> Result<Utf8PathBuf, ConfigError> {
        let exe = std::env::current_exe().map_err(ConfigError::InstallDir)?;
        let exe = exe.canonicalize().map_err(ConfigError::InstallDir)?;
        let exe = utf8_path(exe)?;
        let dir = exe.parent().unwrap_or_else(|| Utf8Path::new("."));
        Ok(dir.join(GNFILES_DIR))
    }

    /// Resolves the binaries under `home` for `host`.
    ///
    /// # Errors
    ///
    /// Returns an error if `home` can't be made absolute.
    pub fn resolve(home: &Utf8Path, host: HostPlatform) -> Result<Self, ConfigError> {
        let home = crate::absolute(home)?;
        let bin = home.join("bin").join(host.bin_subdir());
        let suffix = host.exe_suffix();

        Ok(Self {
            gn: slash_path(&bin.join(format!("gn{suffix}"))),
            ninja: slash_path(&bin.join(format!("ninja{suffix}"))),
            home,
        })
    }

    pub fn home(&self) -> &Utf8Path {
        &self.home
    }

    pub fn gn(&self) -> &Utf8Path {
        &self.gn
    }

    pub fn ninja(&self) -> &Utf8Path {
        &self.ninja
    }

    /// Shared `.gn` dotfile that projects link to
    pub fn dot_gn(&self) -> Utf8PathBuf {
        self.home.join(".gn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_arch_detection() {
        assert_eq!(HostPlatform::linux_for_arch("aarch64"), HostPlatform::LinuxArm64);
        assert_eq!(HostPlatform::linux_for_arch("arm64"), HostPlatform::LinuxArm64);
        assert_eq!(HostPlatform::linux_for_arch("x86_64"), HostPlatform::LinuxX64);
        assert_eq!(HostPlatform::linux_for_arch("riscv64"), HostPlatform::LinuxX64);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_per_host() {
        let home = Utf8PathBuf::from("/opt/tgn/.gnfiles");

        let tc = Toolchain::resolve(&home, HostPlatform::LinuxX64).unwrap();
        assert_eq!(tc.gn().as_str(), "/opt/tgn/.gnfiles/bin/linux/x64/gn");
        assert_eq!(tc.ninja().as_str(), "/opt/tgn/.gnfiles/bin/linux/x64/ninja");

        let tc = Toolchain::resolve(&home, HostPlatform::LinuxArm64).unwrap();
        assert_eq!(tc.gn().as_str(), "/opt/tgn/.gnfiles/bin/linux/arm64/gn");

        let tc = Toolchain::resolve(&home, HostPlatform::Mac).unwrap();
        assert_eq!(tc.ninja().as_str(), "/opt/tgn/.gnfiles/bin/mac/ninja");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_windows_adds_exe_suffix() {
        let home = Utf8PathBuf::from("/opt/tgn/.gnfiles");
        let tc = Toolchain::resolve(&home, HostPlatform::Windows).unwrap();
        assert_eq!(tc.gn().as_str(), "/opt/tgn/.gnfiles/bin/win/gn.exe");
        assert_eq!(tc.ninja().as_str(), "/opt/tgn/.gnfiles/bin/win/ninja.exe");
        assert_eq!(tc.dot_gn().as_str(), "/opt/tgn/.gnfiles/.gn");
    }

    #[test]
    fn test_default_home_is_next_to_executable() {
        let home = Toolchain::default_home().unwrap();
        assert_eq!(home.file_name(), Some(GNFILES_DIR));
    }
}
