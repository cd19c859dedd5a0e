use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TargetOs {
    #[value(name = "win")]
    Win,
    #[value(name = "mac")]
    Mac,
    #[value(name = "linux")]
    Linux,
}

impl TargetOs {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetOs::Win => "win",
            TargetOs::Mac => "mac",
            TargetOs::Linux => "linux",
        }
    }

    /// CPUs that have a working toolchain for this OS
    pub fn supported_cpus(self) -> &'static [TargetCpu] {
        match self {
            TargetOs::Win => &[TargetCpu::X86, TargetCpu::X64, TargetCpu::Arm64],
            TargetOs::Linux => &[
                TargetCpu::X86,
                TargetCpu::X64,
                TargetCpu::Arm,
                TargetCpu::Arm64,
            ],
            TargetOs::Mac => &[TargetCpu::X64, TargetCpu::Arm64],
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TargetCpu {
    #[value(name = "x86")]
    X86,
    #[value(name = "x64")]
    X64,
    #[value(name = "arm")]
    Arm,
    #[value(name = "arm64")]
    Arm64,
}

impl TargetCpu {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetCpu::X86 => "x86",
            TargetCpu::X64 => "x64",
            TargetCpu::Arm => "arm",
            TargetCpu::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for TargetCpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum BuildType {
    #[value(name = "debug")]
    Debug,
    #[value(name = "release")]
    Release,
}

impl BuildType {
    pub fn is_debug(self) -> bool {
        self == BuildType::Debug
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Debug => f.write_str("debug"),
            BuildType::Release => f.write_str("release"),
        }
    }
}

/// The `<os> <cpu> <build-type>` triple a build is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub os: TargetOs,
    pub cpu: TargetCpu,
    pub build_type: BuildType,
}

impl Target {
    pub fn new(os: TargetOs, cpu: TargetCpu, build_type: BuildType) -> Self {
        Self {
            os,
            cpu,
            build_type,
        }
    }

    /// Checks the OS/CPU pair against the supported matrix
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedArch`] when the CPU can't be built
    /// for the OS.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.os.supported_cpus().contains(&self.cpu) {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedArch {
                os: self.os,
                cpu: self.cpu,
            })
        }
    }

    /// Output directory for this target: `<base>/<os>/<cpu>`, made absolute.
    /// Debug and release share a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory can't be resolved.
    pub fn out_dir(&self, base: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
        crate::absolute(&base.join(self.os.as_str()).join(self.cpu.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_supported_pairs() {
        for (os, cpu) in [
            (TargetOs::Win, TargetCpu::X86),
            (TargetOs::Win, TargetCpu::Arm64),
            (TargetOs::Linux, TargetCpu::Arm),
            (TargetOs::Mac, TargetCpu::X64),
            (TargetOs::Mac, TargetCpu::Arm64),
        ] {
            assert!(Target::new(os, cpu, BuildType::Debug).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_unsupported_pairs() {
        let err = Target::new(TargetOs::Mac, TargetCpu::X86, BuildType::Release)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Can not build arch with name x86 in OS mac");

        assert!(
            Target::new(TargetOs::Win, TargetCpu::Arm, BuildType::Debug)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_out_dir_appends_os_and_cpu() {
        let target = Target::new(TargetOs::Linux, TargetCpu::Arm64, BuildType::Release);
        let out = target.out_dir(Utf8Path::new("out")).unwrap();
        assert!(out.is_absolute());
        assert!(out.ends_with("out/linux/arm64"));
    }

    #[test]
    fn test_value_enum_names() {
        use clap::ValueEnum;

        assert_eq!(TargetCpu::from_str("arm64", false), Ok(TargetCpu::Arm64));
        assert_eq!(TargetOs::from_str("win", false), Ok(TargetOs::Win));
        assert_eq!(BuildType::from_str("release", false), Ok(BuildType::Release));
        assert!(TargetOs::from_str("windows", false).is_err());
    }
}
