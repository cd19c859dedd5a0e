use std::path::PathBuf;

use camino::Utf8PathBuf;

use crate::target::{TargetCpu, TargetOs};

/// Errors raised while assembling the build configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The CPU is not buildable for the requested OS
    #[error("Can not build arch with name {cpu} in OS {os}")]
    UnsupportedArch { os: TargetOs, cpu: TargetCpu },
    /// A path could not be represented as UTF-8
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    /// Filesystem failure on a specific path
    #[error("{path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// `.tgnconfig.json` exists but is not valid
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The directory holding the `tgn` executable could not be found
    #[error("cannot locate the tgn install directory: {0}")]
    InstallDir(#[source] std::io::Error),
    /// An `extra_pythonpath` entry contains the platform path separator
    #[error("invalid PYTHONPATH entry: {0}")]
    PythonPath(#[from] std::env::JoinPathsError),
}
