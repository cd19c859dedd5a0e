//! Build configuration for `tgn`.
//!
//! Everything `tgn` needs to know before it can invoke `gn` or `ninja`:
//! - **Target**: the `<os> <cpu> <build-type>` triple and its validity matrix
//! - **Toolchain**: where the bundled `gn`/`ninja` binaries live for this host
//! - **Project**: `.tgnconfig.json` and `PROJECTCONFIG.gn` from the project root
//! - **Args**: rendering of the generated `args.gn`

pub mod args;
mod error;
pub mod project;
pub mod target;
pub mod toolchain;

use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};

pub use args::GnArgs;
pub use error::ConfigError;
pub use project::ProjectConfig;
pub use target::{BuildType, Target, TargetCpu, TargetOs};
pub use toolchain::{HostPlatform, Toolchain};

/// Converts a std path into a UTF-8 path, failing on anything that isn't
/// representable.
///
/// # Errors
///
/// Returns [`ConfigError::NonUtf8Path`] if the path is not valid UTF-8.
pub fn utf8_path(path: impl AsRef<Path>) -> Result<Utf8PathBuf, ConfigError> {
    let path = path.as_ref();
    Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(ConfigError::NonUtf8Path)
}

/// Makes `path` absolute against the current directory without touching the
/// filesystem, so the result is valid even before the path exists.
///
/// # Errors
///
/// Returns an error if the current directory can't be read or is not UTF-8.
pub fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
    let abs = std::path::absolute(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    utf8_path(abs)
}

/// `gn` only accepts forward slashes in `--root` and friends.
pub fn slash_path(path: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(path.as_str().replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_path_replaces_backslashes() {
        let p = Utf8Path::new(r"C:\work\proj\.gnfiles\bin\win\gn.exe");
        assert_eq!(slash_path(p).as_str(), "C:/work/proj/.gnfiles/bin/win/gn.exe");
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let cwd = utf8_path(std::env::current_dir().unwrap()).unwrap();
        let abs = absolute(&cwd.join("out")).unwrap();
        assert_eq!(abs, cwd.join("out"));
    }

    #[test]
    fn test_absolute_resolves_relative_paths() {
        let cwd = utf8_path(std::env::current_dir().unwrap()).unwrap();
        let abs = absolute(Utf8Path::new("out/linux")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.starts_with(&cwd));
        assert!(abs.ends_with("out/linux"));
    }
}
