use std::ffi::OsString;
use std::fs;

use camino::Utf8Path;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Per-project settings file, looked up in the project root
pub const CONFIG_FILE: &str = ".tgnconfig.json";

/// Extra `gn` args appended to every generated `args.gn`
pub const PROJECT_ARGS_FILE: &str = "PROJECTCONFIG.gn";

pub const DEFAULT_NINJA_STATUS: &str = "[%f/%t](%r) ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directories (relative to the project root) prepended to the
    /// project's python scripts search path
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_pythonpath: Vec<String>,

    /// Overrides ninja's progress line format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ninja_status: Option<String>,
}

impl ProjectConfig {
    /// Loads `.tgnconfig.json` from `root`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load(root: &Utf8Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let cfg = serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        debug!("Loaded project config from {path}");

        Ok(cfg)
    }

    pub fn ninja_status(&self) -> &str {
        self.ninja_status.as_deref().unwrap_or(DEFAULT_NINJA_STATUS)
    }

    /// `PYTHONPATH` for child processes: the current value followed by the
    /// configured extra entries resolved against `root`. `None` when nothing
    /// extra is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry contains the platform path separator.
    pub fn pythonpath(
        &self,
        root: &Utf8Path,
        current: Option<OsString>,
    ) -> Result<Option<OsString>, ConfigError> {
        if self.extra_pythonpath.is_empty() {
            return Ok(None);
        }

        let mut entries: Vec<std::path::PathBuf> = current
            .filter(|c| !c.is_empty())
            .map(|c| std::env::split_paths(&c).collect())
            .unwrap_or_default();
        entries.extend(
            self.extra_pythonpath
                .iter()
                .map(|p| root.join(p).into_std_path_buf()),
        );

        Ok(Some(std::env::join_paths(entries)?))
    }

    /// Environment applied to every `gn`/`ninja` invocation
    ///
    /// # Errors
    ///
    /// Returns an error if `PYTHONPATH` can't be assembled.
    pub fn child_env(
        &self,
        root: &Utf8Path,
        current_pythonpath: Option<OsString>,
    ) -> Result<Vec<(String, OsString)>, ConfigError> {
        let mut env = vec![("NINJA_STATUS".to_string(), self.ninja_status().into())];
        if let Some(pp) = self.pythonpath(root, current_pythonpath)? {
            env.push(("PYTHONPATH".to_string(), pp));
        }
        Ok(env)
    }
}

/// Reads the trimmed lines of `PROJECTCONFIG.gn` in `root`, if present
///
/// # Errors
///
/// Returns an error if the file exists but can't be read.
pub fn project_gn_args(root: &Utf8Path) -> Result<Vec<String>, ConfigError> {
    let path = root.join(PROJECT_ARGS_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents =
        fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
    Ok(contents.lines().map(|l| l.trim().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let cfg: ProjectConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ProjectConfig::default());
        assert_eq!(cfg.ninja_status(), DEFAULT_NINJA_STATUS);
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let cfg: ProjectConfig =
            serde_json::from_str(r#"{"extra_pythonpath": ["tools"], "other": 1}"#).unwrap();
        assert_eq!(cfg.extra_pythonpath, vec!["tools".to_string()]);
    }

    #[test]
    fn test_pythonpath_none_without_extras() {
        let cfg = ProjectConfig::default();
        let pp = cfg
            .pythonpath(Utf8Path::new("/proj"), Some("/usr/lib/py".into()))
            .unwrap();
        assert!(pp.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_pythonpath_appends_to_current() {
        let cfg = ProjectConfig {
            extra_pythonpath: vec!["tools".into(), "build/py".into()],
            ninja_status: None,
        };

        let pp = cfg
            .pythonpath(Utf8Path::new("/proj"), Some("/usr/lib/py".into()))
            .unwrap()
            .unwrap();
        assert_eq!(pp, OsString::from("/usr/lib/py:/proj/tools:/proj/build/py"));

        let pp = cfg.pythonpath(Utf8Path::new("/proj"), None).unwrap().unwrap();
        assert_eq!(pp, OsString::from("/proj/tools:/proj/build/py"));

        let pp = cfg
            .pythonpath(Utf8Path::new("/proj"), Some(OsString::new()))
            .unwrap()
            .unwrap();
        assert_eq!(pp, OsString::from("/proj/tools:/proj/build/py"));
    }

    #[test]
    fn test_child_env_sets_ninja_status() {
        let cfg = ProjectConfig {
            extra_pythonpath: vec![],
            ninja_status: Some("[%p] ".into()),
        };
        let env = cfg.child_env(Utf8Path::new("/proj"), None).unwrap();
        assert_eq!(env, vec![("NINJA_STATUS".to_string(), OsString::from("[%p] "))]);
    }
}
