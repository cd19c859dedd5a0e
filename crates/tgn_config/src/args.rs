use std::fmt::Write as _;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use crate::{ConfigError, Target};

pub const ARGS_FILE: &str = "args.gn";

/// Contents of the generated `args.gn`
#[derive(Debug, Clone)]
pub struct GnArgs {
    pub target: Target,
    /// Lines from `PROJECTCONFIG.gn`, written as-is
    pub project: Vec<String>,
    /// Arguments given after `--` on the command line
    pub extra: Vec<String>,
}

impl GnArgs {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            project: Vec::new(),
            extra: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_project(mut self, project: Vec<String>) -> Self {
        self.project = project;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "target_os = \"{}\"", self.target.os);
        let _ = writeln!(out, "target_cpu = \"{}\"", self.target.cpu);
        let _ = writeln!(out, "is_debug = {}", self.target.build_type.is_debug());

        for line in &self.project {
            let _ = writeln!(out, "{line}");
        }
        // shells make double quotes awkward, so extra args spell them '#'
        for arg in &self.extra {
            let _ = writeln!(out, "{}", arg.replace('#', "\""));
        }

        out
    }

    /// Writes `<out_dir>/args.gn`, creating `out_dir` if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file can't be written.
    pub fn write(&self, out_dir: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
        fs::create_dir_all(out_dir).map_err(|source| ConfigError::Io {
            path: out_dir.to_owned(),
            source,
        })?;

        let path = out_dir.join(ARGS_FILE);
        fs::write(&path, self.render()).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {path}");

        Ok(path)
    }
}
