use std::ffi::OsString;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tgn_config::{
    HostPlatform, ProjectConfig, Target, Toolchain, project, slash_path, utf8_path,
};

use crate::{Cli, commands::BuildCommand, runner::Runner};

/// Everything a command handler needs, resolved once from the CLI
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub command: BuildCommand,
    /// Target as typed after `COMMAND:`, possibly empty
    pub build_target: String,
    pub target: Target,
    pub toolchain: Toolchain,
    pub host: HostPlatform,
    /// Project root; tools run here
    pub root: Utf8PathBuf,
    /// `<out-dir>/<os>/<cpu>`, absolute
    pub out_dir: Utf8PathBuf,
    pub out_file: Option<String>,
    pub extra_args: Vec<String>,
    pub project: ProjectConfig,
    /// Extra environment for every child process
    pub env: Vec<(String, OsString)>,
    pub verbose: bool,
}

impl BuildContext {
    /// Resolves the context against the current directory
    ///
    /// # Errors
    ///
    /// Fails on an unsupported OS/CPU pair, an unreadable project config or
    /// when the output directory can't be created.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = utf8_path(std::env::current_dir().context("Failed to read current directory")?)?;
        let home = match &cli.gnfiles_dir {
            Some(dir) => dir.clone(),
            None => Toolchain::default_home()?,
        };
        Self::resolve(cli, &root, &home, HostPlatform::current())
    }

    /// # Errors
    ///
    /// See [`BuildContext::from_cli`].
    pub fn resolve(
        cli: &Cli,
        root: &Utf8Path,
        gnfiles_home: &Utf8Path,
        host: HostPlatform,
    ) -> Result<Self> {
        let target = Target::new(cli.target_os, cli.target_cpu, cli.build_type);
        target.validate()?;

        let base = if cli.out_dir.is_absolute() {
            cli.out_dir.clone()
        } else {
            root.join(&cli.out_dir)
        };
        let out_dir = target.out_dir(&base)?;
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create output directory {out_dir}"))?;

        let toolchain = Toolchain::resolve(gnfiles_home, host)?;
        let project = ProjectConfig::load(root)?;
        let env = project.child_env(root, std::env::var_os("PYTHONPATH"))?;

        Ok(Self {
            command: cli.command.command,
            build_target: cli.command.target.clone(),
            target,
            toolchain,
            host,
            root: root.to_owned(),
            out_dir,
            out_file: cli.out_file.clone(),
            extra_args: cli.extra_args.clone(),
            project,
            env,
            verbose: cli.verbose > 0,
        })
    }

    pub fn runner(&self) -> Runner {
        Runner::new(&self.root, self.env.clone(), self.verbose)
    }

    /// `--root=<project>` with forward slashes, as gn expects
    pub fn root_arg(&self) -> String {
        format!("--root={}", slash_path(&self.root))
    }

    pub fn out_dir_arg(&self) -> String {
        slash_path(&self.out_dir).into_string()
    }

    /// `-d keeprsp` for debug builds so response files survive for inspection
    pub fn keeprsp_args(&self) -> &'static [&'static str] {
        if self.target.build_type.is_debug() {
            &["-d", "keeprsp"]
        } else {
            &[]
        }
    }

    /// The target in the form ninja accepts: gn's leading `//` dropped
    pub fn ninja_target(&self) -> Option<&str> {
        let t = self.build_target.trim_start_matches("//");
        (!t.is_empty()).then_some(t)
    }

    /// The target as typed, for gn commands that take a label
    pub fn gn_label(&self) -> Option<&str> {
        (!self.build_target.is_empty()).then_some(self.build_target.as_str())
    }

    pub fn build_ninja(&self) -> Utf8PathBuf {
        self.out_dir.join("build.ninja")
    }

    pub fn is_generated(&self) -> bool {
        self.build_ninja().exists()
    }

    /// Lines of `PROJECTCONFIG.gn` for `args.gn`
    ///
    /// # Errors
    ///
    /// Fails if the file exists but can't be read.
    pub fn project_gn_args(&self) -> Result<Vec<String>> {
        Ok(project::project_gn_args(&self.root)?)
    }
}
