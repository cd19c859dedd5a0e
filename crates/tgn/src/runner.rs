use std::{ffi::OsString, fmt, process::Stdio};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use tokio::process::Command;

/// An external tool invocation, built up before it is run so handlers can
/// be checked without spawning anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Stream stdout into this file instead of the terminal
    pub stdout_file: Option<Utf8PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdout_file: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn arg_opt(self, arg: Option<impl Into<String>>) -> Self {
        match arg {
            Some(a) => self.arg(a),
            None => self,
        }
    }

    #[must_use]
    pub fn stdout_to(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.stdout_file = Some(path.into());
        self
    }

    fn name(&self) -> &str {
        Utf8Path::new(&self.program)
            .file_name()
            .unwrap_or(self.program.as_str())
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        if let Some(path) = &self.stdout_file {
            write!(f, " > {path}")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open {path} for output: {source}")]
    Redirect {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with code {code}")]
    Failed { program: String, code: i32 },
    #[error("{program} was terminated by a signal")]
    Killed { program: String },
}

impl RunError {
    /// Process exit code `tgn` should finish with
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Failed { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Spawns tools from the project root with the project environment
#[derive(Debug, Clone)]
pub struct Runner {
    cwd: Utf8PathBuf,
    env: Vec<(String, OsString)>,
    echo: bool,
}

impl Runner {
    pub fn new(cwd: &Utf8Path, env: Vec<(String, OsString)>, echo: bool) -> Self {
        Self {
            cwd: cwd.to_owned(),
            env,
            echo,
        }
    }

    fn command(&self, cmd: &ToolCommand) -> Command {
        if self.echo {
            info!(">>> {cmd}");
        } else {
            debug!(">>> {cmd}");
        }

        let mut command = Command::new(&cmd.program);
        command
            .args(&cmd.args)
            .current_dir(&self.cwd)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_os_str())));
        command
    }

    /// Runs to completion with stdout/stderr streamed through and returns the
    /// exit code (`None` when killed by a signal)
    ///
    /// # Errors
    ///
    /// Fails if the tool can't be spawned or its stdout file can't be created.
    pub async fn status(&self, cmd: &ToolCommand) -> Result<Option<i32>, RunError> {
        let mut command = self.command(cmd);
        if let Some(path) = &cmd.stdout_file {
            let file = std::fs::File::create(path).map_err(|source| RunError::Redirect {
                path: path.clone(),
                source,
            })?;
            command.stdout(Stdio::from(file));
        }

        let status = command.status().await.map_err(|source| RunError::Spawn {
            program: cmd.program.clone(),
            source,
        })?;
        debug!("{} finished with {status}", cmd.name());

        Ok(status.code())
    }

    /// Runs the tool and fails unless it exits with 0
    ///
    /// # Errors
    ///
    /// [`RunError::Failed`] carries the tool's exit code.
    pub async fn run(&self, cmd: &ToolCommand) -> Result<(), RunError> {
        match self.status(cmd).await? {
            Some(0) => Ok(()),
            Some(code) => Err(RunError::Failed {
                program: cmd.name().to_string(),
                code,
            }),
            None => Err(RunError::Killed {
                program: cmd.name().to_string(),
            }),
        }
    }

    /// Runs the tool and only logs a non-zero exit
    ///
    /// # Errors
    ///
    /// Still fails if the tool can't be spawned at all.
    pub async fn run_ignoring_status(&self, cmd: &ToolCommand) -> Result<(), RunError> {
        match self.status(cmd).await? {
            Some(0) => {}
            Some(code) => warn!("{} exited with code {code}, continuing", cmd.name()),
            None => warn!("{} was terminated by a signal, continuing", cmd.name()),
        }
        Ok(())
    }

    /// Runs the tool and returns its stdout without the trailing newline.
    /// A non-zero exit is logged; callers judge the output themselves.
    ///
    /// # Errors
    ///
    /// Fails if the tool can't be spawned.
    pub async fn capture(&self, cmd: &ToolCommand) -> Result<String, RunError> {
        let output = self
            .command(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| RunError::Spawn {
                program: cmd.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!("{} stderr:\n{}", cmd.name(), stderr.trim_end());
        }
        if !output.status.success() {
            warn!("{} exited with {}", cmd.name(), output.status);
        }

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.ends_with('\n') {
            stdout.pop();
            if stdout.ends_with('\r') {
                stdout.pop();
            }
        }
        Ok(stdout)
    }
}
