use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::{ActionError, Result};

static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();

fn version_regex() -> &'static Regex {
    VERSION_REGEX.get_or_init(|| {
        Regex::new(r"\d+(?:\.\d+)+").expect("VERSION_REGEX should be valid")
    })
}

/// First dotted version number in `line`, e.g. `14.0.3` out of
/// `Apple clang version 14.0.3 (clang-1403.0.22.14.1)`
pub fn parse_version(line: &str) -> Option<&str> {
    version_regex().find(line).map(|m| m.as_str())
}

/// First non-empty line of the tool's output. Compilers disagree on which
/// stream the banner goes to, so stdout wins and stderr is the fallback.
fn banner_line(stdout: &str, stderr: &str) -> Option<String> {
    let first = |s: &str| {
        s.lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
    };
    first(stdout).or_else(|| first(stderr))
}

/// Runs `compiler` (with `--version` when `args` is empty) and extracts the
/// version from the first line it prints.
///
/// The exit status is not checked: `cl.exe` prints its banner and exits
/// non-zero when run without inputs.
///
/// # Errors
///
/// Fails if the compiler can't be spawned or its first line carries no
/// version number.
pub fn compiler_version(compiler: &Path, args: &[String]) -> Result<String> {
    let mut cmd = Command::new(compiler);
    if args.is_empty() {
        cmd.arg("--version");
    } else {
        cmd.args(args);
    }

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| ActionError::Spawn {
            program: compiler.display().to_string(),
            source,
        })?;
    debug!("{} exited with {}", compiler.display(), output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = banner_line(&stdout, &stderr).unwrap_or_default();

    parse_version(&line)
        .map(str::to_string)
        .ok_or(ActionError::NoVersion { line })
}
