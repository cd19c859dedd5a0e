//! Visual Studio toolchain environment capture.
//!
//! `vcvarsall.bat` only mutates the environment of the `cmd.exe` that runs
//! it, so the environment is dumped with `set` and turned into the
//! NUL-separated block ninja's `msvc` tool reads via `-e`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tgn_config::TargetCpu;

use crate::{ActionError, Result};

/// Variables the MSVC toolchain actually depends on
const TOOLCHAIN_KEYS: &[&str] = &[
    "INCLUDE",
    "LIB",
    "LIBPATH",
    "PATH",
    "PATHEXT",
    "SYSTEMROOT",
    "TEMP",
    "TMP",
    "UCRTVERSION",
    "UNIVERSALCRTSDKDIR",
    "VCINSTALLDIR",
    "VCTOOLSINSTALLDIR",
    "VSINSTALLDIR",
    "WINDOWSSDKDIR",
    "WINDOWSSDKVERSION",
];

/// Argument for `vcvarsall.bat` that sets up an x64-hosted cross toolchain
/// for `cpu`. Returns `None` for CPUs MSVC has no toolchain for here.
pub fn vcvars_arch(cpu: TargetCpu) -> Option<&'static str> {
    match cpu {
        TargetCpu::X86 => Some("amd64_x86"),
        TargetCpu::X64 => Some("amd64"),
        TargetCpu::Arm64 => Some("amd64_arm64"),
        TargetCpu::Arm => None,
    }
}

/// Parses `set` output (`KEY=VALUE` per line) into a map keyed by the
/// upper-cased variable name. Lines without `=` are banner noise.
pub fn parse_set_output(output: &str) -> BTreeMap<String, String> {
    output
        .lines()
        .filter_map(|line| line.trim_end_matches('\r').split_once('='))
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_ascii_uppercase(), v.to_string()))
        .collect()
}

/// Keeps only the variables listed in [`TOOLCHAIN_KEYS`]
pub fn toolchain_env(env: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    env.iter()
        .filter(|(k, _)| TOOLCHAIN_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// `KEY=VALUE\0KEY=VALUE\0\0`
pub fn env_block(env: &BTreeMap<String, String>) -> Vec<u8> {
    let mut block = Vec::new();
    for (k, v) in env {
        block.extend_from_slice(k.as_bytes());
        block.push(b'=');
        block.extend_from_slice(v.as_bytes());
        block.push(0);
    }
    block.push(0);
    block
}

/// Writes the environment block to `path`
///
/// # Errors
///
/// Returns an I/O error if the file can't be written.
pub fn write_env_block(path: &Path, env: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ActionError::io(parent))?;
    }
    fs::write(path, env_block(env)).map_err(ActionError::io(path))
}

/// Runs `vcvarsall.bat <arch>` and returns the resulting environment
///
/// # Errors
///
/// Fails if `vcvarsall.bat` is missing or exits with an error.
#[cfg(windows)]
pub fn capture(vcvarsall: &Path, arch: &str) -> Result<BTreeMap<String, String>> {
    use std::os::windows::process::CommandExt;
    use std::process::Command;

    if !vcvarsall.exists() {
        return Err(ActionError::MissingSource(vcvarsall.to_path_buf()));
    }

    let script = format!("\"\"{}\" {arch} && set\"", vcvarsall.display());
    let output = Command::new("cmd")
        .args(["/s", "/c"])
        .raw_arg(script)
        .output()
        .map_err(|source| ActionError::Spawn {
            program: vcvarsall.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ActionError::CommandFailed {
            program: vcvarsall.display().to_string(),
            status: output.status.to_string(),
        });
    }

    Ok(parse_set_output(&String::from_utf8_lossy(&output.stdout)))
}

/// # Errors
///
/// Always fails: `vcvarsall.bat` needs `cmd.exe`.
#[cfg(not(windows))]
pub fn capture(vcvarsall: &Path, _arch: &str) -> Result<BTreeMap<String, String>> {
    Err(ActionError::Unsupported(format!(
        "{} can only be run on a Windows host",
        vcvarsall.display()
    )))
}
