//! `tgn-action`: the file helpers gn `action()` targets call into.

use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use tgn_actions::{CopyOptions, Mapping, vs_env};
use tgn_config::TargetCpu;

use crate::utils;

#[derive(Debug, Parser)]
#[command(name = "tgn-action")]
#[command(version)]
#[command(about = "File helpers for gn action() targets")]
#[command(after_help = "EXAMPLES:\n  \
    tgn-action copy res/icons gen/icons --preserve-mtime\n  \
    tgn-action glob-map --root src --pattern '**/*.json' --dest gen/data --copy\n  \
    tgn-action depfile gen/app.d gen/app.bin src/a.txt src/b.txt\n  \
    tgn-action compiler-version clang++\n\
")]
#[command(styles = utils::styles::get_styles())]
pub struct ActionCli {
    #[command(subcommand)]
    pub command: ActionCommand,

    /// No logging except for errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Verbose logging (-v) or trace logging (-vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum ActionCommand {
    /// Copy a file or directory tree
    Copy(CopyArgs),

    /// Map files matching a glob under a root onto a destination dir
    #[command(long_about = "Walks --root and maps every file whose root-relative path matches \
--pattern to the same relative path under --dest. Prints 'source<TAB>dest' per file unless \
--copy is given.")]
    GlobMap(GlobMapArgs),

    /// Create files or bump their modification time
    Touch(TouchArgs),

    /// Write a Makefile-style depfile
    Depfile(DepfileArgs),

    /// Update a marker file when any input is newer
    Stamp(StampArgs),

    /// Print the version a compiler reports
    CompilerVersion(CompilerVersionArgs),

    /// Capture the Visual Studio toolchain environment (Windows hosts)
    #[command(long_about = "Runs vcvarsall.bat for the target CPU and writes the toolchain \
variables as a NUL-separated environment block for ninja's msvc tool.")]
    VsEnv(VsEnvArgs),
}

#[derive(Debug, Args)]
pub struct CopyArgs {
    pub src: Utf8PathBuf,
    pub dst: Utf8PathBuf,

    /// Keep the source modification time
    #[arg(long)]
    pub preserve_mtime: bool,
}

#[derive(Debug, Args)]
pub struct GlobMapArgs {
    #[arg(long)]
    pub root: Utf8PathBuf,

    /// '*' stays in one path segment, '**' crosses segments, '?' is one char
    #[arg(long)]
    pub pattern: String,

    #[arg(long)]
    pub dest: Utf8PathBuf,

    /// Copy the matched files instead of listing them
    #[arg(long, conflicts_with = "json")]
    pub copy: bool,

    /// List the mapping as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TouchArgs {
    #[arg(required = true)]
    pub paths: Vec<Utf8PathBuf>,
}

#[derive(Debug, Args)]
pub struct DepfileArgs {
    /// Depfile to write
    pub depfile: Utf8PathBuf,
    /// Build output the dependencies belong to
    pub output: String,
    pub inputs: Vec<String>,
}

#[derive(Debug, Args)]
pub struct StampArgs {
    pub marker: Utf8PathBuf,
    pub inputs: Vec<Utf8PathBuf>,
}

#[derive(Debug, Args)]
pub struct CompilerVersionArgs {
    pub compiler: Utf8PathBuf,

    /// Arguments instead of --version
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Args)]
pub struct VsEnvArgs {
    #[arg(long)]
    pub vcvarsall: Utf8PathBuf,

    #[arg(long, value_enum)]
    pub cpu: TargetCpu,

    /// Environment block to write
    #[arg(long)]
    pub out: Utf8PathBuf,
}

/// Lists a glob mapping one `source\tdest` pair per line, or as JSON
///
/// # Errors
///
/// Fails only if JSON serialization fails.
pub fn render_mappings(mappings: &[Mapping], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(mappings)?);
    }
    Ok(mappings
        .iter()
        .map(|m| format!("{}\t{}", m.source.display(), m.dest.display()))
        .collect::<Vec<_>>()
        .join("\n"))
}

impl ActionCli {
    #[allow(clippy::missing_errors_doc)]
    pub fn handle(&self) -> Result<()> {
        match &self.command {
            ActionCommand::Copy(args) => {
                let copied = tgn_actions::copy(
                    args.src.as_std_path(),
                    args.dst.as_std_path(),
                    CopyOptions {
                        preserve_mtime: args.preserve_mtime,
                    },
                )?;
                debug!("Copied {copied} file(s) from {} to {}", args.src, args.dst);
            }
            ActionCommand::GlobMap(args) => glob_map(args)?,
            ActionCommand::Touch(args) => {
                for path in &args.paths {
                    tgn_actions::touch(path.as_std_path())?;
                }
            }
            ActionCommand::Depfile(args) => {
                tgn_actions::write_depfile(
                    args.depfile.as_std_path(),
                    &args.output,
                    args.inputs.as_slice(),
                )?;
            }
            ActionCommand::Stamp(args) => {
                let updated =
                    tgn_actions::stamp(args.marker.as_std_path(), args.inputs.as_slice())?;
                debug!(
                    "{} {}",
                    args.marker,
                    if updated { "updated" } else { "up to date" }
                );
            }
            ActionCommand::CompilerVersion(args) => {
                let version =
                    tgn_actions::compiler_version(args.compiler.as_std_path(), &args.args)?;
                println!("{version}");
            }
            ActionCommand::VsEnv(args) => vs_env_block(args)?,
        }
        Ok(())
    }
}

fn glob_map(args: &GlobMapArgs) -> Result<()> {
    let mappings = tgn_actions::glob_map(
        args.root.as_std_path(),
        &args.pattern,
        args.dest.as_std_path(),
    )?;

    if !args.copy {
        let listing = render_mappings(&mappings, args.json)?;
        if !listing.is_empty() {
            println!("{listing}");
        }
        return Ok(());
    }

    for m in &mappings {
        tgn_actions::copy(&m.source, &m.dest, CopyOptions::default())?;
    }
    info!("Copied {} file(s) to {}", mappings.len(), args.dest);
    Ok(())
}

fn vs_env_block(args: &VsEnvArgs) -> Result<()> {
    let Some(arch) = vs_env::vcvars_arch(args.cpu) else {
        bail!("MSVC has no toolchain for cpu '{}'", args.cpu);
    };

    let env = vs_env::capture(args.vcvarsall.as_std_path(), arch)
        .with_context(|| format!("Failed to set up the {arch} toolchain"))?;
    let env = vs_env::toolchain_env(&env);
    vs_env::write_env_block(args.out.as_std_path(), &env)?;

    debug!("Wrote {} variable(s) to {}", env.len(), args.out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_action_cli_definition_is_valid() {
        ActionCli::command().debug_assert();
    }

    #[test]
    fn test_parse_glob_map() {
        let cli = ActionCli::try_parse_from([
            "tgn-action",
            "glob-map",
            "--root",
            "src",
            "--pattern",
            "**/*.json",
            "--dest",
            "gen",
            "--copy",
        ])
        .unwrap();
        let ActionCommand::GlobMap(args) = cli.command else {
            panic!("expected glob-map");
        };
        assert_eq!(args.pattern, "**/*.json");
        assert!(args.copy);
        assert!(!args.json);
    }

    #[test]
    fn test_copy_and_json_conflict() {
        let res = ActionCli::try_parse_from([
            "tgn-action", "glob-map", "--root", "a", "--pattern", "*", "--dest", "b", "--copy",
            "--json",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_parse_compiler_version_passthrough() {
        let cli =
            ActionCli::try_parse_from(["tgn-action", "compiler-version", "cl.exe", "--", "/?"])
                .unwrap();
        let ActionCommand::CompilerVersion(args) = cli.command else {
            panic!("expected compiler-version");
        };
        assert_eq!(args.compiler, "cl.exe");
        assert_eq!(args.args, vec!["/?"]);
    }

    #[test]
    fn test_render_mappings() {
        let mappings = vec![
            Mapping {
                source: PathBuf::from("src/a.json"),
                dest: PathBuf::from("gen/a.json"),
            },
            Mapping {
                source: PathBuf::from("src/sub/b.json"),
                dest: PathBuf::from("gen/sub/b.json"),
            },
        ];

        assert_eq!(
            render_mappings(&mappings, false).unwrap(),
            "src/a.json\tgen/a.json\nsrc/sub/b.json\tgen/sub/b.json"
        );

        let json: serde_json::Value =
            serde_json::from_str(&render_mappings(&mappings, true).unwrap()).unwrap();
        assert_eq!(json[1]["dest"], "gen/sub/b.json");
        assert!(render_mappings(&[], false).unwrap().is_empty());
    }

    #[test]
    fn test_vs_env_rejects_arm() {
        let cli = ActionCli::try_parse_from([
            "tgn-action",
            "vs-env",
            "--vcvarsall",
            "vcvarsall.bat",
            "--cpu",
            "arm",
            "--out",
            "env.x86",
        ])
        .unwrap();
        let err = cli.handle().unwrap_err();
        assert_eq!(err.to_string(), "MSVC has no toolchain for cpu 'arm'");
    }

    #[test]
    fn test_depfile_and_stamp_through_cli() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tgn_config::utf8_path(tmp.path()).unwrap();
        let input = dir.join("in.txt");
        std::fs::write(&input, "x").unwrap();

        ActionCli::try_parse_from([
            "tgn-action",
            "depfile",
            dir.join("out.d").as_str(),
            "gen/out.bin",
            input.as_str(),
        ])
        .unwrap()
        .handle()
        .unwrap();
        let depfile = std::fs::read_to_string(dir.join("out.d")).unwrap();
        assert!(depfile.starts_with("gen/out.bin: "));

        let marker = dir.join("gen/out.stamp");
        ActionCli::try_parse_from(["tgn-action", "stamp", marker.as_str(), input.as_str()])
            .unwrap()
            .handle()
            .unwrap();
        assert!(marker.exists());
    }
}
