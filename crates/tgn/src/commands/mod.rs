pub mod build;
pub mod clean;
pub mod desc;
pub mod generate;
pub mod graph;
pub mod inspect;
pub mod query;
pub mod uninstall;

use std::{fmt, str::FromStr};

use anyhow::Result;
use log::debug;

use crate::context::BuildContext;

/// Every command the `COMMAND[:TARGET]` argument accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildCommand {
    Gen,
    Build,
    Rebuild,
    Clean,
    Graph,
    Desc,
    Path,
    Refs,
    Check,
    Args,
    ShowDeps,
    ShowInput,
    ShowInputOutput,
    ExplainBuild,
    Uninstall,
}

impl BuildCommand {
    pub const ALL: [BuildCommand; 15] = [
        BuildCommand::Gen,
        BuildCommand::Build,
        BuildCommand::Rebuild,
        BuildCommand::Clean,
        BuildCommand::Graph,
        BuildCommand::Desc,
        BuildCommand::Path,
        BuildCommand::Refs,
        BuildCommand::Check,
        BuildCommand::Args,
        BuildCommand::ShowDeps,
        BuildCommand::ShowInput,
        BuildCommand::ShowInputOutput,
        BuildCommand::ExplainBuild,
        BuildCommand::Uninstall,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildCommand::Gen => "gen",
            BuildCommand::Build => "build",
            BuildCommand::Rebuild => "rebuild",
            BuildCommand::Clean => "clean",
            BuildCommand::Graph => "graph",
            BuildCommand::Desc => "desc",
            BuildCommand::Path => "path",
            BuildCommand::Refs => "refs",
            BuildCommand::Check => "check",
            BuildCommand::Args => "args",
            BuildCommand::ShowDeps => "show_deps",
            BuildCommand::ShowInput => "show_input",
            BuildCommand::ShowInputOutput => "show_input_output",
            BuildCommand::ExplainBuild => "explain_build",
            BuildCommand::Uninstall => "uninstall",
        }
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid command '{0}'")]
pub struct InvalidCommand(pub String);

impl FromStr for BuildCommand {
    type Err = InvalidCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildCommand::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InvalidCommand(s.to_string()))
    }
}

/// `COMMAND[:TARGET]` as typed on the command line. Everything after the
/// first ':' is the target, so gn labels like `//src:app` survive intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: BuildCommand,
    pub target: String,
}

impl FromStr for Invocation {
    type Err = InvalidCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (command, target) = s.split_once(':').unwrap_or((s, ""));
        Ok(Self {
            command: command.parse()?,
            target: target.to_string(),
        })
    }
}

/// Runs the handler for `ctx.command`
///
/// # Errors
///
/// Propagates failures from the handler, including non-zero tool exits.
pub async fn dispatch(ctx: &BuildContext) -> Result<()> {
    debug!(
        "{} '{}' for {} {} {} in {}",
        ctx.command,
        ctx.build_target,
        ctx.target.os,
        ctx.target.cpu,
        ctx.target.build_type,
        ctx.out_dir
    );

    match ctx.command {
        BuildCommand::Gen => generate::handle(ctx).await,
        BuildCommand::Build => build::handle(ctx).await,
        BuildCommand::Rebuild => build::handle_rebuild(ctx).await,
        BuildCommand::Clean => clean::handle(ctx).await,
        BuildCommand::ExplainBuild => build::handle_explain(ctx).await,
        BuildCommand::Graph => graph::handle(ctx).await,
        BuildCommand::ShowDeps => query::handle(ctx, query::Query::Deps).await,
        BuildCommand::ShowInput => query::handle(ctx, query::Query::Inputs).await,
        BuildCommand::ShowInputOutput => query::handle(ctx, query::Query::InputOutput).await,
        BuildCommand::Desc => desc::handle(ctx).await,
        BuildCommand::Path => inspect::handle_path(ctx).await,
        BuildCommand::Refs => inspect::handle_refs(ctx).await,
        BuildCommand::Args => inspect::handle_args(ctx).await,
        BuildCommand::Check => inspect::handle_check(ctx).await,
        BuildCommand::Uninstall => uninstall::handle(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_round_trip() {
        for cmd in BuildCommand::ALL {
            assert_eq!(cmd.as_str().parse::<BuildCommand>(), Ok(cmd));
        }
    }

    #[test]
    fn test_invocation_without_target() {
        let inv: Invocation = "show_input_output".parse().unwrap();
        assert_eq!(inv.command, BuildCommand::ShowInputOutput);
        assert!(inv.target.is_empty());
    }

    #[test]
    fn test_invocation_keeps_label_colons() {
        let inv: Invocation = "refs://base:base".parse().unwrap();
        assert_eq!(inv.command, BuildCommand::Refs);
        assert_eq!(inv.target, "//base:base");
    }

    #[test]
    fn test_invocation_rejects_unknown_command() {
        let err = "bulid:app".parse::<Invocation>().unwrap_err();
        assert_eq!(err, InvalidCommand("bulid".into()));
        assert_eq!(err.to_string(), "Invalid command 'bulid'");
    }
}
