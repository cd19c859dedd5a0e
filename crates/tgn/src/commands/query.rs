use anyhow::Result;

use crate::{
    commands::{build::ninja, generate},
    context::BuildContext,
    runner::ToolCommand,
};

/// Read-only ninja tools that report on the build graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// `-t deps`
    Deps,
    /// `-t inputs`
    Inputs,
    /// `-t query`
    InputOutput,
}

impl Query {
    fn tool(self) -> &'static str {
        match self {
            Query::Deps => "deps",
            Query::Inputs => "inputs",
            Query::InputOutput => "query",
        }
    }
}

pub fn query_command(ctx: &BuildContext, query: Query) -> ToolCommand {
    ninja(ctx)
        .args(["-t", query.tool()])
        .arg_opt(ctx.ninja_target())
}

pub(crate) async fn handle(ctx: &BuildContext, query: Query) -> Result<()> {
    generate::ensure_generated(ctx).await?;
    ctx.runner().run(&query_command(ctx, query)).await?;
    Ok(())
}
