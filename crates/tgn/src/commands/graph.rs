use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use log::info;
use tgn_config::slash_path;

use crate::{
    commands::{build::ninja, generate},
    context::BuildContext,
    runner::ToolCommand,
    utils::styles::{fmt_path, fmt_success},
};

const GRAPH_DOT: &str = "ag_graph.dot";
const GRAPH_SVG: &str = "ag_graph.svg";

pub fn dot_file(ctx: &BuildContext) -> Utf8PathBuf {
    ctx.out_dir.join(GRAPH_DOT)
}

pub fn svg_file(ctx: &BuildContext) -> Utf8PathBuf {
    ctx.out_dir.join(GRAPH_SVG)
}

pub fn graph_command(ctx: &BuildContext) -> ToolCommand {
    ninja(ctx)
        .args(["-t", "graph"])
        .arg_opt(ctx.ninja_target())
        .stdout_to(dot_file(ctx))
}

pub fn render_command(ctx: &BuildContext) -> ToolCommand {
    ToolCommand::new("dot")
        .arg("-Tsvg")
        .arg(slash_path(&dot_file(ctx)).into_string())
        .arg("-o")
        .arg(slash_path(&svg_file(ctx)).into_string())
}

pub(crate) async fn handle(ctx: &BuildContext) -> Result<()> {
    generate::ensure_generated(ctx).await?;

    let runner = ctx.runner();
    runner.run(&graph_command(ctx)).await?;
    runner
        .run(&render_command(ctx))
        .await
        .context("Rendering the graph needs graphviz's 'dot' on PATH")?;

    info!(
        "{}",
        fmt_success(&format!(
            "Dependency graph written to {}",
            fmt_path(&svg_file(ctx))
        ))
    );
    Ok(())
}
