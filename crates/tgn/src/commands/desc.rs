use anyhow::Result;
use camino::Utf8PathBuf;
use log::info;

use crate::{
    commands::generate,
    context::BuildContext,
    runner::ToolCommand,
    utils::styles::{fmt_path, fmt_success},
};

const DEFAULT_DESC_FILE: &str = "ag_desc.txt";

/// Report location: `--out-file` inside the output dir, or `ag_desc.txt`
pub fn report_file(ctx: &BuildContext) -> Utf8PathBuf {
    ctx.out_dir
        .join(ctx.out_file.as_deref().unwrap_or(DEFAULT_DESC_FILE))
}

pub fn desc_command(ctx: &BuildContext) -> ToolCommand {
    ToolCommand::new(ctx.toolchain.gn().as_str())
        .arg("desc")
        .arg(ctx.out_dir_arg())
        .args(["--blame", "--tree"])
        .arg(ctx.root_arg())
        .arg_opt(ctx.gn_label())
        .stdout_to(report_file(ctx))
}

pub(crate) async fn handle(ctx: &BuildContext) -> Result<()> {
    generate::ensure_generated(ctx).await?;
    ctx.runner().run(&desc_command(ctx)).await?;

    info!(
        "{}",
        fmt_success(&format!(
            "Description written to {}",
            fmt_path(&report_file(ctx))
        ))
    );
    Ok(())
}
