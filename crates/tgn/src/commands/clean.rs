use anyhow::Result;
use log::info;

use crate::{
    commands::{build::ninja, generate},
    context::BuildContext,
    runner::ToolCommand,
    utils::styles::fmt_success,
};

pub fn clean_command(ctx: &BuildContext) -> ToolCommand {
    ninja(ctx).args(["-t", "clean"]).arg_opt(ctx.ninja_target())
}

/// Runs `ninja -t clean`; a failing clean never stops the caller
///
/// # Errors
///
/// Fails only when ninja can't be started.
pub async fn clean(ctx: &BuildContext) -> Result<()> {
    ctx.runner().run_ignoring_status(&clean_command(ctx)).await?;
    Ok(())
}

pub(crate) async fn handle(ctx: &BuildContext) -> Result<()> {
    generate::ensure_generated(ctx).await?;
    clean(ctx).await?;
    info!("{}", fmt_success(&format!("Cleaned {}", ctx.out_dir)));
    Ok(())
}
