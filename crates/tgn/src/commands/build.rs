use anyhow::Result;
use log::info;

use crate::{
    commands::{clean, generate},
    context::BuildContext,
    runner::ToolCommand,
    utils::styles::fmt_success,
};

/// `ninja [-d keeprsp] -C <out>`, the prefix every ninja invocation shares
pub fn ninja(ctx: &BuildContext) -> ToolCommand {
    ToolCommand::new(ctx.toolchain.ninja().as_str())
        .args(ctx.keeprsp_args().iter().copied())
        .arg("-C")
        .arg(ctx.out_dir_arg())
}

pub fn build_command(ctx: &BuildContext) -> ToolCommand {
    ninja(ctx)
        .arg_opt(ctx.verbose.then_some("-v"))
        .arg_opt(ctx.ninja_target())
}

pub fn explain_command(ctx: &BuildContext) -> ToolCommand {
    ninja(ctx).arg_opt(ctx.ninja_target()).args(["-d", "explain"])
}

async fn build(ctx: &BuildContext) -> Result<()> {
    generate::ensure_generated(ctx).await?;
    ctx.runner().run(&build_command(ctx)).await?;

    info!(
        "{}",
        fmt_success(&format!(
            "Built {}",
            ctx.ninja_target().unwrap_or("all targets")
        ))
    );
    Ok(())
}

pub(crate) async fn handle(ctx: &BuildContext) -> Result<()> {
    build(ctx).await
}

/// Regenerates, cleans what the previous generation knew about, then builds
pub(crate) async fn handle_rebuild(ctx: &BuildContext) -> Result<()> {
    generate::generate(ctx).await?;
    if ctx.is_generated() {
        clean::clean(ctx).await?;
    }
    build(ctx).await
}

pub(crate) async fn handle_explain(ctx: &BuildContext) -> Result<()> {
    generate::ensure_generated(ctx).await?;
    ctx.runner().run(&explain_command(ctx)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::{context_for, temp_root};

    #[test]
    fn test_debug_build_keeps_rsp_files() {
        let (_tmp, root) = temp_root();
        let ctx = context_for(&["build://src:app", "linux", "x64", "debug"], &root);
        let cmd = build_command(&ctx);

        assert_eq!(cmd.program, format!("{root}/tgn/.gnfiles/bin/linux/x64/ninja"));
        assert_eq!(
            cmd.args,
            vec![
                "-d".to_string(),
                "keeprsp".to_string(),
                "-C".to_string(),
                format!("{root}/out/linux/x64"),
                "src:app".to_string(),
            ]
        );
    }

    #[test]
    fn test_release_build_all_verbose() {
        let (_tmp, root) = temp_root();
        let ctx = context_for(&["-v", "build", "linux", "arm", "release"], &root);
        let cmd = build_command(&ctx);

        assert_eq!(
            cmd.args,
            vec![
                "-C".to_string(),
                format!("{root}/out/linux/arm"),
                "-v".to_string(),
            ]
        );
    }

    #[test]
    fn test_explain_puts_target_before_debug_flag() {
        let (_tmp, root) = temp_root();
        let ctx = context_for(&["explain_build:app", "linux", "x64", "release"], &root);
        let cmd = explain_command(&ctx);

        assert_eq!(&cmd.args[2..], &["app", "-d", "explain"]);
    }
}
