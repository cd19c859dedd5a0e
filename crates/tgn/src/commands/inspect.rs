//! `gn` introspection commands: `path`, `refs`, `args` and `check`.

use anyhow::{Result, bail};

use crate::{commands::generate, context::BuildContext, runner::ToolCommand};

fn gn(ctx: &BuildContext, subcommand: &str) -> ToolCommand {
    ToolCommand::new(ctx.toolchain.gn().as_str()).arg(subcommand)
}

/// Splits `src=dest` for `path`
///
/// # Errors
///
/// Fails unless both sides are present.
pub fn path_endpoints(target: &str) -> Result<(&str, &str)> {
    match target.split_once('=') {
        Some((src, dest)) if !src.is_empty() && !dest.is_empty() => Ok((src, dest)),
        _ => bail!("'path' command needs a source label and a destination label."),
    }
}

/// # Errors
///
/// See [`path_endpoints`].
pub fn path_command(ctx: &BuildContext) -> Result<ToolCommand> {
    let (src, dest) = path_endpoints(&ctx.build_target)?;
    Ok(gn(ctx, "path")
        .arg("--all")
        .arg(ctx.out_dir_arg())
        .args([src, dest]))
}

pub fn refs_command(ctx: &BuildContext) -> ToolCommand {
    gn(ctx, "refs")
        .arg("--tree")
        .arg(ctx.out_dir_arg())
        .arg_opt(ctx.gn_label())
}

pub fn args_command(ctx: &BuildContext) -> ToolCommand {
    gn(ctx, "args").arg("--list").arg(ctx.out_dir_arg())
}

pub fn check_command(ctx: &BuildContext) -> ToolCommand {
    gn(ctx, "check").arg(ctx.out_dir_arg())
}

async fn run_generated(ctx: &BuildContext, cmd: &ToolCommand) -> Result<()> {
    generate::ensure_generated(ctx).await?;
    ctx.runner().run(cmd).await?;
    Ok(())
}

pub(crate) async fn handle_path(ctx: &BuildContext) -> Result<()> {
    // validate before generating so a typo costs nothing
    let cmd = path_command(ctx)?;
    run_generated(ctx, &cmd).await
}

pub(crate) async fn handle_refs(ctx: &BuildContext) -> Result<()> {
    run_generated(ctx, &refs_command(ctx)).await
}

pub(crate) async fn handle_args(ctx: &BuildContext) -> Result<()> {
    run_generated(ctx, &args_command(ctx)).await
}

pub(crate) async fn handle_check(ctx: &BuildContext) -> Result<()> {
    run_generated(ctx, &check_command(ctx)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::{context_for, temp_root};

    #[test]
    fn test_path_endpoints() {
        assert_eq!(
            path_endpoints("//src:app=//base:base").unwrap(),
            ("//src:app", "//base:base")
        );
        for bad in ["", "//src:app", "=//base:base", "//src:app="] {
            assert_eq!(
                path_endpoints(bad).unwrap_err().to_string(),
                "'path' command needs a source label and a destination label."
            );
        }
    }

    #[test]
    fn test_path_command() {
        let (_tmp, root) = temp_root();
        let ctx = context_for(&["path://src:app=//base:base", "win", "x86", "debug"], &root);
        let cmd = path_command(&ctx).unwrap();

        assert_eq!(
            cmd.args,
            vec![
                "path".to_string(),
                "--all".to_string(),
                format!("{root}/out/win/x86"),
                "//src:app".to_string(),
                "//base:base".to_string(),
            ]
        );
    }

    #[test]
    fn test_refs_args_and_check() {
        let (_tmp, root) = temp_root();
        let out = format!("{root}/out/linux/x64");
        let ctx = context_for(&["refs://base:base", "linux", "x64", "debug"], &root);

        assert_eq!(refs_command(&ctx).args, vec!["refs", "--tree", out.as_str(), "//base:base"]);
        assert_eq!(args_command(&ctx).args, vec!["args", "--list", out.as_str()]);
        assert_eq!(check_command(&ctx).args, vec!["check", out.as_str()]);
    }

    #[test]
    fn test_refs_without_target_passes_no_label() {
        let (_tmp, root) = temp_root();
        let ctx = context_for(&["refs", "linux", "x64", "debug"], &root);
        let out = format!("{root}/out/linux/x64");

        assert_eq!(refs_command(&ctx).args, vec!["refs", "--tree", out.as_str()]);
    }
}
