use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use tgn_actions::CopyOptions;
use tgn_config::{GnArgs, HostPlatform, slash_path};

use crate::{
    commands::BuildCommand,
    context::BuildContext,
    label::find_label,
    runner::ToolCommand,
    utils::{
        fs::{is_symlink, remove_path, symlink_dir, symlink_file},
        styles::{fmt_path, fmt_success, fmt_target},
    },
};

const COMPILE_COMMANDS: &str = "compile_commands.json";

/// IDE project files are only produced by an explicit `gen`, never by the
/// implicit generation other commands trigger
pub fn ide_for(command: BuildCommand, host: HostPlatform) -> Option<&'static str> {
    if command != BuildCommand::Gen {
        return None;
    }
    match host {
        HostPlatform::Windows => Some("vs"),
        HostPlatform::Mac => Some("xcode"),
        HostPlatform::LinuxArm64 | HostPlatform::LinuxX64 => None,
    }
}

/// `gn gen` as run for a real generation
pub fn gen_command(ctx: &BuildContext, ide: Option<&str>, label: Option<&str>) -> ToolCommand {
    let root = slash_path(&ctx.root);
    let xcode = ide.is_some_and(|i| i.starts_with("xcode"));

    ToolCommand::new(ctx.toolchain.gn().as_str())
        .arg("gen")
        .arg(ctx.out_dir_arg())
        .arg(ctx.root_arg())
        .arg_opt(ide.map(|i| format!("--ide={i}")))
        .arg(format!("--workspace-path={root}"))
        .arg("--export-compile-commands")
        .arg_opt(xcode.then_some("--xcode-build-system=new"))
        .arg_opt(label.map(|l| format!("--filters={l}")))
}

fn plain_gen_command(ctx: &BuildContext) -> ToolCommand {
    ToolCommand::new(ctx.toolchain.gn().as_str())
        .arg("gen")
        .arg(ctx.out_dir_arg())
        .arg(ctx.root_arg())
}

fn ls_command(ctx: &BuildContext) -> ToolCommand {
    ToolCommand::new(ctx.toolchain.gn().as_str())
        .arg("ls")
        .arg(ctx.out_dir_arg())
        .arg(ctx.root_arg())
}

/// Points `./.gn` and `./.gnfiles` at the bundled build files, unless the
/// project ships its own `.gn`. Returns whether links were created.
///
/// # Errors
///
/// Fails if an old link can't be removed or a new one can't be created.
pub fn link_gn_files(ctx: &BuildContext) -> Result<bool> {
    let dot_gn = ctx.root.join(".gn");
    let gnfiles = ctx.root.join(tgn_config::toolchain::GNFILES_DIR);

    if dot_gn.exists() && !is_symlink(&dot_gn) && gnfiles.exists() {
        debug!("Project has its own .gn, leaving it alone");
        return Ok(false);
    }

    remove_path(&dot_gn).with_context(|| format!("Failed to remove {dot_gn}"))?;
    symlink_file(&ctx.toolchain.dot_gn(), &dot_gn)
        .with_context(|| format!("Failed to link {dot_gn}"))?;

    if gnfiles.exists() && !is_symlink(&gnfiles) {
        warn!("{gnfiles} is a real directory, not replacing it");
    } else {
        remove_path(&gnfiles).with_context(|| format!("Failed to remove {gnfiles}"))?;
        symlink_dir(ctx.toolchain.home(), &gnfiles)
            .with_context(|| format!("Failed to link {gnfiles}"))?;
    }

    debug!("Linked {dot_gn} and {gnfiles} to {}", ctx.toolchain.home());
    Ok(true)
}

/// Maps the typed target to its full gn label via `gn ls`
///
/// # Errors
///
/// Fails if gn can't run or no listed label matches.
pub async fn resolve_label(ctx: &BuildContext) -> Result<Option<String>> {
    if ctx.build_target.is_empty() {
        return Ok(None);
    }

    let runner = ctx.runner();
    runner.run(&plain_gen_command(ctx)).await?;
    let listing = runner.capture(&ls_command(ctx)).await?;

    find_label(&listing, &ctx.build_target)
        .map(|l| Some(l.to_string()))
        .ok_or_else(|| anyhow!("Unknown target '{}'", ctx.build_target))
}

/// Writes `args.gn`, links the build files and runs `gn gen`
///
/// # Errors
///
/// Fails if any step fails; a failing `gn gen` carries gn's exit code.
pub async fn generate(ctx: &BuildContext) -> Result<()> {
    GnArgs::new(ctx.target)
        .with_project(ctx.project_gn_args()?)
        .with_extra(ctx.extra_args.clone())
        .write(&ctx.out_dir)?;
    link_gn_files(ctx)?;

    let ide = ide_for(ctx.command, ctx.host);
    let label = resolve_label(ctx).await?;
    ctx.runner()
        .run(&gen_command(ctx, ide, label.as_deref()))
        .await?;

    let compile_commands = ctx.out_dir.join(COMPILE_COMMANDS);
    if compile_commands.exists() {
        let dest = ctx.root.join(COMPILE_COMMANDS);
        tgn_actions::copy(
            compile_commands.as_std_path(),
            dest.as_std_path(),
            CopyOptions::default(),
        )?;
        debug!("Copied {COMPILE_COMMANDS} to {dest}");
    }

    Ok(())
}

/// Generates only when `build.ninja` is missing
///
/// # Errors
///
/// See [`generate`].
pub async fn ensure_generated(ctx: &BuildContext) -> Result<()> {
    if ctx.is_generated() {
        return Ok(());
    }
    debug!("{} not found, generating first", ctx.build_ninja());
    generate(ctx).await
}

pub(crate) async fn handle(ctx: &BuildContext) -> Result<()> {
    generate(ctx).await?;

    info!(
        "{}",
        fmt_success(&format!(
            "{target} generated in {out}",
            target = fmt_target(&ctx.target),
            out = fmt_path(&ctx.out_dir),
        ))
    );
    Ok(())
}
