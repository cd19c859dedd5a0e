use anyhow::{Context, Result};
use log::info;
use tgn_config::toolchain::GNFILES_DIR;

use crate::{
    context::BuildContext,
    utils::{fs::remove_path, styles::fmt_success},
};

/// Removes the project's `.gn` and `.gnfiles`, links or not
pub(crate) fn handle(ctx: &BuildContext) -> Result<()> {
    let mut removed = false;
    for name in [".gn", GNFILES_DIR] {
        let path = ctx.root.join(name);
        if remove_path(&path).with_context(|| format!("Failed to remove {path}"))? {
            info!("{}", fmt_success(&format!("Removed {path}")));
            removed = true;
        }
    }

    if !removed {
        info!("Nothing to uninstall in {}", ctx.root);
    }
    Ok(())
}
