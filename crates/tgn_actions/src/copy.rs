use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::{ActionError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    /// Carry the source modification time over to the copy
    pub preserve_mtime: bool,
}

/// Copies `src` to `dst`, creating parent directories as needed.
///
/// Directories are copied recursively. An existing destination file is
/// replaced. Returns the number of files copied.
///
/// # Errors
///
/// Fails with [`ActionError::MissingSource`] if `src` does not exist, or with
/// an I/O error for the path that could not be read or written.
pub fn copy(src: &Path, dst: &Path, opts: CopyOptions) -> Result<usize> {
    let meta = fs::metadata(src).map_err(|_| ActionError::MissingSource(src.to_path_buf()))?;

    if !meta.is_dir() {
        copy_file(src, dst, opts)?;
        return Ok(1);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(ActionError::io(&target))?;
        } else {
            copy_file(entry.path(), &target, opts)?;
            copied += 1;
        }
    }

    debug!("Copied {copied} files from {} to {}", src.display(), dst.display());
    Ok(copied)
}

/// Whether both paths resolve to the same existing file
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_file(src: &Path, dst: &Path, opts: CopyOptions) -> Result<()> {
    // removing dst below would delete the only copy
    if same_file(src, dst) {
        debug!("{} and {} are the same file, skipping", src.display(), dst.display());
        return Ok(());
    }

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ActionError::io(parent))?;
    }

    // read-only outputs from a previous build would make fs::copy fail
    if let Ok(existing) = fs::symlink_metadata(dst)
        && !existing.is_dir()
    {
        let mut perms = existing.permissions();
        if perms.readonly() {
            #[allow(clippy::permissions_set_readonly_false)]
            perms.set_readonly(false);
            fs::set_permissions(dst, perms).map_err(ActionError::io(dst))?;
        }
        fs::remove_file(dst).map_err(ActionError::io(dst))?;
    }

    fs::copy(src, dst).map_err(ActionError::io(src))?;

    if opts.preserve_mtime {
        let modified = fs::metadata(src)
            .and_then(|m| m.modified())
            .map_err(ActionError::io(src))?;
        fs::File::options()
            .write(true)
            .open(dst)
            .and_then(|f| f.set_modified(modified))
            .map_err(ActionError::io(dst))?;
    }

    Ok(())
}
