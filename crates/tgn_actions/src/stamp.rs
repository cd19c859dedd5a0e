use std::fs;
use std::path::Path;
use std::time::SystemTime;

use log::debug;

use crate::{ActionError, Result};

/// Creates `path` (and its parents) if missing, otherwise bumps its
/// modification time to now.
///
/// # Errors
///
/// Returns an I/O error if the file can't be created or updated.
pub fn touch(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ActionError::io(parent))?;
    }

    let file = fs::File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(ActionError::io(path))?;
    file.set_modified(SystemTime::now())
        .map_err(ActionError::io(path))
}

/// Timestamp-proxy marker: `marker` stands in for `inputs` in the build
/// graph and is only rewritten when it is missing or older than the newest
/// input. Returns whether the marker was updated.
///
/// # Errors
///
/// Fails with [`ActionError::MissingSource`] if an input does not exist.
pub fn stamp<P: AsRef<Path>>(marker: &Path, inputs: &[P]) -> Result<bool> {
    let mut newest: Option<SystemTime> = None;
    for input in inputs {
        let input = input.as_ref();
        let modified = fs::metadata(input)
            .map_err(|_| ActionError::MissingSource(input.to_path_buf()))?
            .modified()
            .map_err(ActionError::io(input))?;
        newest = newest.max(Some(modified));
    }

    let current = fs::metadata(marker).and_then(|m| m.modified()).ok();
    let stale = match (current, newest) {
        (None, _) => true,
        (Some(marker_time), Some(input_time)) => marker_time < input_time,
        (Some(_), None) => false,
    };

    if stale {
        touch(marker)?;
        debug!("Updated stamp {}", marker.display());
    }
    Ok(stale)
}
