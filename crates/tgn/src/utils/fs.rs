use std::{fs, io};

use camino::Utf8Path;

/// Removes a file, directory tree or symlink at `path` without following
/// links. Returns whether anything was there.
///
/// # Errors
///
/// Returns the underlying I/O error if removal fails.
pub fn remove_path(path: &Utf8Path) -> io::Result<bool> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(false);
    };

    if meta.file_type().is_symlink() {
        remove_link(path)?;
    } else if meta.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(true)
}

#[cfg(windows)]
fn remove_link(path: &Utf8Path) -> io::Result<()> {
    // directory symlinks are directories to the Win32 API
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

#[cfg(not(windows))]
fn remove_link(path: &Utf8Path) -> io::Result<()> {
    fs::remove_file(path)
}

pub fn is_symlink(path: &Utf8Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

/// # Errors
///
/// Returns the underlying I/O error if the link can't be created.
#[cfg(unix)]
pub fn symlink_file(original: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

/// # Errors
///
/// Returns the underlying I/O error if the link can't be created.
#[cfg(unix)]
pub fn symlink_dir(original: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

/// # Errors
///
/// Returns the underlying I/O error if the link can't be created.
#[cfg(windows)]
pub fn symlink_file(original: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}

/// # Errors
///
/// Returns the underlying I/O error if the link can't be created.
#[cfg(windows)]
pub fn symlink_dir(original: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(original, link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn root() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        (tmp, root)
    }

    #[test]
    fn test_remove_missing_path() {
        let (_tmp, root) = root();
        assert!(!remove_path(&root.join("nothing")).unwrap());
    }

    #[test]
    fn test_remove_dir_link_keeps_target() {
        let (_tmp, root) = root();
        let real = root.join("shared");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("BUILDCONFIG.gn"), "").unwrap();
        let link = root.join("proj/.gnfiles");
        fs::create_dir_all(root.join("proj")).unwrap();
        symlink_dir(&real, &link).unwrap();

        assert!(is_symlink(&link));
        assert!(remove_path(&link).unwrap());
        assert!(!link.exists());
        assert!(real.join("BUILDCONFIG.gn").exists());
    }

    #[test]
    fn test_remove_real_tree() {
        let (_tmp, root) = root();
        let dir = root.join(".gnfiles/bin");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("gn"), "").unwrap();

        assert!(remove_path(&root.join(".gnfiles")).unwrap());
        assert!(!root.join(".gnfiles").exists());
    }
}
