use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::{ActionError, Result};

/// Shell-style glob matched against `/`-separated relative paths.
///
/// `*` and `?` stay within one path segment, `**` spans any number of
/// segments (including none).
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    /// # Errors
    ///
    /// Returns [`ActionError::Pattern`] if the translated pattern is rejected.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&translate(pattern)).map_err(|source| ActionError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.regex.is_match(rel_path)
    }
}

fn translate(pattern: &str) -> String {
    let mut re = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    re.push_str("(?:.*/)?");
                } else {
                    re.push_str(".*");
                }
            }
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    re.push('$');
    re
}

/// One source file and where it lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Walks `root` and maps every file whose root-relative path matches
/// `pattern` to the same relative path under `dest`. Results are sorted by
/// source path.
///
/// # Errors
///
/// Fails if `root` is missing, the pattern is invalid, or the walk hits an
/// unreadable entry.
pub fn glob_map(root: &Path, pattern: &str, dest: &Path) -> Result<Vec<Mapping>> {
    if !root.exists() {
        return Err(ActionError::MissingSource(root.to_path_buf()));
    }
    let glob = GlobPattern::new(pattern)?;

    let mut found = Vec::new();
    // linked files count as files, matching `copy`
    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };

        let rel_str = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if glob.matches(&rel_str) {
            found.push(Mapping {
                source: entry.path().to_path_buf(),
                dest: dest.join(rel),
            });
        }
    }

    found.sort_by(|a, b| a.source.cmp(&b.source));
    Ok(found)
}
