use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, ActionError>;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("source does not exist: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} failed with {status}")]
    CommandFailed { program: String, status: String },
    #[error("no version number in '{line}'")]
    NoVersion { line: String },
    #[error("{0}")]
    Unsupported(String),
}

impl ActionError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| ActionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
