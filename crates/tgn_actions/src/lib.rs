//! Small filesystem helpers that `gn` `action()` targets shell out to.
//!
//! Each helper has a narrow contract and reports failures through
//! [`ActionError`]; the `tgn-action` binary exposes them as subcommands.

pub mod compiler;
pub mod copy;
pub mod depfile;
mod error;
pub mod glob;
pub mod stamp;
pub mod vs_env;

pub use compiler::compiler_version;
pub use copy::{CopyOptions, copy};
pub use depfile::write_depfile;
pub use error::{ActionError, Result};
pub use glob::{GlobPattern, Mapping, glob_map};
pub use stamp::{stamp, touch};
