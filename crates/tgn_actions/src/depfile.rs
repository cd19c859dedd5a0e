use std::fs;
use std::path::Path;

use crate::{ActionError, Result};

fn escape(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            ' ' => out.push_str("\\ "),
            '#' => out.push_str("\\#"),
            '$' => out.push_str("$$"),
            '\\' => out.push('/'),
            c => out.push(c),
        }
    }
    out
}

/// Makefile-style depfile line as ninja reads it: `output: in1 in2 ...`
pub fn render_depfile<S: AsRef<str>>(output: &str, inputs: &[S]) -> String {
    let mut line = format!("{}:", escape(output));
    for input in inputs {
        line.push(' ');
        line.push_str(&escape(input.as_ref()));
    }
    line.push('\n');
    line
}

/// Writes the depfile for `output` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an I/O error if the file can't be written.
pub fn write_depfile<S: AsRef<str>>(path: &Path, output: &str, inputs: &[S]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ActionError::io(parent))?;
    }
    fs::write(path, render_depfile(output, inputs)).map_err(ActionError::io(path))
}
