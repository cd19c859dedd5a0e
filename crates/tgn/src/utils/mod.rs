pub mod fs;
pub mod logger;
pub mod styles;

pub(crate) static CHECK: &str = "✔";
