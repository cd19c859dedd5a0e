use std::io::Write;

use log::{Level, LevelFilter};

/// Crates whose records are shown below trace level
const OWN_CRATES: &[&str] = &["tgn", "tgn_config", "tgn_actions"];

fn level_filter(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// `-q` shows errors only, `-v` debug and `-vv` trace for every crate.
/// `RUST_LOG` directives are applied on top.
pub fn init_logger(quiet: bool, verbose: u8) {
    let filter = level_filter(quiet, verbose);
    let mut builder = env_logger::builder();

    if filter == LevelFilter::Trace {
        builder.filter_level(filter);
    } else {
        for krate in OWN_CRATES {
            builder.filter_module(krate, filter);
        }
    }

    // plain messages at the default level; tool output is the focus
    if filter <= LevelFilter::Info {
        builder.format(|buf, record| {
            if record.level() == Level::Info {
                return writeln!(buf, "{}", record.args());
            }
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{style}[{}]{style:#} {}", record.level(), record.args())
        });
    }

    builder.parse_default_env();
    let _ = builder.try_init();
}
