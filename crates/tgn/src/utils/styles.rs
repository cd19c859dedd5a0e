use anstyle::{AnsiColor, Color, Style};
use camino::Utf8Path;
use clap::builder::Styles;
use tgn_config::Target;

use crate::utils::CHECK;

const HEADING: Style = Style::new()
    .bold()
    .underline()
    .fg_color(Some(Color::Ansi(AnsiColor::Blue)));
const GOOD: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const BAD: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Red)));
const EMPHASIS: Style = Style::new().bold();
const QUIET: Style = Style::new().dimmed();

/// Help output colours for both binaries
pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(HEADING)
        .header(HEADING)
        .literal(GOOD)
        .invalid(BAD)
        .error(BAD)
        .valid(GOOD.bold().underline())
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}

fn paint(msg: &str, style: Style) -> String {
    format!("{style}{msg}{style:#}")
}

/// `os cpu build-type`, bold
pub(crate) fn fmt_target(target: &Target) -> String {
    paint(
        &format!("{} {} {}", target.os, target.cpu, target.build_type),
        EMPHASIS,
    )
}

pub(crate) fn fmt_path(path: &Utf8Path) -> String {
    paint(path.as_str(), QUIET)
}

pub(crate) fn fmt_success(msg: &str) -> String {
    format!("{} {msg}", paint(CHECK, GOOD))
}
