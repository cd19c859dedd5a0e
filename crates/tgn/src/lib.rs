pub mod action;
pub mod commands;
pub mod context;
pub mod label;
pub mod runner;
pub mod utils;

use camino::Utf8PathBuf;
use clap::Parser;
use tgn_config::{BuildType, TargetCpu, TargetOs};

use crate::{commands::Invocation, context::BuildContext};

#[derive(Debug, Parser)]
#[command(name = "tgn")]
#[command(version)]
#[command(about = "An easy-to-use Google gn wrapper")]
#[command(
    long_about = "tgn writes args.gn for the requested target, links the project to the bundled \
gn/ninja toolchain and runs the matching gn or ninja command. Output lands in <out-dir>/<os>/<cpu>."
)]
#[command(after_help = "COMMANDS:\n  \
    gen         build        rebuild            refs    clean\n  \
    graph       uninstall    explain_build      desc    check\n  \
    show_deps   show_input   show_input_output  path    args\n\n\
EXAMPLES:\n  \
    tgn gen linux x64 debug\n  \
    tgn build:app mac arm64 release\n  \
    tgn path://src:app=//base:base win x64 debug\n  \
    tgn gen linux arm64 release -- use_lto=true app_name=#demo#\n\n\
Put the tgn install directory on your PATH so that you can run tgn anywhere.\
")]
#[command(styles = utils::styles::get_styles())]
pub struct Cli {
    /// Command to run, optionally followed by ':' and a target (e.g. build://src:app)
    #[arg(value_name = "COMMAND[:TARGET]")]
    pub command: Invocation,

    /// Target OS
    #[arg(value_enum, value_name = "TARGET-OS")]
    pub target_os: TargetOs,

    /// Target CPU
    #[arg(value_enum, value_name = "TARGET-CPU")]
    pub target_cpu: TargetCpu,

    /// Build type
    #[arg(value_enum, value_name = "BUILD-TYPE")]
    pub build_type: BuildType,

    /// Build output dir; <os>/<cpu> is appended
    #[arg(long, default_value = "out")]
    pub out_dir: Utf8PathBuf,

    /// File name (inside the output dir) for the 'desc' report
    #[arg(long)]
    pub out_file: Option<String>,

    /// Directory with the bundled gn/ninja binaries, defaults to .gnfiles next to tgn
    #[arg(long, env = "TGN_GNFILES_DIR")]
    pub gnfiles_dir: Option<Utf8PathBuf>,

    /// No logging except for errors
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Echo commands and dump verbose tool output (-v), trace logging (-vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Extra gn args written to args.gn; '#' stands for '"'
    #[arg(last = true, value_name = "GN_ARGS")]
    pub extra_args: Vec<String>,
}

impl Cli {
    #[allow(clippy::missing_errors_doc)]
    pub async fn handle(&self) -> anyhow::Result<()> {
        let ctx = BuildContext::from_cli(self)?;
        commands::dispatch(&ctx).await
    }
}
