use clap::Parser;
use log::error;
use tgn::{action::ActionCli, utils};

fn main() {
    let cli = ActionCli::parse();
    utils::logger::init_logger(cli.quiet, cli.verbose);

    if let Err(e) = cli.handle() {
        error!("{e:#}");
        std::process::exit(1);
    }
}
