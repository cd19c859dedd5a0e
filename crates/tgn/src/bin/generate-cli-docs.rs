use clap::CommandFactory;
use tgn::{Cli, action::ActionCli};

fn main() {
    let markdown = clap_markdown::help_markdown_command(&Cli::command());
    println!("{markdown}");

    let markdown = clap_markdown::help_markdown_command(&ActionCli::command());
    println!("{markdown}");
}
