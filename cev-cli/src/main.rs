//! CEV CLI - Command line tool for exploring climate model ensemble output.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cev-cli",
    version,
    about = "Climate ensemble viewer data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cev_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[CEV Debug] cli: starting");
    cev_cmd::run(cli.command)
}
