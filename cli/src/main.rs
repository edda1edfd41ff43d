mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};
use commands::{inspect, run};

fn main() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Commands::Run(args) => run::run(&cli, args),
        Commands::Inspect(args) => inspect::run(&cli, args),
    }
}
