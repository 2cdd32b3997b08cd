//! datebound CLI - boundary tests for date/time arithmetic

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::{init_logging, ExitCode};
use commands::{list, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::List(args) => list::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(code) = err.downcast_ref::<ExitCode>() {
            std::process::exit(code.0);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
