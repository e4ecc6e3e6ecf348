//! StorySpoil contract harness entry point

use clap::Parser;
use spoilcheck::cli::{Cli, Commands};
use spoilcheck::logging;

fn main() {
    let cli = Cli::parse();

    logging::init().expect("failed to initialize logging");

    let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let result = match cli.command {
        Commands::Run(args) => runtime.block_on(spoilcheck::cli::run::execute(args)),
        Commands::Login(args) => runtime.block_on(spoilcheck::cli::login::execute(args)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
