//! qbot - a token queue bot for Telegram.

use clap::Parser;
use std::process::ExitCode;

use qbot::{logging, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let debug = cli.debug || logging::debug_from_env();
    let _guard = match logging::init(debug) {
        Ok((guard, _)) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
