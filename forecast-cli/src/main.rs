//! Binary crate for the `forecast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Mapping failures to exit codes

use std::process::ExitCode;

use clap::Parser;
use forecast_core::ReportError;

mod cli;
mod logger;

fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ReportError>().map_or(1, ReportError::exit_code)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();
    logger::init_cli_logger(cmd.verbose);

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}
