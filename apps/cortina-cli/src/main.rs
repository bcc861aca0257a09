//! # Cortina Entry Point
//!
//! Parses arguments, sets up logging and runs the command. The actual
//! work lives in `lib.rs` for testability.

use clap::Parser;
use std::process::ExitCode;

use cortina_cli::{init_tracing, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error [{}]: {err}", err.code());
            ExitCode::FAILURE
        }
    }
}
