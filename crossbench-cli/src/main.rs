//! Crossbench CLI - Benchmark Harness
//!
//! Orchestrates checksum implementations through their setup/build/run
//! lifecycle. Any failure prints the diagnostic followed by the help
//! banner, so the user is never left without the list of valid commands.

use clap::{CommandFactory, Parser};

fn main() {
    let cli = crossbench_cli::Cli::parse();

    if let Err(e) = crossbench_cli::run_with_cli(cli) {
        eprintln!();
        eprintln!("Encountered an issue while running: \"{}\"", e);
        eprintln!();
        let _ = crossbench_cli::Cli::command().print_help();
        std::process::exit(1);
    }
}
