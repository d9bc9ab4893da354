#![warn(missing_docs)]
//! Crossbench CLI - Command Surface & Dispatch
//!
//! Benchmarks and cross-verifies checksum implementations written in
//! different languages. Every implementation lives in its own directory
//! under the current working directory, with a `lifecycle.toml`
//! declaring its setup/build/run commands; the `init` command scaffolds
//! one. See the subcommand help for the full surface.

pub mod bench;
pub mod config;
pub mod engine;
pub mod reporting;
pub mod verify;

pub use config::HarnessConfig;

use clap::{Parser, Subcommand};
use crossbench_core::{remove_setup_marker, Registry};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Checksum algorithms exercised by the cross-tab table, one comparison
/// column per algorithm.
pub const CHECKSUM_ALGORITHMS: &[&str] = &["md5", "sha1", "sha256", "adler32", "crc32"];

/// Benchmark and cross-verify checksum implementations
#[derive(Debug, Parser)]
#[command(name = "crossbench", version, about)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Commands,
}

/// The closed set of harness operations.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new implementation directory
    Init {
        /// Name of the implementation to create
        name: String,
    },

    /// Remove setup markers so the next run provisions again
    Clean {
        /// Comma-separated implementation names, or "all"
        names: String,
    },

    /// Run only the setup phase of the named implementations
    #[command(name = "do_setup")]
    DoSetup {
        /// Comma-separated implementation names, or "all"
        names: String,
    },

    /// Set up, build and run one implementation once
    Run {
        /// Implementation name
        name: String,
        /// Arguments forwarded to the checksum program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Check an implementation's output against the baseline
    Verify {
        /// Implementation name
        name: String,
        /// Arguments forwarded to the checksum programs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Time one implementation over repeated runs
    Benchmark {
        /// Number of timed repetitions
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        repetitions: u32,
        /// Implementation name
        name: String,
        /// Arguments forwarded to the checksum program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Benchmark several implementations and print a results table
    Compare {
        /// Comma-separated implementation names, or "all"
        names: String,
        /// Number of timed repetitions
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        repetitions: u32,
        /// Arguments forwarded to the checksum programs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Benchmark and persist a mean-bar chart
    Plot {
        /// Comma-separated implementation names, or "all"
        names: String,
        /// Number of timed repetitions
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        repetitions: u32,
        /// Arguments forwarded to the checksum programs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Benchmark and persist a box/whisker distribution chart
    Boxplot {
        /// Comma-separated implementation names, or "all"
        names: String,
        /// Number of timed repetitions
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        repetitions: u32,
        /// Arguments forwarded to the checksum programs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Cross-tab every implementation against every checksum algorithm
    Table {
        /// Comma-separated implementation names, or "all"
        names: String,
        /// Number of timed repetitions
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        repetitions: u32,
        /// Arguments forwarded to the checksum programs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Parse the command line and dispatch.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Dispatch an already-parsed command line.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let config = HarnessConfig::discover().unwrap_or_default();
    let registry = Registry::from_current_dir()?;
    debug!(root = %registry.root().display(), "implementation registry bound");

    match cli.command {
        Commands::Init { name } => {
            let descriptor = crossbench_core::init(registry.root(), &name)?;
            println!("Initialized '{name}'");
            println!(
                "Fill in the setup/build/run commands in {} to bring it to life",
                descriptor.display()
            );
            Ok(())
        }

        Commands::Clean { names } => {
            let (selected, wildcard) = registry.select(&names)?;
            if wildcard {
                println!("Selected by wildcard: {}", selected.join(", "));
            }
            for name in &selected {
                let directory = registry.resolve(name)?;
                if remove_setup_marker(&directory)? {
                    println!("Deleted {name} setup");
                } else {
                    println!("'{name}' did not have a setup.log file");
                }
            }
            Ok(())
        }

        Commands::DoSetup { names } => {
            let (selected, wildcard) = registry.select(&names)?;
            if wildcard {
                println!("Selected by wildcard: {}", selected.join(", "));
            }
            for name in &selected {
                println!("Setting up '{name}'");
                match registry.load(name).and_then(|imp| imp.lifecycle.setup()) {
                    Ok(()) => println!("'{name}' is ready"),
                    Err(e) => eprintln!("'{name}' setup failed: {e}"),
                }
            }
            Ok(())
        }

        Commands::Run { name, args } => {
            let implementation = registry.load(&name)?;
            println!("Running trial implemented in '{name}'");
            if !args.is_empty() {
                println!("Arguments: {}", args.join(" "));
            }
            engine::run_lifecycle(&implementation, &args, 1)?;
            Ok(())
        }

        Commands::Verify { name, args } => {
            verify::verify(&registry, &config.verify, &name, &args)?;
            Ok(())
        }

        Commands::Benchmark {
            repetitions,
            name,
            args,
        } => {
            bench::benchmark(&registry, repetitions, &name, &args)?;
            Ok(())
        }

        Commands::Compare {
            names,
            repetitions,
            args,
        } => {
            bench::compare(&registry, &names, repetitions, &args, true)?;
            Ok(())
        }

        Commands::Plot {
            names,
            repetitions,
            args,
        } => reporting::plot(&registry, &config, &names, repetitions, &args),

        Commands::Boxplot {
            names,
            repetitions,
            args,
        } => reporting::boxplot(&registry, &config, &names, repetitions, &args),

        Commands::Table {
            names,
            repetitions,
            args,
        } => reporting::table(&registry, &config, &names, repetitions, &args),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "crossbench=debug"
    } else {
        "crossbench=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_trailing_flags() {
        let cli = Cli::try_parse_from([
            "crossbench",
            "benchmark",
            "10",
            "rust",
            "dir_a",
            "dir_b",
            "--md5",
        ])
        .unwrap();

        match cli.command {
            Commands::Benchmark {
                repetitions,
                name,
                args,
            } => {
                assert_eq!(repetitions, 10);
                assert_eq!(name, "rust");
                assert_eq!(args, vec!["dir_a", "dir_b", "--md5"]);
            }
            other => panic!("parsed unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_zero_repetitions_rejected() {
        assert!(Cli::try_parse_from(["crossbench", "benchmark", "0", "rust"]).is_err());
    }

    #[test]
    fn test_do_setup_keeps_snake_case_name() {
        let cli = Cli::try_parse_from(["crossbench", "do_setup", "all"]).unwrap();
        assert!(matches!(cli.command, Commands::DoSetup { .. }));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["crossbench", "teleport"]).is_err());
    }
}
