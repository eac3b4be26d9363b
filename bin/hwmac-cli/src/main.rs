// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # hwmac
//!
//! Command-line interface for the fixed-point matrix-multiplier fidelity
//! simulator.
//!
//! ## Usage
//! ```bash
//! # One trial with the default 16 vectors by 16 x 16 multiplier
//! hwmac run
//!
//! # Ten reproducible trials on a 8 x 8 array, dumping tensors to CSV
//! hwmac run --hw-n 8 --hw-p 8 --trials 10 --seed 42 -o dump.csv
//!
//! # Compare error across multiplier shapes
//! hwmac sweep --hw-n 4,8,16 --hw-p 4,8,16 --trials 8
//!
//! # Print the effective configuration
//! hwmac --config trial.toml config
//! ```

mod commands;

use clap::{Parser, Subcommand};
use commands::{RangeArgs, RunArgs, SweepArgs};

#[derive(Parser)]
#[command(
    name = "hwmac",
    about = "Fidelity simulator for a fixed-point N-vector by P x P matrix multiplier",
    version,
    author
)]
struct Cli {
    /// Path to a TOML trial configuration; flags override its values.
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run randomized conv2D trials and report the RMS error of each.
    Run(RunArgs),

    /// Run the same seeded trials on every (N, P) pair and tabulate the error.
    Sweep(SweepArgs),

    /// Print the effective (normalized) configuration as TOML.
    Config {
        #[command(flatten)]
        ranges: RangeArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Run(args) => commands::run::execute(config, args),
        Commands::Sweep(args) => commands::sweep::execute(config, args),
        Commands::Config { ranges } => commands::config::execute(config, ranges),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "hwmac", "-vv", "run", "--trials", "3", "--seed", "9", "-c", "-o", "out.csv",
            "--hw-n", "8", "--overflow", "saturating", "--max-kw", "5",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.trials, 3);
                assert_eq!(args.seed, Some(9));
                assert!(args.show_config);
                assert_eq!(args.hw_n, Some(8));
                assert_eq!(args.hw_p, None);
                assert_eq!(args.ranges.overflow, Some(mac_engine::OverflowMode::Saturating));
                assert_eq!(args.ranges.max_kw, Some(5));
                assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.csv")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_sweep_lists() {
        let cli = Cli::try_parse_from(["hwmac", "sweep", "--hw-n", "4,8", "--hw-p", "3,5,7"])
            .unwrap();
        match cli.command {
            Commands::Sweep(args) => {
                assert_eq!(args.hw_n, vec![4, 8]);
                assert_eq!(args.hw_p, vec![3, 5, 7]);
            }
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn test_rejects_unknown_overflow() {
        assert!(Cli::try_parse_from(["hwmac", "run", "--overflow", "explode"]).is_err());
    }
}
