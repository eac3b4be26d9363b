// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommands and the argument groups they share.

pub mod config;
pub mod run;
pub mod sweep;

use clap::Args;
use mac_engine::OverflowMode;
use std::path::{Path, PathBuf};
use trial::{DimRange, TrialConfig};

/// Initialises the `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count:
/// none → warn, `-v` → info, `-vv` → debug, `-vvv` → trace.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the TOML configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<TrialConfig> {
    match path {
        Some(path) => {
            let config = TrialConfig::from_file(path)?;
            tracing::info!("loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(TrialConfig::default()),
    }
}

/// Generation-range overrides shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct RangeArgs {
    /// Minimum activation tensor width.
    #[arg(long)]
    pub min_w: Option<usize>,
    /// Maximum activation tensor width.
    #[arg(long)]
    pub max_w: Option<usize>,
    /// Minimum activation tensor height.
    #[arg(long)]
    pub min_h: Option<usize>,
    /// Maximum activation tensor height.
    #[arg(long)]
    pub max_h: Option<usize>,
    /// Minimum activation tensor depth.
    #[arg(long)]
    pub min_d: Option<usize>,
    /// Maximum activation tensor depth.
    #[arg(long)]
    pub max_d: Option<usize>,
    /// Minimum filter width.
    #[arg(long)]
    pub min_kw: Option<usize>,
    /// Maximum filter width.
    #[arg(long)]
    pub max_kw: Option<usize>,
    /// Minimum filter height.
    #[arg(long)]
    pub min_kh: Option<usize>,
    /// Maximum filter height.
    #[arg(long)]
    pub max_kh: Option<usize>,
    /// Minimum filter channel count.
    #[arg(long)]
    pub min_c: Option<usize>,
    /// Maximum filter channel count.
    #[arg(long)]
    pub max_c: Option<usize>,
    /// Generated integers lie in [-n, n]; clamped to [2, 127].
    #[arg(long, allow_negative_numbers = true)]
    pub max_int: Option<i32>,
    /// Datapath overflow policy: wrapping or saturating.
    #[arg(long)]
    pub overflow: Option<OverflowMode>,
}

impl RangeArgs {
    /// Writes every given override into `config`.
    pub fn apply(&self, config: &mut TrialConfig) {
        fn set(range: &mut DimRange, min: Option<usize>, max: Option<usize>) {
            if let Some(min) = min {
                range.min = min;
            }
            if let Some(max) = max {
                range.max = max;
            }
        }
        let a = &mut config.activation;
        set(&mut a.width, self.min_w, self.max_w);
        set(&mut a.height, self.min_h, self.max_h);
        set(&mut a.depth, self.min_d, self.max_d);
        let f = &mut config.filters;
        set(&mut f.kernel_width, self.min_kw, self.max_kw);
        set(&mut f.kernel_height, self.min_kh, self.max_kh);
        set(&mut f.channels, self.min_c, self.max_c);
        if let Some(max_int) = self.max_int {
            config.max_int = max_int;
        }
        if let Some(overflow) = self.overflow {
            config.overflow = overflow;
        }
    }
}

/// Arguments of `hwmac run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Number of trials to run.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub trials: usize,

    /// RNG seed for reproducible trials.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save every tensor of each trial to this CSV file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the multiplier configuration and generation ranges first.
    #[arg(short = 'c', long)]
    pub show_config: bool,

    /// Verify the float mirrors of the inputs before each trial.
    #[arg(long)]
    pub check_inputs: bool,

    /// Vector count N of the multiplier (at least 2).
    #[arg(long)]
    pub hw_n: Option<usize>,

    /// Operand matrix dimension P of the multiplier (at least 3).
    #[arg(long)]
    pub hw_p: Option<usize>,

    #[command(flatten)]
    pub ranges: RangeArgs,
}

impl RunArgs {
    /// Folds the flags into `config`.
    pub fn apply(&self, config: &mut TrialConfig) {
        self.ranges.apply(config);
        if let Some(n) = self.hw_n {
            config.hw_n = n;
        }
        if let Some(p) = self.hw_p {
            config.hw_p = p;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.check_inputs |= self.check_inputs;
    }
}

/// Arguments of `hwmac sweep`.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Comma-separated vector counts to sweep.
    #[arg(long, value_delimiter = ',', default_value = "4,8,16")]
    pub hw_n: Vec<usize>,

    /// Comma-separated operand matrix dimensions to sweep.
    #[arg(long, value_delimiter = ',', default_value = "4,8,16")]
    pub hw_p: Vec<usize>,

    /// Trials per (N, P) pair.
    #[arg(short = 'n', long, default_value_t = 4)]
    pub trials: usize,

    /// RNG seed shared by every pair; drawn once when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub ranges: RangeArgs,
}
