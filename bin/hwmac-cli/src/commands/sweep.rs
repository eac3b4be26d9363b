// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `hwmac sweep` command: compare error across multiplier shapes.
//!
//! Every (N, P) pair runs the same seeded sequence of trials, so the rows
//! of the table differ only in the hardware being simulated.

use super::SweepArgs;
use trial::{format_elapsed, TrialAggregate, TrialConfig, TrialRunner};

pub fn execute(mut config: TrialConfig, args: SweepArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.trials >= 1, "--trials must be at least 1");
    anyhow::ensure!(
        !args.hw_n.is_empty() && !args.hw_p.is_empty(),
        "--hw-n and --hw-p need at least one value each"
    );
    args.ranges.apply(&mut config);
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut rows: Vec<(usize, usize, TrialAggregate)> = Vec::new();
    for &n in &args.hw_n {
        for &p in &args.hw_p {
            let pair = TrialConfig {
                hw_n: n,
                hw_p: p,
                ..config.clone()
            };
            let mut runner = TrialRunner::new(&pair)?;
            // Pin the drawn seed so every later pair sees the same inputs.
            config.seed.get_or_insert(runner.seed());

            let reports = runner.run_trials(args.trials, None)?;
            let agg = TrialAggregate::from_reports(&reports)
                .ok_or_else(|| anyhow::anyhow!("no trials ran for N={n}, P={p}"))?;
            tracing::info!("N={n} P={p}: {}", agg.summary());
            let hw = runner.engine().config();
            rows.push((hw.vector_count(), hw.matrix_dim(), agg));
        }
    }

    println!(
        "Sweep: {} trials per pair, seed = {}, {} overflow",
        args.trials,
        config.seed.unwrap_or_default(),
        config.overflow,
    );
    println!(
        "  {:>4} {:>4} {:>12} {:>12} {:>12} {:>16}",
        "N", "P", "mean rms %", "max rms %", "overflows", "mean time",
    );
    println!("  {}", "-".repeat(66));
    for (n, p, agg) in &rows {
        println!(
            "  {:>4} {:>4} {:>12.2} {:>12.2} {:>12} {:>16}",
            n,
            p,
            agg.mean_rms_percent,
            agg.max_rms_percent,
            agg.overflow_events,
            format_elapsed(agg.mean_elapsed),
        );
    }
    Ok(())
}
