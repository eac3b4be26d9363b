// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `hwmac run` command: run randomized conv2D trials.

use super::RunArgs;
use trial::{TrialAggregate, TrialConfig, TrialRunner};

pub fn execute(mut config: TrialConfig, args: RunArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.trials >= 1, "--trials must be at least 1");
    args.apply(&mut config);

    let mut runner = TrialRunner::new(&config)?;
    if args.show_config {
        let config = runner.config();
        println!("HW MM: {}", runner.engine().config());
        println!("{}", config.ranges_summary());
        println!("Overflow: {}, seed = {}", config.overflow, runner.seed());
    }

    let mut reports = Vec::with_capacity(args.trials);
    for index in 0..args.trials {
        let dump = args
            .output
            .as_deref()
            .map(|p| trial::numbered_path(p, index, args.trials));
        let report = runner.run_trial(dump.as_deref())?;

        if let Some(check) = &report.input_check {
            println!("{}", check.summary());
        }
        println!("{}", report.summary());
        if let Some(err) = &report.dump_error {
            eprintln!("warning: {err}");
        }
        reports.push(report);
    }

    if reports.len() > 1 {
        if let Some(agg) = TrialAggregate::from_reports(&reports) {
            println!("{}", agg.summary());
        }
    }
    Ok(())
}
