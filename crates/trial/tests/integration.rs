// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: configuration → generation → both engines → report.

use proptest::prelude::*;
use trial::{DimRange, TrialAggregate, TrialConfig, TrialError, TrialRunner};

// ── Helpers ────────────────────────────────────────────────────

fn quick_config(seed: u64, n: usize, p: usize) -> TrialConfig {
    let mut c = TrialConfig {
        seed: Some(seed),
        hw_n: n,
        hw_p: p,
        ..Default::default()
    };
    c.activation.width = DimRange::new(4, 10);
    c.activation.height = DimRange::new(4, 10);
    c.activation.depth = DimRange::new(1, 4);
    c.filters.kernel_width = DimRange::new(1, 4);
    c.filters.kernel_height = DimRange::new(1, 4);
    c.filters.channels = DimRange::new(1, 9);
    c
}

// ── Tests ──────────────────────────────────────────────────────

#[test]
fn test_config_file_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trial.toml");
    let toml = quick_config(17, 5, 4).to_toml().unwrap();
    std::fs::write(&path, toml).unwrap();

    let config = TrialConfig::from_file(&path).unwrap();
    let mut runner = TrialRunner::new(&config).unwrap();
    assert_eq!(runner.seed(), 17);
    let report = runner.run_trial(None).unwrap();
    assert_eq!(report.hw_n, 5);
    assert_eq!(report.hw_p, 4);
    assert!(report.summary().starts_with("conv2D trial: ["));
    assert!(report.summary().ends_with(" sim time"));
}

#[test]
fn test_dump_written_per_trial() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.csv");
    let mut runner = TrialRunner::new(&quick_config(2, 4, 4)).unwrap();
    let reports = runner.run_trials(2, Some(&dump)).unwrap();
    assert!(reports.iter().all(|r| r.dump_error.is_none()));

    for index in 0..2 {
        let text = std::fs::read_to_string(dir.path().join(format!("dump.{index}.csv"))).unwrap();
        for name in [
            "simulatedActivationTensor",
            "referenceActivationTensor",
            "simulatedFilterSet[0]",
            "referenceFilterSet[0]",
            "simulatedResultTensor",
            "referenceResultTensor",
        ] {
            assert!(text.contains(&format!("{name}\n")), "missing {name}");
        }
    }
}

#[test]
fn test_dump_failure_does_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("no-such-dir").join("dump.csv");
    let mut runner = TrialRunner::new(&quick_config(4, 4, 4)).unwrap();
    let report = runner.run_trial(Some(&dump)).unwrap();
    let err = report.dump_error.unwrap();
    assert!(err.contains("no-such-dir"));
}

#[test]
fn test_same_seed_same_inputs_across_hardware() {
    // A sweep relies on every (N, P) seeing identical inputs.
    let a = TrialRunner::new(&quick_config(8, 4, 4)).unwrap().run_trials(3, None).unwrap();
    let b = TrialRunner::new(&quick_config(8, 16, 7)).unwrap().run_trials(3, None).unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.geometry(), y.geometry());
    }
}

#[test]
fn test_aggregate_over_trials() {
    let reports = TrialRunner::new(&quick_config(6, 4, 4)).unwrap().run_trials(4, None).unwrap();
    let agg = TrialAggregate::from_reports(&reports).unwrap();
    assert_eq!(agg.trials, 4);
    assert!(agg.max_rms_percent >= agg.mean_rms_percent);
    assert_eq!(
        agg.overflow_events,
        reports.iter().map(|r| r.stats.overflow_events).sum::<u64>()
    );
}

#[test]
fn test_bad_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "hw_n = [1, 2]").unwrap();
    assert!(matches!(TrialConfig::from_file(&path), Err(TrialError::Config(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Small values never overflow, so the simulated result is exact for
    /// every hardware shape.
    #[test]
    fn test_small_values_are_exact(seed in any::<u64>(), n in 2usize..20, p in 3usize..20) {
        let mut config = quick_config(seed, n, p);
        config.max_int = 2;
        // L <= 4*4*4 = 64 terms of |x*y| <= 4 can reach 256, so shrink depth.
        config.activation.depth = DimRange::new(1, 1);
        let report = TrialRunner::new(&config).unwrap().run_trial(None).unwrap();
        prop_assert_eq!(report.stats.overflow_events, 0);
        prop_assert_eq!(report.rms_percent(), 0.0);
    }
}
