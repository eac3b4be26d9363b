// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Trial results and their console rendering.

use mac_engine::{Comparison, MacStats, OverflowMode};
use std::time::Duration;
use tensor_core::TensorShape;

/// Formats a wall-clock duration with an automatically chosen unit.
///
/// Below a millisecond the value is shown in `usec`, below a second in
/// `msec`, otherwise in `sec`; always with three decimals.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0e-3 {
        format!("{:.3} usec", secs * 1.0e6)
    } else if secs < 1.0 {
        format!("{:.3} msec", secs * 1.0e3)
    } else {
        format!("{secs:.3} sec")
    }
}

/// How closely the float mirrors of the inputs match the integer originals.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct InputCheck {
    /// RMS difference between the activation and its mirror.
    pub activation_rms: f64,
    /// Largest RMS difference over all filters and their mirrors.
    pub max_filter_rms: f64,
}

impl InputCheck {
    /// Returns `true` if both mirrors are exact.
    pub fn is_exact(&self) -> bool {
        self.activation_rms == 0.0 && self.max_filter_rms == 0.0
    }

    /// Returns a human-readable one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "Activation tensor diff = {:.2}, max filter error = {:.2}",
            self.activation_rms, self.max_filter_rms
        )
    }
}

/// The outcome of one conv2D trial.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrialReport {
    /// Shape of the generated activation tensor.
    pub activation: TensorShape,
    /// Shape of each generated filter.
    pub filter: TensorShape,
    /// Number of filters (output channels).
    pub channels: usize,
    /// Simulated vector count `N`.
    pub hw_n: usize,
    /// Simulated operand dimension `P`.
    pub hw_p: usize,
    /// Datapath overflow policy.
    pub overflow: OverflowMode,
    /// Simulated result vs. float reference.
    pub comparison: Comparison,
    /// Engine counters.
    pub stats: MacStats,
    /// Mirror check, when requested.
    pub input_check: Option<InputCheck>,
    /// Wall-clock time of the whole trial.
    pub elapsed: Duration,
    /// Set when the diagnostic dump could not be written.
    pub dump_error: Option<String>,
}

impl TrialReport {
    /// RMS error between simulated and reference outputs, as a percentage.
    pub fn rms_percent(&self) -> f64 {
        self.comparison.rms_error * 100.0
    }

    /// `"<activation> by <C> x <filter>"`.
    pub fn geometry(&self) -> String {
        format!("{} by {} x {}", self.activation, self.channels, self.filter)
    }

    /// Returns the one-line console summary.
    pub fn summary(&self) -> String {
        format!(
            "conv2D trial: {}, {:.2}% rms error, {} sim time",
            self.geometry(),
            self.rms_percent(),
            format_elapsed(self.elapsed),
        )
    }
}

/// Aggregate over several trials run with one hardware configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TrialAggregate {
    pub trials: usize,
    pub mean_rms_percent: f64,
    pub max_rms_percent: f64,
    pub overflow_events: u64,
    pub mean_elapsed: Duration,
}

impl TrialAggregate {
    /// Aggregates `reports`; returns `None` if there are none.
    pub fn from_reports(reports: &[TrialReport]) -> Option<Self> {
        if reports.is_empty() {
            return None;
        }
        let trials = reports.len();
        let total_rms: f64 = reports.iter().map(TrialReport::rms_percent).sum();
        let max_rms = reports
            .iter()
            .map(TrialReport::rms_percent)
            .fold(0.0f64, f64::max);
        let total_elapsed: Duration = reports.iter().map(|r| r.elapsed).sum();
        Some(Self {
            trials,
            mean_rms_percent: total_rms / trials as f64,
            max_rms_percent: max_rms,
            overflow_events: reports.iter().map(|r| r.stats.overflow_events).sum(),
            mean_elapsed: total_elapsed / trials as u32,
        })
    }

    /// Returns a human-readable one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{} trials: {:.2}% mean rms error, {:.2}% max, {} overflow events, {} mean sim time",
            self.trials,
            self.mean_rms_percent,
            self.max_rms_percent,
            self.overflow_events,
            format_elapsed(self.mean_elapsed),
        )
    }
}
