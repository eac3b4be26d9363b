// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The trial driver.
//!
//! ```text
//! generate i8 inputs ──┬── SimulatedMac (i8, tiled) ──┐
//!                      │                              ├── compare ── TrialReport
//!  cast to f32 mirror ─┴── ReferenceConv (f32) ───────┘
//! ```
//!
//! A runner owns one seeded RNG, so a sequence of trials is reproducible
//! from its seed alone.

use crate::dump::TrialTensors;
use crate::{InputCheck, InputGenerator, TrialConfig, TrialError, TrialInputs, TrialReport};
use mac_engine::{compare, rms_error, ConvEngine, ReferenceConv, SimulatedMac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::time::Instant;
use tensor_core::{Tensor, TensorArray};

/// Runs conv2D trials for one normalized configuration.
///
/// # Example
/// ```no_run
/// use trial::{TrialConfig, TrialRunner};
///
/// let config = TrialConfig { seed: Some(1), hw_n: 8, hw_p: 4, ..Default::default() };
/// let mut runner = TrialRunner::new(&config).unwrap();
/// let report = runner.run_trial(None).unwrap();
/// println!("{}", report.summary());
/// ```
#[derive(Debug)]
pub struct TrialRunner {
    config: TrialConfig,
    generator: InputGenerator,
    engine: SimulatedMac,
    seed: u64,
    rng: ChaCha8Rng,
}

impl TrialRunner {
    /// Creates a runner. The configuration is normalized first; without a
    /// configured seed one is drawn from the OS and logged.
    pub fn new(config: &TrialConfig) -> Result<Self, TrialError> {
        let config = config.normalized();
        let engine = SimulatedMac::new(config.hw_config()?).with_overflow(config.overflow);
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::rngs::OsRng.next_u64();
                tracing::info!("no seed configured; using {seed}");
                seed
            }
        };
        tracing::debug!("HW MM: {}, {} overflow", engine.config(), config.overflow);
        Ok(Self {
            generator: InputGenerator::new(&config),
            engine,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        })
    }

    /// Returns the normalized configuration.
    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    /// Returns the RNG seed this runner started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the simulated engine.
    pub fn engine(&self) -> &SimulatedMac {
        &self.engine
    }

    /// Draws fresh inputs and runs one trial on them.
    ///
    /// When `dump` is set, all six tensors are written there. A dump
    /// failure is logged and recorded in the report; it does not fail the
    /// trial.
    pub fn run_trial(&mut self, dump: Option<&Path>) -> Result<TrialReport, TrialError> {
        let start = Instant::now();
        let inputs = self.generator.generate(&mut self.rng)?;
        self.evaluate(&inputs, dump, start)
    }

    /// Runs one trial on caller-supplied inputs.
    pub fn run_inputs(
        &self,
        inputs: &TrialInputs,
        dump: Option<&Path>,
    ) -> Result<TrialReport, TrialError> {
        self.evaluate(inputs, dump, Instant::now())
    }

    /// Runs `count` trials in sequence.
    ///
    /// With `dump` set and `count > 1`, each trial writes its own numbered
    /// file (see [`crate::numbered_path`]).
    pub fn run_trials(
        &mut self,
        count: usize,
        dump: Option<&Path>,
    ) -> Result<Vec<TrialReport>, TrialError> {
        (0..count)
            .map(|index| {
                let path = dump.map(|p| crate::numbered_path(p, index, count));
                self.run_trial(path.as_deref())
            })
            .collect()
    }

    fn evaluate(
        &self,
        inputs: &TrialInputs,
        dump: Option<&Path>,
        start: Instant,
    ) -> Result<TrialReport, TrialError> {
        let activation = &inputs.activation;
        let filters = &inputs.filters;
        let ref_activation: Tensor<f32> = activation.cast();
        let ref_filters: TensorArray<f32> = filters.cast();

        let input_check = if self.config.check_inputs {
            let check = check_mirrors(activation, filters, &ref_activation, &ref_filters)?;
            tracing::info!("{}", check.summary());
            Some(check)
        } else {
            None
        };

        let run = self.engine.run(activation, filters)?;
        let reference = ReferenceConv.conv2d(&ref_activation, &ref_filters)?;
        let comparison = compare(&run.output, &reference)?;
        tracing::debug!("{}", comparison.summary());

        let dump_error = dump.and_then(|path| {
            let tensors = TrialTensors {
                simulated_activation: activation,
                reference_activation: &ref_activation,
                simulated_filters: filters,
                reference_filters: &ref_filters,
                simulated_result: &run.output,
                reference_result: &reference,
            };
            match tensors.write_file(path) {
                Ok(()) => {
                    tracing::debug!("dumped trial tensors to {}", path.display());
                    None
                }
                Err(e) => {
                    tracing::warn!("{e}");
                    Some(e.to_string())
                }
            }
        });

        let report = TrialReport {
            activation: *activation.shape(),
            filter: *filters.shape(),
            channels: filters.count(),
            hw_n: self.engine.config().vector_count(),
            hw_p: self.engine.config().matrix_dim(),
            overflow: self.engine.overflow(),
            comparison,
            stats: run.stats,
            input_check,
            elapsed: start.elapsed(),
            dump_error,
        };
        tracing::info!(
            "{}: {} passes, {} overflow events",
            report.geometry(),
            report.stats.passes,
            report.stats.overflow_events,
        );
        Ok(report)
    }
}

/// Compares the float mirrors of a trial's inputs against the originals.
pub fn check_mirrors(
    activation: &Tensor<i8>,
    filters: &TensorArray<i8>,
    ref_activation: &Tensor<f32>,
    ref_filters: &TensorArray<f32>,
) -> Result<InputCheck, TrialError> {
    let activation_rms = rms_error(activation, ref_activation)?;
    let mut max_filter_rms = 0.0f64;
    for (f, r) in filters.iter().zip(ref_filters.iter()) {
        max_filter_rms = max_filter_rms.max(rms_error(f, r)?);
    }
    Ok(InputCheck {
        activation_rms,
        max_filter_rms,
    })
}
