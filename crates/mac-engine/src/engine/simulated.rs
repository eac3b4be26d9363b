// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simulated fixed-point multiply-accumulate engine.
//!
//! The hardware accepts `N` activation vectors per pass and multiplies each
//! of them by a `P × P` operand matrix whose rows are filter slices:
//!
//! ```text
//!                  | <------- P -------> |
//!  | acc(n, 0)   |   | f(0, 0)   ...  f(0, P-1)   |   | v(n, 0)   |
//!  | acc(n, 1)   | += | f(1, 0)   ...  f(1, P-1)   | × | v(n, 1)   |    for n in 0..N
//!  |    ...      |   |   ...            ...       |   |   ...     |
//!  | acc(n, P-1) |   | f(P-1, 0) ...  f(P-1, P-1) |   | v(n, P-1) |
//! ```
//!
//! A convolution is lowered onto this primitive by serializing filters and
//! receptive fields into vectors of length `L = KW·KH·D`, then tiling
//! channels (by `P`), surface positions (by `N`) and the serialized length
//! (by `P`). Every product and sum stays 8 bits wide, so the overflow
//! behaviour of the real datapath is reproduced rather than avoided.

use super::ConvEngine;
use crate::plan::{tiles, Tile};
use crate::{ConvGeometry, EngineError, HwConfig, HwElement, OverflowMode, TilePlan};
use tensor_core::{Matrix, Tensor, TensorArray, Vector, VectorArray};

/// Counters collected over one engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MacStats {
    /// Channel tiles processed.
    pub channel_tiles: u64,
    /// Surface tiles processed, summed over channel tiles.
    pub surface_tiles: u64,
    /// Emulated hardware passes (one per channel tile × surface tile × slice).
    pub passes: u64,
    /// Multiply-accumulate operations issued, including zero-filled lanes.
    pub multiply_accumulates: u64,
    /// Steps whose exact result did not fit in 8 bits.
    pub overflow_events: u64,
}

impl MacStats {
    /// Fraction of issued multiply-accumulates that overflowed.
    pub fn overflow_rate(&self) -> f64 {
        if self.multiply_accumulates == 0 {
            return 0.0;
        }
        self.overflow_events as f64 / self.multiply_accumulates as f64
    }
}

/// Output of [`SimulatedMac::run`].
#[derive(Debug, Clone)]
pub struct MacRun {
    /// The convolution result.
    pub output: Tensor<HwElement>,
    /// Counters for this run.
    pub stats: MacStats,
    /// The tiling that was executed.
    pub plan: TilePlan,
}

/// The staging buffers of the simulated hardware.
///
/// Buffers always have their nominal size: the feed holds `N` vectors of
/// length `P`, the operand matrix is `P × P`, the accumulator bank is
/// `N × P`. Slots that a partial tile does not use are held at zero so
/// they contribute nothing to any valid accumulation.
#[derive(Debug)]
struct Staging {
    /// Serialized receptive fields of the current surface tile (`N × L`).
    fields: VectorArray<HwElement>,
    /// Activation slices fed to the array (`N × P`).
    feed: VectorArray<HwElement>,
    /// Filter slices, one per operand row (`P × P`).
    operand: Matrix<HwElement>,
    /// Accumulators: column = channel within tile, row = feed slot.
    acc: Matrix<HwElement>,
    /// Scratch output of one matrix × vector product.
    partial: Vector<HwElement>,
}

impl Staging {
    fn new(config: HwConfig, serial_len: usize) -> Self {
        let n = config.vector_count();
        let p = config.matrix_dim();
        Self {
            fields: VectorArray::zeros(n, serial_len),
            feed: VectorArray::zeros(n, p),
            operand: Matrix::zeros(p, p),
            acc: Matrix::zeros(p, n),
            partial: Vector::zeros(p),
        }
    }

    /// Serializes the receptive fields of `surface` into the first
    /// `surface.len` field slots and zeroes the rest.
    fn load_surface_tile(
        &mut self,
        activation: &Tensor<HwElement>,
        geometry: &ConvGeometry,
        surface: Tile,
    ) -> Result<(), EngineError> {
        self.fields.fill(0);
        for slot in 0..surface.len {
            let (i, j) = geometry.surface_position(surface.start + slot);
            activation.serialize_block_into(
                i,
                j,
                0,
                geometry.kernel(),
                self.fields.slot_mut(slot),
            )?;
        }
        self.acc.fill(0);
        Ok(())
    }

    /// Loads one `P`-wide slice of every active field and filter.
    ///
    /// Unused feed slots, unused operand rows and the tail of a short slice
    /// are all zero afterwards.
    fn load_slice(
        &mut self,
        filter_table: &VectorArray<HwElement>,
        channels: Tile,
        surface: Tile,
        slice: Tile,
    ) -> Result<(), EngineError> {
        self.feed.fill(0);
        for slot in 0..surface.len {
            self.feed
                .load_slice(slot, &self.fields[slot], slice.start, slice.len)?;
        }
        self.operand.fill(0);
        for row in 0..channels.len {
            self.operand.load_row(
                row,
                &filter_table[channels.start + row],
                slice.start,
                slice.len,
            )?;
        }
        Ok(())
    }

    /// One hardware pass: every feed vector times the operand matrix,
    /// accumulated into the bank.
    fn pass(&mut self, mode: OverflowMode, stats: &mut MacStats) -> Result<(), EngineError> {
        let mut overflows = 0u64;
        for slot in 0..self.feed.count() {
            self.operand.mul_vector_into(
                &self.feed[slot],
                &mut self.partial,
                |acc, a, b| mode.mac(acc, a, b, &mut overflows),
            )?;
            for (channel, &sum) in self.partial.as_slice().iter().enumerate() {
                let cell = &mut self.acc[(channel, slot)];
                *cell = mode.add(*cell, sum, &mut overflows);
            }
        }
        let n = self.feed.count() as u64;
        let p = self.operand.width() as u64;
        stats.passes += 1;
        stats.multiply_accumulates += n * p * p;
        stats.overflow_events += overflows;
        Ok(())
    }

    /// Copies the valid accumulators of the current tile pair into `output`.
    fn store(
        &self,
        output: &mut Tensor<HwElement>,
        geometry: &ConvGeometry,
        channels: Tile,
        surface: Tile,
    ) {
        for slot in 0..surface.len {
            let (i, j) = geometry.surface_position(surface.start + slot);
            for row in 0..channels.len {
                output[(i, j, channels.start + row)] = self.acc[(row, slot)];
            }
        }
    }
}

/// The simulated `N`-vector × `P × P` multiply-accumulate engine.
///
/// # Example
/// ```
/// use mac_engine::{ConvEngine, HwConfig, SimulatedMac};
/// use tensor_core::{Tensor, TensorArray, TensorShape};
///
/// let engine = SimulatedMac::new(HwConfig::new(4, 3).unwrap());
/// let mut act = Tensor::<i8>::zeros(TensorShape::new(4, 4, 1).unwrap());
/// act.fill(1);
/// let mut filter = Tensor::<i8>::zeros(TensorShape::new(2, 2, 1).unwrap());
/// filter.fill(2);
/// let bank = TensorArray::from_tensors(vec![filter]).unwrap();
///
/// let out = engine.conv2d(&act, &bank).unwrap();
/// assert!(out.as_slice().iter().all(|&x| x == 8));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimulatedMac {
    config: HwConfig,
    overflow: OverflowMode,
}

impl SimulatedMac {
    /// Creates an engine with wrapping arithmetic.
    pub fn new(config: HwConfig) -> Self {
        Self {
            config,
            overflow: OverflowMode::Wrapping,
        }
    }

    /// Sets the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowMode) -> Self {
        self.overflow = overflow;
        self
    }

    /// Returns the hardware configuration.
    pub fn config(&self) -> HwConfig {
        self.config
    }

    /// Returns the overflow policy.
    pub fn overflow(&self) -> OverflowMode {
        self.overflow
    }

    /// Runs the tiled convolution and returns the output with run counters.
    ///
    /// # Errors
    /// Returns [`EngineError`] if the activation and filters do not form a
    /// valid convolution.
    pub fn run(
        &self,
        activation: &Tensor<HwElement>,
        filters: &TensorArray<HwElement>,
    ) -> Result<MacRun, EngineError> {
        let geometry = ConvGeometry::of(activation, filters)?;
        let plan = TilePlan::new(&geometry, self.config);
        tracing::debug!("{} on {}", plan.summary(), self.config);

        let n = self.config.vector_count();
        let p = self.config.matrix_dim();
        let filter_table = filters.serialize();
        let mut staging = Staging::new(self.config, geometry.serial_len());
        let mut output = Tensor::zeros(geometry.output());
        let mut stats = MacStats::default();

        for channels in tiles(geometry.channels(), p) {
            stats.channel_tiles += 1;
            for surface in tiles(geometry.surface_count(), n) {
                stats.surface_tiles += 1;
                staging.load_surface_tile(activation, &geometry, surface)?;
                for slice in tiles(geometry.serial_len(), p) {
                    staging.load_slice(&filter_table, channels, surface, slice)?;
                    staging.pass(self.overflow, &mut stats)?;
                }
                staging.store(&mut output, &geometry, channels, surface);
            }
            tracing::trace!(
                "channel tile {}..{} done, {} overflow events so far",
                channels.start,
                channels.end(),
                stats.overflow_events,
            );
        }

        Ok(MacRun {
            output,
            stats,
            plan,
        })
    }
}

impl ConvEngine<HwElement> for SimulatedMac {
    fn name(&self) -> &str {
        "simulated-mac"
    }

    fn conv2d(
        &self,
        activation: &Tensor<HwElement>,
        filters: &TensorArray<HwElement>,
    ) -> Result<Tensor<HwElement>, EngineError> {
        self.run(activation, filters).map(|r| r.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::TensorShape;

    fn shape(w: usize, h: usize, d: usize) -> TensorShape {
        TensorShape::new(w, h, d).unwrap()
    }

    fn counting_tensor(s: TensorShape) -> Tensor<HwElement> {
        let data = (0..s.len()).map(|x| (x % 5) as i8 - 2).collect();
        Tensor::from_vec(s, data).unwrap()
    }

    #[test]
    fn test_staging_zero_fills_partial_tiles() {
        let config = HwConfig::new(3, 4).unwrap();
        let act = counting_tensor(shape(4, 2, 2));
        let bank = TensorArray::from_tensors(vec![counting_tensor(shape(3, 2, 2)); 2]).unwrap();
        let geometry = ConvGeometry::of(&act, &bank).unwrap();
        let table = bank.serialize();
        let mut st = Staging::new(config, geometry.serial_len());

        // Dirty every buffer first.
        st.fields.fill(9);
        st.feed.fill(9);
        st.operand.fill(9);
        st.acc.fill(9);

        // Surface tile of 2 (of 3 slots), channel tile of 2 (of 4 rows),
        // last slice of L = 12 with P = 4 is full, so use a short one by hand.
        let surface = Tile { start: 0, len: 2 };
        let channels = Tile { start: 0, len: 2 };
        let slice = Tile { start: 10, len: 2 };
        st.load_surface_tile(&act, &geometry, surface).unwrap();
        st.load_slice(&table, channels, surface, slice).unwrap();

        assert!(st.fields[2].as_slice().iter().all(|&x| x == 0));
        assert!(st.feed[2].as_slice().iter().all(|&x| x == 0));
        assert!(st.acc.as_slice().iter().all(|&x| x == 0));
        for slot in 0..2 {
            assert_eq!(&st.feed[slot].as_slice()[2..], &[0, 0]);
            assert_eq!(&st.feed[slot].as_slice()[..2], &st.fields[slot].as_slice()[10..12]);
        }
        for row in 2..4 {
            assert!(st.operand.row(row).iter().all(|&x| x == 0));
        }
        for row in 0..2 {
            assert_eq!(&st.operand.row(row)[2..], &[0, 0]);
        }
    }

    #[test]
    fn test_pass_counts_macs() {
        let config = HwConfig::new(2, 3).unwrap();
        let mut st = Staging::new(config, 3);
        let mut stats = MacStats::default();
        st.pass(OverflowMode::Wrapping, &mut stats).unwrap();
        assert_eq!(stats.passes, 1);
        assert_eq!(stats.multiply_accumulates, 2 * 3 * 3);
        assert_eq!(stats.overflow_events, 0);
    }

    #[test]
    fn test_stats_match_plan() {
        let engine = SimulatedMac::new(HwConfig::new(5, 4).unwrap());
        let act = counting_tensor(shape(6, 5, 2));
        let bank = TensorArray::from_tensors(vec![counting_tensor(shape(2, 3, 2)); 7]).unwrap();
        let run = engine.run(&act, &bank).unwrap();
        assert_eq!(run.stats.passes, run.plan.hardware_passes() as u64);
        assert_eq!(run.stats.multiply_accumulates, run.stats.passes * 5 * 4 * 4);
        assert_eq!(run.stats.channel_tiles, run.plan.channel_tiles as u64);
        assert_eq!(
            run.stats.surface_tiles,
            (run.plan.channel_tiles * run.plan.surface_tiles) as u64
        );
    }

    #[test]
    fn test_saturating_clamps() {
        let mut act = Tensor::<HwElement>::zeros(shape(4, 4, 1));
        act.fill(100);
        let mut filt = Tensor::<HwElement>::zeros(shape(2, 2, 1));
        filt.fill(100);
        let bank = TensorArray::from_tensors(vec![filt]).unwrap();

        let engine = SimulatedMac::new(HwConfig::new(2, 3).unwrap())
            .with_overflow(OverflowMode::Saturating);
        let run = engine.run(&act, &bank).unwrap();
        assert!(run.output.as_slice().iter().all(|&x| x == 127));
        assert!(run.stats.overflow_events > 0);
        assert!(run.stats.overflow_rate() > 0.0);
    }

    #[test]
    fn test_engine_name_and_accessors() {
        let engine = SimulatedMac::new(HwConfig::default());
        assert_eq!(ConvEngine::<HwElement>::name(&engine), "simulated-mac");
        assert_eq!(engine.overflow(), OverflowMode::Wrapping);
        assert_eq!(engine.config(), HwConfig::default());
    }
}
