// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # trial
//!
//! Randomized conv2D trials measuring the numerical fidelity of the
//! simulated multiplier.
//!
//! A trial:
//! 1. draws an 8-bit activation tensor and filter bank within the ranges
//!    of a [`TrialConfig`];
//! 2. mirrors both into `f32` exactly;
//! 3. convolves the 8-bit inputs on the simulated hardware and the float
//!    mirrors on the reference engine;
//! 4. reports the RMS difference and the elapsed wall time, optionally
//!    dumping all six tensors as CSV.

mod config;
mod driver;
mod dump;
mod error;
mod generator;
mod report;

pub use config::{
    ActivationRanges, DimRange, FilterRanges, TrialConfig, MAX_MAX_INT, MIN_HW_N, MIN_HW_P,
    MIN_MAX_INT,
};
pub use driver::{check_mirrors, TrialRunner};
pub use dump::{numbered_path, write_tensor, write_tensor_array, TrialTensors};
pub use error::TrialError;
pub use generator::{InputGenerator, TrialInputs};
pub use report::{format_elapsed, InputCheck, TrialAggregate, TrialReport};
