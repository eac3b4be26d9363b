// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # mac-engine
//!
//! Convolution engines for measuring the fidelity of a fixed-point
//! matrix-multiplier unit.
//!
//! Two engines share the [`ConvEngine`] interface:
//! - [`ReferenceConv`]: direct stride-1 unpadded convolution, generic over
//!   the element type;
//! - [`SimulatedMac`]: the same convolution lowered onto an `N`-vector by
//!   `P × P` multiplier with 8-bit operands and accumulators.
//!
//! [`compare`] measures how far the simulated output drifts from the
//! reference.

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod plan;

pub use compare::{compare, rms_error, Comparison};
pub use config::{HwConfig, HwElement, OverflowMode, HW_ELEMENT_BITS};
pub use engine::reference::ReferenceConv;
pub use engine::simulated::{MacRun, MacStats, SimulatedMac};
pub use engine::ConvEngine;
pub use error::EngineError;
pub use geometry::ConvGeometry;
pub use plan::{tiles, Tile, TilePlan};
