// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Trial configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! hw_n = 16
//! hw_p = 16
//! overflow = "wrapping"
//! max_int = 16
//! seed = 42
//! check_inputs = false
//!
//! [activation]
//! width = { min = 16, max = 32 }
//! height = { min = 16, max = 32 }
//! depth = { min = 1, max = 16 }
//!
//! [filters]
//! kernel_width = { min = 1, max = 11 }
//! kernel_height = { min = 1, max = 11 }
//! channels = { min = 1, max = 32 }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use crate::TrialError;
use mac_engine::{HwConfig, OverflowMode};
use std::fmt;
use std::path::Path;

/// Smallest vector count accepted for a trial.
pub const MIN_HW_N: usize = 2;
/// Smallest operand matrix dimension accepted for a trial.
pub const MIN_HW_P: usize = 3;
/// Smallest accepted magnitude bound for generated values.
pub const MIN_MAX_INT: i32 = 2;
/// Largest accepted magnitude bound for generated values.
pub const MAX_MAX_INT: i32 = i8::MAX as i32;

/// An inclusive range `[min, max]` for one randomly drawn dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DimRange {
    pub min: usize,
    pub max: usize,
}

impl DimRange {
    /// Creates a range.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `value` lies inside the range.
    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Raises zero bounds to 1 and an inverted `max` to `min`.
    fn normalized(self, name: &str) -> Self {
        let min = self.min.max(1);
        let max = self.max.max(min);
        if min != self.min || max != self.max {
            tracing::warn!("{name} range {self} adjusted to [{min}..{max}]");
        }
        Self { min, max }
    }
}

impl fmt::Display for DimRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.min, self.max)
    }
}

/// Size ranges for the generated activation tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ActivationRanges {
    pub width: DimRange,
    pub height: DimRange,
    pub depth: DimRange,
}

impl Default for ActivationRanges {
    fn default() -> Self {
        Self {
            width: DimRange::new(16, 32),
            height: DimRange::new(16, 32),
            depth: DimRange::new(1, 16),
        }
    }
}

/// Size ranges for the generated filter bank. The filter depth always
/// equals the activation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterRanges {
    pub kernel_width: DimRange,
    pub kernel_height: DimRange,
    pub channels: DimRange,
}

impl Default for FilterRanges {
    fn default() -> Self {
        Self {
            kernel_width: DimRange::new(1, 11),
            kernel_height: DimRange::new(1, 11),
            channels: DimRange::new(1, 32),
        }
    }
}

/// Configuration for one or more conv2D trials.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Vector count `N` of the simulated multiplier.
    pub hw_n: usize,
    /// Operand matrix dimension `P` of the simulated multiplier.
    pub hw_p: usize,
    /// Datapath overflow policy.
    pub overflow: OverflowMode,
    /// Generated values are drawn uniformly from `[-max_int, max_int]`.
    pub max_int: i32,
    /// RNG seed; drawn from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Compare the float mirrors against the integer inputs before running.
    pub check_inputs: bool,
    pub activation: ActivationRanges,
    pub filters: FilterRanges,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            hw_n: 16,
            hw_p: 16,
            overflow: OverflowMode::Wrapping,
            max_int: 16,
            seed: None,
            check_inputs: false,
            activation: ActivationRanges::default(),
            filters: FilterRanges::default(),
        }
    }
}

impl TrialConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TrialError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrialError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, TrialError> {
        toml::from_str(toml_str).map_err(|e| TrialError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, TrialError> {
        toml::to_string_pretty(self)
            .map_err(|e| TrialError::Config(format!("TOML serialise error: {e}")))
    }

    /// Returns a copy with every out-of-range setting clamped.
    ///
    /// - `hw_n` is raised to at least 2, `hw_p` to at least 3.
    /// - `max_int` is clamped to `[2, 127]`.
    /// - zero range bounds become 1; a `max` below `min` becomes `min`.
    pub fn normalized(&self) -> Self {
        let hw_n = self.hw_n.max(MIN_HW_N);
        if hw_n != self.hw_n {
            tracing::warn!("hw_n {} raised to {hw_n}", self.hw_n);
        }
        let hw_p = self.hw_p.max(MIN_HW_P);
        if hw_p != self.hw_p {
            tracing::warn!("hw_p {} raised to {hw_p}", self.hw_p);
        }
        let max_int = self.max_int.clamp(MIN_MAX_INT, MAX_MAX_INT);
        if max_int != self.max_int {
            tracing::warn!("max_int {} clamped to {max_int}", self.max_int);
        }

        Self {
            hw_n,
            hw_p,
            max_int,
            activation: ActivationRanges {
                width: self.activation.width.normalized("width"),
                height: self.activation.height.normalized("height"),
                depth: self.activation.depth.normalized("depth"),
            },
            filters: FilterRanges {
                kernel_width: self.filters.kernel_width.normalized("kernel width"),
                kernel_height: self.filters.kernel_height.normalized("kernel height"),
                channels: self.filters.channels.normalized("channels"),
            },
            ..self.clone()
        }
    }

    /// Builds the hardware configuration for this trial.
    pub fn hw_config(&self) -> Result<HwConfig, TrialError> {
        Ok(HwConfig::new(self.hw_n, self.hw_p)?)
    }

    /// Returns the one-line description of the generation ranges.
    pub fn ranges_summary(&self) -> String {
        let a = &self.activation;
        let f = &self.filters;
        format!(
            "Ranges: {}x{}x{} by {} of {}x{}x{}, maxInt = {}",
            a.width,
            a.height,
            a.depth,
            f.channels,
            f.kernel_width,
            f.kernel_height,
            a.depth,
            self.max_int,
        )
    }
}
