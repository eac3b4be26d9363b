// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Hardware configuration: tile dimensions, element width and overflow policy.

use crate::EngineError;
use std::fmt;
use std::str::FromStr;

/// Element type of the simulated datapath.
pub type HwElement = i8;

/// Width in bits of every operand, product and accumulator in the simulated
/// datapath.
pub const HW_ELEMENT_BITS: u32 = HwElement::BITS;

/// Dimensions of the simulated multiplier.
///
/// - `n`: number of activation vectors fed per pass (rows of the feed).
/// - `p`: operand matrix dimension; also the number of filters per channel
///   tile and the dot-product slice length per pass.
///
/// Immutable once built; engines receive it by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HwConfig {
    n: usize,
    p: usize,
}

impl HwConfig {
    /// Creates a configuration for an `n`-vector feed driving a `p × p` array.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] if either dimension is zero.
    pub fn new(n: usize, p: usize) -> Result<Self, EngineError> {
        if n == 0 || p == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "tile dimensions must be at least 1 (got N={n}, P={p})"
            )));
        }
        Ok(Self { n, p })
    }

    /// Number of parallel activation vectors per pass.
    pub fn vector_count(&self) -> usize {
        self.n
    }

    /// Operand matrix dimension.
    pub fn matrix_dim(&self) -> usize {
        self.p
    }
}

impl Default for HwConfig {
    fn default() -> Self {
        Self { n: 16, p: 16 }
    }
}

impl fmt::Display for HwConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vectors by {} x {} MM", self.n, self.p, self.p)
    }
}

/// What the datapath does when an 8-bit result leaves `[-128, 127]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowMode {
    /// Two's-complement wraparound (plain 8-bit registers).
    #[default]
    Wrapping,
    /// Clamp to the nearest representable value (saturating adders).
    Saturating,
}

impl OverflowMode {
    /// One multiply-accumulate step: `acc + a * b` narrowed to 8 bits.
    ///
    /// Increments `overflows` whenever the exact result did not fit.
    #[inline]
    pub fn mac(self, acc: HwElement, a: HwElement, b: HwElement, overflows: &mut u64) -> HwElement {
        // |acc + a*b| <= 128 + 128*128, well inside i16.
        let exact = i16::from(acc) + i16::from(a) * i16::from(b);
        self.narrow(exact, overflows)
    }

    /// One accumulation step: `acc + x` narrowed to 8 bits.
    #[inline]
    pub fn add(self, acc: HwElement, x: HwElement, overflows: &mut u64) -> HwElement {
        self.narrow(i16::from(acc) + i16::from(x), overflows)
    }

    #[inline]
    fn narrow(self, exact: i16, overflows: &mut u64) -> HwElement {
        match HwElement::try_from(exact) {
            Ok(v) => v,
            Err(_) => {
                *overflows += 1;
                match self {
                    OverflowMode::Wrapping => exact as HwElement,
                    OverflowMode::Saturating => {
                        exact.clamp(i16::from(HwElement::MIN), i16::from(HwElement::MAX))
                            as HwElement
                    }
                }
            }
        }
    }

    /// Returns the configuration label for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            OverflowMode::Wrapping => "wrapping",
            OverflowMode::Saturating => "saturating",
        }
    }
}

impl fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wrapping" | "wrap" => Ok(OverflowMode::Wrapping),
            "saturating" | "sat" => Ok(OverflowMode::Saturating),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown overflow mode '{other}'; expected 'wrapping' or 'saturating'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_width_is_eight_bits() {
        assert_eq!(HW_ELEMENT_BITS, 8);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(HwConfig::new(0, 4).is_err());
        assert!(HwConfig::new(4, 0).is_err());
        let c = HwConfig::new(1, 1).unwrap();
        assert_eq!(c.vector_count(), 1);
        assert_eq!(c.matrix_dim(), 1);
    }

    #[test]
    fn test_display() {
        let c = HwConfig::new(16, 8).unwrap();
        assert_eq!(c.to_string(), "16 vectors by 8 x 8 MM");
    }

    #[test]
    fn test_wrapping_mac() {
        let mut ovf = 0;
        assert_eq!(OverflowMode::Wrapping.mac(10, 3, 4, &mut ovf), 22);
        assert_eq!(ovf, 0);
        assert_eq!(OverflowMode::Wrapping.mac(100, 10, 10, &mut ovf), -56);
        assert_eq!(ovf, 1);
    }

    #[test]
    fn test_saturating_mac() {
        let mut ovf = 0;
        assert_eq!(OverflowMode::Saturating.mac(100, 10, 10, &mut ovf), 127);
        assert_eq!(OverflowMode::Saturating.mac(-100, 10, -10, &mut ovf), -128);
        assert_eq!(ovf, 2);
        assert_eq!(OverflowMode::Saturating.add(-128, -128, &mut ovf), -128);
        assert_eq!(ovf, 3);
    }

    #[test]
    fn test_wrapping_matches_native_i8() {
        use tensor_core::Element;
        let mut ovf = 0;
        for acc in [-128i8, -7, 0, 55, 127] {
            for a in [-128i8, -3, 0, 9, 127] {
                for b in [-128i8, -1, 2, 127] {
                    assert_eq!(OverflowMode::Wrapping.mac(acc, a, b, &mut ovf), acc.mul_acc(a, b));
                }
            }
        }
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("wrapping".parse::<OverflowMode>().unwrap(), OverflowMode::Wrapping);
        assert_eq!("Saturating".parse::<OverflowMode>().unwrap(), OverflowMode::Saturating);
        assert!("bogus".parse::<OverflowMode>().is_err());
        assert_eq!(OverflowMode::default(), OverflowMode::Wrapping);
    }
}
