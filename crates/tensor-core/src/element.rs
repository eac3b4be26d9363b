// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element types a container can hold, and the arithmetic each one uses.

use std::fmt;

/// Enumerates the numeric types a [`crate::Tensor`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DType {
    /// 8-bit signed integer (the simulated hardware datapath).
    I8,
    /// 32-bit IEEE 754 floating point (the reference datapath).
    F32,
}

impl DType {
    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::I8 => 1,
            DType::F32 => 4,
        }
    }

    /// Returns a human-readable label for this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::I8 => "i8",
            DType::F32 => "f32",
        }
    }

    /// Returns `true` for integer (fixed-point) types.
    pub fn is_integer(self) -> bool {
        matches!(self, DType::I8)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i8 {}
    impl Sealed for f32 {}
}

/// A numeric element usable in every container of this crate.
///
/// The trait is sealed: only `i8` and `f32` implement it. Arithmetic goes
/// through [`acc_add`](Element::acc_add) and [`acc_mul`](Element::acc_mul)
/// so that each type keeps its native overflow behaviour. For `i8` that is
/// two's-complement wraparound at every step, exactly like an 8-bit
/// register; for `f32` it is ordinary IEEE arithmetic.
pub trait Element:
    sealed::Sealed
    + Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Runtime tag for this element type.
    const DTYPE: DType;

    /// The additive identity.
    const ZERO: Self;

    /// `self + rhs` in the element's native arithmetic.
    fn acc_add(self, rhs: Self) -> Self;

    /// `self * rhs` in the element's native arithmetic.
    fn acc_mul(self, rhs: Self) -> Self;

    /// `self + a * b`, one multiply-accumulate step.
    fn mul_acc(self, a: Self, b: Self) -> Self {
        self.acc_add(a.acc_mul(b))
    }

    /// Widens to `f64` without loss.
    fn to_f64(self) -> f64;

    /// Converts from `f64`, truncating toward zero and saturating at the
    /// type's bounds (Rust `as` semantics).
    fn from_f64(value: f64) -> Self;

    /// Converts to another element type.
    fn cast<U: Element>(self) -> U {
        U::from_f64(self.to_f64())
    }

    /// Formats the value for the tabular diagnostic dump.
    fn format_field(self) -> String;
}

impl Element for i8 {
    const DTYPE: DType = DType::I8;
    const ZERO: Self = 0;

    #[inline]
    fn acc_add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    #[inline]
    fn acc_mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as i8
    }

    fn format_field(self) -> String {
        self.to_string()
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
    const ZERO: Self = 0.0;

    #[inline]
    fn acc_add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn acc_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn format_field(self) -> String {
        format!("{self:.4}")
    }
}
