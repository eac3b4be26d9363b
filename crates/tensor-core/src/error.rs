// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for container operations.

use crate::TensorShape;

/// Errors that can occur during container operations.
///
/// All of these are precondition violations: the caller passed containers
/// whose sizes do not fit the requested operation.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// A shape with a zero dimension was requested.
    #[error("invalid shape {width}x{height}x{depth}: every dimension must be at least 1")]
    InvalidShape {
        width: usize,
        height: usize,
        depth: usize,
    },

    /// Two tensors have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: TensorShape,
        rhs: TensorShape,
    },

    /// Two one-dimensional buffers have incompatible lengths.
    #[error("length mismatch in {op}: expected {expected}, got {actual}")]
    LengthMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A slice would read or write past the end of its buffer.
    #[error("slice [{offset}, {offset}+{len}) out of bounds for length {bound}")]
    SliceOutOfBounds {
        offset: usize,
        len: usize,
        bound: usize,
    },

    /// A block or row index lies outside its container.
    #[error("index {index} out of bounds in {op} (limit {limit})")]
    IndexOutOfBounds {
        op: &'static str,
        index: usize,
        limit: usize,
    },

    /// An array container was built with no members.
    #[error("{0} must contain at least one element")]
    EmptyArray(&'static str),
}
