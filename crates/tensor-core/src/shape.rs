// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Three-dimensional shape descriptor and flat-offset arithmetic.

use crate::TensorError;
use std::fmt;

/// Describes the extent of a [`crate::Tensor`]: width × height × depth.
///
/// Shapes are immutable once created. Every dimension is at least 1, so a
/// shape always describes a non-empty tensor.
///
/// # Memory Layout
/// Element `(i, j, k)` lives at flat offset `(k * height + j) * width + i`:
/// rows are packed within a plane and planes are packed along depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TensorShape {
    width: usize,
    height: usize,
    depth: usize,
}

impl TensorShape {
    /// Creates a new shape.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if any dimension is zero.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::TensorShape;
    /// let s = TensorShape::new(2, 3, 4).unwrap();
    /// assert_eq!(s.len(), 24);
    /// assert!(TensorShape::new(0, 3, 4).is_err());
    /// ```
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self, TensorError> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(TensorError::InvalidShape {
                width,
                height,
                depth,
            });
        }
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Returns the width (fastest-varying dimension).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the depth (slowest-varying dimension).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the total number of elements.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Returns `true` if `(i, j, k)` lies inside this shape.
    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.width && j < self.height && k < self.depth
    }

    /// Computes the flat offset of `(i, j, k)`, or `None` if out of bounds.
    pub fn offset(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        self.contains(i, j, k)
            .then(|| (k * self.height + j) * self.width + i)
    }

    /// Returns `true` if a block of shape `block` placed at `(i, j, k)`
    /// fits entirely inside this shape.
    pub fn fits_block(&self, i: usize, j: usize, k: usize, block: &TensorShape) -> bool {
        i + block.width <= self.width
            && j + block.height <= self.height
            && k + block.depth <= self.depth
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{}x{}]", self.width, self.height, self.depth)
    }
}
