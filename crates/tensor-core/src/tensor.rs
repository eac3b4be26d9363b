// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned three-dimensional tensor.

use crate::vector::dot_slices;
use crate::{DType, Element, TensorError, TensorShape, Vector};
use std::fmt;
use std::ops::{Index, IndexMut};

/// An owned width × height × depth tensor stored in contiguous memory.
///
/// `Tensor` is the primary data carrier of the simulator. It owns its data
/// buffer exclusively; `clone` is a deep copy and [`cast`](Tensor::cast)
/// builds a new tensor of another element type.
///
/// # Memory Layout
/// See [`TensorShape`]: width varies fastest, depth slowest. This is also
/// the order produced by [`serialize_into`](Tensor::serialize_into).
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T: Element> {
    shape: TensorShape,
    data: Vec<T>,
}

impl<T: Element> Tensor<T> {
    /// Creates a new tensor filled with zeros.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, TensorShape};
    /// let t = Tensor::<i8>::zeros(TensorShape::new(2, 3, 4).unwrap());
    /// assert_eq!(t.len(), 24);
    /// ```
    pub fn zeros(shape: TensorShape) -> Self {
        Self {
            shape,
            data: vec![T::ZERO; shape.len()],
        }
    }

    /// Creates a tensor from values laid out in storage order.
    ///
    /// # Errors
    /// Returns [`TensorError::LengthMismatch`] if `data.len() != shape.len()`.
    pub fn from_vec(shape: TensorShape, data: Vec<T>) -> Result<Self, TensorError> {
        if data.len() != shape.len() {
            return Err(TensorError::LengthMismatch {
                op: "tensor from_vec",
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    /// Returns the width.
    pub fn width(&self) -> usize {
        self.shape.width()
    }

    /// Returns the height.
    pub fn height(&self) -> usize {
        self.shape.height()
    }

    /// Returns the depth.
    pub fn depth(&self) -> usize {
        self.shape.depth()
    }

    /// Returns the number of elements.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the tensor's data type.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Returns the elements in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the elements in storage order, mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns element `(i, j, k)`, or `None` if out of bounds.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<T> {
        self.shape.offset(i, j, k).map(|o| self.data[o])
    }

    /// Fills the tensor with a constant value.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Converts every element to another element type.
    ///
    /// `i8 → f32` is exact; `f32 → i8` truncates toward zero and saturates.
    pub fn cast<U: Element>(&self) -> Tensor<U> {
        Tensor {
            shape: self.shape,
            data: self.data.iter().map(|&x| x.cast()).collect(),
        }
    }

    /// Copies the block of shape `block` whose origin is `(i, j, k)`.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if the block does not fit.
    pub fn extract_block(
        &self,
        i: usize,
        j: usize,
        k: usize,
        block: TensorShape,
    ) -> Result<Tensor<T>, TensorError> {
        let mut out = Tensor::zeros(block);
        self.serialize_block_into(i, j, k, block, &mut out.data)?;
        Ok(out)
    }

    /// Writes the block of shape `block` at `(i, j, k)` into `dst` in
    /// storage order, without materialising an intermediate tensor.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if the block does not fit and
    /// [`TensorError::LengthMismatch`] if `dst.len() != block.len()`.
    pub fn serialize_block_into(
        &self,
        i: usize,
        j: usize,
        k: usize,
        block: TensorShape,
        dst: &mut [T],
    ) -> Result<(), TensorError> {
        if !self.shape.fits_block(i, j, k, &block) {
            return Err(TensorError::ShapeMismatch {
                op: "extract block",
                lhs: self.shape,
                rhs: block,
            });
        }
        if dst.len() != block.len() {
            return Err(TensorError::LengthMismatch {
                op: "serialize block",
                expected: block.len(),
                actual: dst.len(),
            });
        }
        let bw = block.width();
        let mut out = dst.chunks_exact_mut(bw);
        for kk in 0..block.depth() {
            for jj in 0..block.height() {
                // Rows of a block are contiguous runs in the source.
                let start = ((k + kk) * self.height() + (j + jj)) * self.width() + i;
                if let Some(row) = out.next() {
                    row.copy_from_slice(&self.data[start..start + bw]);
                }
            }
        }
        Ok(())
    }

    /// Flattens the whole tensor into `dst` in storage order.
    ///
    /// # Errors
    /// Returns [`TensorError::LengthMismatch`] if `dst.len() != self.len()`.
    pub fn serialize_into(&self, dst: &mut [T]) -> Result<(), TensorError> {
        if dst.len() != self.data.len() {
            return Err(TensorError::LengthMismatch {
                op: "serialize tensor",
                expected: self.data.len(),
                actual: dst.len(),
            });
        }
        dst.copy_from_slice(&self.data);
        Ok(())
    }

    /// Flattens the tensor into a new [`Vector`].
    pub fn to_vector(&self) -> Vector<T> {
        Vector::from_vec(self.data.clone())
    }

    /// Inner product with an equally-shaped tensor.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
    pub fn dot(&self, other: &Tensor<T>) -> Result<T, TensorError> {
        if self.shape != other.shape {
            return Err(TensorError::ShapeMismatch {
                op: "tensor dot",
                lhs: self.shape,
                rhs: other.shape,
            });
        }
        dot_slices("tensor dot", &self.data, &other.data)
    }
}

impl<T: Element> Index<(usize, usize, usize)> for Tensor<T> {
    type Output = T;

    fn index(&self, (i, j, k): (usize, usize, usize)) -> &T {
        match self.shape.offset(i, j, k) {
            Some(o) => &self.data[o],
            None => panic!("tensor index ({i}, {j}, {k}) out of range for {}", self.shape),
        }
    }
}

impl<T: Element> IndexMut<(usize, usize, usize)> for Tensor<T> {
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut T {
        match self.shape.offset(i, j, k) {
            Some(o) => &mut self.data[o],
            None => panic!("tensor index ({i}, {j}, {k}) out of range for {}", self.shape),
        }
    }
}

impl<T: Element> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shape)
    }
}
