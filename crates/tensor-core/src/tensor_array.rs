// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Ordered collection of equally-shaped tensors (a filter bank).

use crate::{Element, Tensor, TensorError, TensorShape, VectorArray};
use std::fmt;
use std::ops::Index;

/// An ordered, non-empty set of tensors that all share one shape.
///
/// Members are read-only once the array is built, which keeps the
/// shared-shape invariant intact.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorArray<T: Element> {
    shape: TensorShape,
    tensors: Vec<Tensor<T>>,
}

impl<T: Element> TensorArray<T> {
    /// Creates `count` zero tensors of the given shape.
    ///
    /// # Errors
    /// Returns [`TensorError::EmptyArray`] if `count == 0`.
    pub fn zeros(count: usize, shape: TensorShape) -> Result<Self, TensorError> {
        if count == 0 {
            return Err(TensorError::EmptyArray("tensor array"));
        }
        Ok(Self {
            shape,
            tensors: (0..count).map(|_| Tensor::zeros(shape)).collect(),
        })
    }

    /// Builds an array from existing tensors.
    ///
    /// # Errors
    /// Returns [`TensorError::EmptyArray`] for an empty input and
    /// [`TensorError::ShapeMismatch`] if any member differs in shape from
    /// the first.
    pub fn from_tensors(tensors: Vec<Tensor<T>>) -> Result<Self, TensorError> {
        let shape = match tensors.first() {
            Some(t) => *t.shape(),
            None => return Err(TensorError::EmptyArray("tensor array")),
        };
        if let Some(bad) = tensors.iter().find(|t| *t.shape() != shape) {
            return Err(TensorError::ShapeMismatch {
                op: "tensor array",
                lhs: shape,
                rhs: *bad.shape(),
            });
        }
        Ok(Self { shape, tensors })
    }

    /// Returns the number of member tensors.
    pub fn count(&self) -> usize {
        self.tensors.len()
    }

    /// Returns the shared member shape.
    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    /// Returns the number of elements in one member.
    pub fn member_len(&self) -> usize {
        self.shape.len()
    }

    /// Returns member `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Tensor<T>> {
        self.tensors.get(index)
    }

    /// Iterates over the members in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tensor<T>> {
        self.tensors.iter()
    }

    /// Converts every member to another element type.
    pub fn cast<U: Element>(&self) -> TensorArray<U> {
        TensorArray {
            shape: self.shape,
            tensors: self.tensors.iter().map(Tensor::cast).collect(),
        }
    }

    /// Serializes every member into one slot of a new [`VectorArray`].
    pub fn serialize(&self) -> VectorArray<T> {
        let mut table = VectorArray::zeros(self.count(), self.member_len());
        for (slot, tensor) in self.tensors.iter().enumerate() {
            table.slot_mut(slot).copy_from_slice(tensor.as_slice());
        }
        table
    }
}

impl<T: Element> Index<usize> for TensorArray<T> {
    type Output = Tensor<T>;

    fn index(&self, index: usize) -> &Tensor<T> {
        &self.tensors[index]
    }
}

impl<T: Element> fmt::Display for TensorArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.count(), self.shape)
    }
}
