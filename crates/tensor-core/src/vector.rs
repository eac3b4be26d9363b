// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! One-dimensional vectors and fixed-width vector arrays.

use crate::{Element, TensorError};
use std::ops::{Index, IndexMut};

/// Copies `src[offset..offset + len]` into `dst[..len]`.
///
/// Both ends are bounds-checked before any element is written.
pub(crate) fn copy_slice<T: Element>(
    dst: &mut [T],
    src: &[T],
    offset: usize,
    len: usize,
) -> Result<(), TensorError> {
    let end = offset.checked_add(len).ok_or(TensorError::SliceOutOfBounds {
        offset,
        len,
        bound: src.len(),
    })?;
    if end > src.len() {
        return Err(TensorError::SliceOutOfBounds {
            offset,
            len,
            bound: src.len(),
        });
    }
    if len > dst.len() {
        return Err(TensorError::SliceOutOfBounds {
            offset: 0,
            len,
            bound: dst.len(),
        });
    }
    dst[..len].copy_from_slice(&src[offset..end]);
    Ok(())
}

/// Inner product of two equal-length slices in the element's native arithmetic.
pub(crate) fn dot_slices<T: Element>(
    op: &'static str,
    lhs: &[T],
    rhs: &[T],
) -> Result<T, TensorError> {
    if lhs.len() != rhs.len() {
        return Err(TensorError::LengthMismatch {
            op,
            expected: lhs.len(),
            actual: rhs.len(),
        });
    }
    Ok(lhs
        .iter()
        .zip(rhs)
        .fold(T::ZERO, |acc, (&a, &b)| acc.mul_acc(a, b)))
}

/// A dense, owned one-dimensional array.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T: Element> {
    data: Vec<T>,
}

impl<T: Element> Vector<T> {
    /// Creates a zero-filled vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![T::ZERO; len],
        }
    }

    /// Wraps an existing buffer.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the elements as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the vector and returns its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Returns a copy multiplied elementwise by `scalar`.
    pub fn scaled(&self, scalar: T) -> Self {
        Self {
            data: self.data.iter().map(|&x| x.acc_mul(scalar)).collect(),
        }
    }

    /// Inner product with another vector of equal length.
    ///
    /// # Errors
    /// Returns [`TensorError::LengthMismatch`] if the lengths differ.
    pub fn dot(&self, other: &Vector<T>) -> Result<T, TensorError> {
        dot_slices("vector dot", &self.data, &other.data)
    }

    /// Elementwise sum with another vector of equal length.
    ///
    /// # Errors
    /// Returns [`TensorError::LengthMismatch`] if the lengths differ.
    pub fn elementwise_add(&self, other: &Vector<T>) -> Result<Self, TensorError> {
        if self.len() != other.len() {
            return Err(TensorError::LengthMismatch {
                op: "vector add",
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| a.acc_add(b))
                .collect(),
        })
    }

    /// Returns a copy of `self[offset..offset + len]`.
    ///
    /// # Errors
    /// Returns [`TensorError::SliceOutOfBounds`] if the range exceeds the vector.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, TensorError> {
        let mut out = Self::zeros(len);
        copy_slice(&mut out.data, &self.data, offset, len)?;
        Ok(out)
    }

    /// Copies `src[offset..offset + len]` into the front of this vector,
    /// leaving the remaining elements untouched.
    ///
    /// # Errors
    /// Returns [`TensorError::SliceOutOfBounds`] if the range exceeds `src`
    /// or if `len` exceeds this vector's length.
    pub fn load_slice(
        &mut self,
        src: &Vector<T>,
        offset: usize,
        len: usize,
    ) -> Result<(), TensorError> {
        copy_slice(&mut self.data, &src.data, offset, len)
    }

    /// Writes all of `src` into `self[offset..offset + src.len()]`.
    ///
    /// # Errors
    /// Returns [`TensorError::SliceOutOfBounds`] if `src` does not fit.
    pub fn insert_slice(&mut self, offset: usize, src: &Vector<T>) -> Result<(), TensorError> {
        let len = src.len();
        match offset.checked_add(len) {
            Some(end) if end <= self.len() => {
                self.data[offset..end].copy_from_slice(&src.data);
                Ok(())
            }
            _ => Err(TensorError::SliceOutOfBounds {
                offset,
                len,
                bound: self.len(),
            }),
        }
    }

    /// Converts every element to another element type.
    pub fn cast<U: Element>(&self) -> Vector<U> {
        Vector {
            data: self.data.iter().map(|&x| x.cast()).collect(),
        }
    }
}

impl<T: Element> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: Element> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

/// An ordered set of vectors that all share one length.
///
/// Used as a staging buffer: the serialized filter table, the serialized
/// receptive fields of one surface tile, and the N-vector hardware feed.
/// Slots can be rewritten but never resized, so the shared-length
/// invariant holds for the array's whole life.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorArray<T: Element> {
    width: usize,
    vectors: Vec<Vector<T>>,
}

impl<T: Element> VectorArray<T> {
    /// Creates `count` zero vectors of length `width`.
    pub fn zeros(count: usize, width: usize) -> Self {
        Self {
            width,
            vectors: (0..count).map(|_| Vector::zeros(width)).collect(),
        }
    }

    /// Returns the number of vectors.
    pub fn count(&self) -> usize {
        self.vectors.len()
    }

    /// Returns the shared vector length.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the vector in `slot`, or `None` if out of range.
    pub fn get(&self, slot: usize) -> Option<&Vector<T>> {
        self.vectors.get(slot)
    }

    /// Returns the elements of `slot` for in-place writing.
    ///
    /// # Panics
    /// Panics if `slot >= self.count()`.
    pub fn slot_mut(&mut self, slot: usize) -> &mut [T] {
        self.vectors[slot].as_slice_mut()
    }

    /// Iterates over the vectors in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vector<T>> {
        self.vectors.iter()
    }

    /// Sets every element of every vector to `value`.
    pub fn fill(&mut self, value: T) {
        self.vectors.iter_mut().for_each(|v| v.fill(value));
    }

    /// Zeroes `slot`, then copies `src[offset..offset + len]` into its front.
    ///
    /// # Errors
    /// Returns [`TensorError::IndexOutOfBounds`] for a bad slot and
    /// [`TensorError::SliceOutOfBounds`] for a bad range.
    pub fn load_slice(
        &mut self,
        slot: usize,
        src: &Vector<T>,
        offset: usize,
        len: usize,
    ) -> Result<(), TensorError> {
        let count = self.count();
        let dst = self
            .vectors
            .get_mut(slot)
            .ok_or(TensorError::IndexOutOfBounds {
                op: "vector array load",
                index: slot,
                limit: count,
            })?;
        dst.fill(T::ZERO);
        dst.load_slice(src, offset, len)
    }

    /// Converts every element to another element type.
    pub fn cast<U: Element>(&self) -> VectorArray<U> {
        VectorArray {
            width: self.width,
            vectors: self.vectors.iter().map(Vector::cast).collect(),
        }
    }
}

impl<T: Element> Index<usize> for VectorArray<T> {
    type Output = Vector<T>;

    fn index(&self, slot: usize) -> &Vector<T> {
        &self.vectors[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let v = Vector::<i8>::zeros(4);
        assert_eq!(v.len(), 4);
        assert!(v.as_slice().iter().all(|&x| x == 0));
    }

    #[test]
    fn test_dot() {
        let a = Vector::from_vec(vec![1.0f32, 2.0, 3.0]);
        let b = Vector::from_vec(vec![4.0f32, 5.0, 6.0]);
        assert_eq!(a.dot(&b).unwrap(), 32.0);
    }

    #[test]
    fn test_dot_wraps_in_i8() {
        let a = Vector::from_vec(vec![100i8, 100]);
        let b = Vector::from_vec(vec![1i8, 1]);
        // 200 mod 256 = -56
        assert_eq!(a.dot(&b).unwrap(), -56);
    }

    #[test]
    fn test_dot_length_mismatch() {
        let a = Vector::<f32>::zeros(3);
        let b = Vector::<f32>::zeros(4);
        assert!(matches!(
            a.dot(&b),
            Err(TensorError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_scaled_and_add() {
        let a = Vector::from_vec(vec![1i8, -2, 3]);
        assert_eq!(a.scaled(2).as_slice(), &[2, -4, 6]);
        let sum = a.elementwise_add(&a).unwrap();
        assert_eq!(sum.as_slice(), &[2, -4, 6]);
        assert!(a.elementwise_add(&Vector::zeros(2)).is_err());
    }

    #[test]
    fn test_fill() {
        let mut v = Vector::<i8>::zeros(3);
        v.fill(7);
        assert_eq!(v.as_slice(), &[7, 7, 7]);
    }

    #[test]
    fn test_slice_round_trip() {
        let src = Vector::from_vec((1..=10).map(|x| x as i8).collect());
        let piece = src.slice(3, 4).unwrap();
        assert_eq!(piece.as_slice(), &[4, 5, 6, 7]);

        let mut dst = Vector::<i8>::zeros(10);
        dst.insert_slice(3, &piece).unwrap();
        assert_eq!(dst.as_slice(), &[0, 0, 0, 4, 5, 6, 7, 0, 0, 0]);
    }

    #[test]
    fn test_slice_bounds() {
        let src = Vector::<i8>::zeros(5);
        assert!(src.slice(3, 2).is_ok());
        assert!(src.slice(3, 3).is_err());
        assert!(src.slice(usize::MAX, 2).is_err());

        let mut dst = Vector::<i8>::zeros(5);
        assert!(dst.insert_slice(4, &Vector::zeros(2)).is_err());
    }

    #[test]
    fn test_load_slice_keeps_tail() {
        let src = Vector::from_vec(vec![1i8, 2, 3, 4]);
        let mut dst = Vector::from_vec(vec![9i8; 4]);
        dst.load_slice(&src, 2, 2).unwrap();
        assert_eq!(dst.as_slice(), &[3, 4, 9, 9]);
        // Destination too short.
        let mut tiny = Vector::<i8>::zeros(1);
        assert!(tiny.load_slice(&src, 0, 2).is_err());
    }

    #[test]
    fn test_vector_array_load_slice_zero_fills() {
        let src = Vector::from_vec(vec![1i8, 2, 3, 4, 5]);
        let mut arr = VectorArray::<i8>::zeros(2, 3);
        arr.fill(9);
        arr.load_slice(1, &src, 3, 2).unwrap();
        assert_eq!(arr[1].as_slice(), &[4, 5, 0]);
        assert_eq!(arr[0].as_slice(), &[9, 9, 9]);
        assert!(arr.load_slice(2, &src, 0, 1).is_err());
    }

    #[test]
    fn test_vector_array_cast() {
        let mut arr = VectorArray::<i8>::zeros(2, 2);
        arr.slot_mut(0)[1] = -3;
        let f = arr.cast::<f32>();
        assert_eq!(f.count(), 2);
        assert_eq!(f.width(), 2);
        assert_eq!(f[0].as_slice(), &[0.0, -3.0]);
    }
}
