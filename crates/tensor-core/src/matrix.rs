// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dense two-dimensional matrix used as operand and accumulator bank.

use crate::vector::{copy_slice, dot_slices};
use crate::{Element, TensorError, Vector};
use std::ops::{Index, IndexMut};

/// A dense matrix with `width` columns and `height` rows.
///
/// Element `(col, row)` lives at `row * width + col`, so each row is a
/// contiguous slice. Matrix × vector multiplies the vector into every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Element> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Creates a zero-filled matrix.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::ZERO; width * height],
        }
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the elements in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Returns row `row` as a slice.
    ///
    /// # Panics
    /// Panics if `row >= self.height()`.
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.height, "row {row} out of range for {} rows", self.height);
        &self.data[row * self.width..(row + 1) * self.width]
    }

    /// Zeroes row `row`, then copies `src[offset..offset + len]` into its front.
    ///
    /// # Errors
    /// Returns [`TensorError::IndexOutOfBounds`] for a bad row and
    /// [`TensorError::SliceOutOfBounds`] for a bad range.
    pub fn load_row(
        &mut self,
        row: usize,
        src: &Vector<T>,
        offset: usize,
        len: usize,
    ) -> Result<(), TensorError> {
        if row >= self.height {
            return Err(TensorError::IndexOutOfBounds {
                op: "matrix load_row",
                index: row,
                limit: self.height,
            });
        }
        let dst = &mut self.data[row * self.width..(row + 1) * self.width];
        dst.iter_mut().for_each(|x| *x = T::ZERO);
        copy_slice(dst, src.as_slice(), offset, len)
    }

    /// Computes `self × v`, one dot product per row.
    ///
    /// # Errors
    /// Returns [`TensorError::LengthMismatch`] if `v.len() != self.width()`.
    pub fn mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>, TensorError> {
        let mut out = Vector::zeros(self.height);
        for (row, slot) in out.as_slice_mut().iter_mut().enumerate() {
            *slot = dot_slices("matrix-vector multiply", self.row(row), v.as_slice())?;
        }
        Ok(out)
    }

    /// Computes `self × v` into `out` using a caller-supplied
    /// multiply-accumulate step `mac(acc, a, b)`.
    ///
    /// This lets a caller model a datapath whose arithmetic differs from the
    /// element's native one (for example saturating adders) without
    /// allocating in the inner loop.
    ///
    /// # Errors
    /// Returns [`TensorError::LengthMismatch`] if `v.len() != self.width()`
    /// or `out.len() != self.height()`.
    pub fn mul_vector_into<F>(
        &self,
        v: &Vector<T>,
        out: &mut Vector<T>,
        mut mac: F,
    ) -> Result<(), TensorError>
    where
        F: FnMut(T, T, T) -> T,
    {
        if v.len() != self.width {
            return Err(TensorError::LengthMismatch {
                op: "matrix-vector multiply",
                expected: self.width,
                actual: v.len(),
            });
        }
        if out.len() != self.height {
            return Err(TensorError::LengthMismatch {
                op: "matrix-vector multiply (output)",
                expected: self.height,
                actual: out.len(),
            });
        }
        let x = v.as_slice();
        for (row, slot) in out.as_slice_mut().iter_mut().enumerate() {
            let r = &self.data[row * self.width..(row + 1) * self.width];
            *slot = r
                .iter()
                .zip(x)
                .fold(T::ZERO, |acc, (&a, &b)| mac(acc, a, b));
        }
        Ok(())
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// Indexes by `(col, row)`.
    fn index(&self, (col, row): (usize, usize)) -> &T {
        assert!(
            col < self.width && row < self.height,
            "matrix index ({col}, {row}) out of range for {}x{}",
            self.width,
            self.height
        );
        &self.data[row * self.width + col]
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (col, row): (usize, usize)) -> &mut T {
        assert!(
            col < self.width && row < self.height,
            "matrix index ({col}, {row}) out of range for {}x{}",
            self.width,
            self.height
        );
        &mut self.data[row * self.width + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<f32> {
        // [[1, 2, 3],
        //  [4, 5, 6]]
        let mut m = Matrix::zeros(3, 2);
        let mut v = 1.0;
        for row in 0..2 {
            for col in 0..3 {
                m[(col, row)] = v;
                v += 1.0;
            }
        }
        m
    }

    #[test]
    fn test_layout() {
        let m = sample();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_mul_vector() {
        let m = sample();
        let v = Vector::from_vec(vec![1.0, 0.0, -1.0]);
        let r = m.mul_vector(&v).unwrap();
        assert_eq!(r.as_slice(), &[-2.0, -2.0]);
    }

    #[test]
    fn test_mul_vector_mismatch() {
        let m = sample();
        assert!(m.mul_vector(&Vector::zeros(2)).is_err());
        let mut out = Vector::zeros(3);
        assert!(m
            .mul_vector_into(&Vector::zeros(3), &mut out, |acc, a, b| acc + a * b)
            .is_err());
    }

    #[test]
    fn test_mul_vector_into_custom_mac() {
        let mut m = Matrix::<i8>::zeros(2, 1);
        m[(0, 0)] = 100;
        m[(1, 0)] = 100;
        let v = Vector::from_vec(vec![1i8, 1]);
        let mut out = Vector::zeros(1);

        m.mul_vector_into(&v, &mut out, |acc, a, b| acc.saturating_add(a.saturating_mul(b)))
            .unwrap();
        assert_eq!(out[0], 127);

        m.mul_vector_into(&v, &mut out, |acc, a, b| acc.mul_acc(a, b)).unwrap();
        assert_eq!(out[0], -56);
    }

    #[test]
    fn test_load_row_zero_fills() {
        let mut m = Matrix::<i8>::zeros(3, 2);
        m.fill(5);
        let src = Vector::from_vec(vec![1i8, 2, 3, 4]);
        m.load_row(1, &src, 2, 2).unwrap();
        assert_eq!(m.row(1), &[3, 4, 0]);
        assert_eq!(m.row(0), &[5, 5, 5]);
        assert!(m.load_row(2, &src, 0, 1).is_err());
        assert!(m.load_row(0, &src, 3, 2).is_err());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range() {
        let m = Matrix::<i8>::zeros(2, 2);
        let _ = m[(2, 0)];
    }
}
