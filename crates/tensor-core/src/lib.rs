// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Dense containers for the hardware multiply-accumulate simulator.
//!
//! This crate provides:
//! - [`Tensor`]: an owned width × height × depth tensor.
//! - [`TensorArray`]: an ordered set of equally-shaped tensors (a filter bank).
//! - [`Vector`] and [`VectorArray`]: one-dimensional staging buffers with
//!   bounds-checked slice extraction and insertion.
//! - [`Matrix`]: a dense matrix with matrix × vector multiply.
//! - [`Element`]: the sealed element trait, implemented for `i8` and `f32`.
//!
//! Every container is generic over its element type. Arithmetic always runs
//! in the element's own width, so an `i8` dot product wraps exactly like an
//! 8-bit hardware register would. Converting between element types is
//! explicit, via `cast::<U>()`.
//!
//! # Example
//! ```
//! use tensor_core::{Tensor, TensorShape};
//!
//! let mut act = Tensor::<i8>::zeros(TensorShape::new(4, 4, 1).unwrap());
//! act[(1, 1, 0)] = 3;
//! let mirror = act.cast::<f32>();
//! assert_eq!(mirror[(1, 1, 0)], 3.0);
//! ```

mod element;
mod error;
mod matrix;
mod shape;
mod tensor;
mod tensor_array;
mod vector;

pub use element::{DType, Element};
pub use error::TensorError;
pub use matrix::Matrix;
pub use shape::TensorShape;
pub use tensor::Tensor;
pub use tensor_array::TensorArray;
pub use vector::{Vector, VectorArray};
