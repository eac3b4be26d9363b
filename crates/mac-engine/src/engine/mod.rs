// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`ConvEngine`] trait and its two implementations.

pub mod reference;
pub mod simulated;

use crate::EngineError;
use tensor_core::{Element, Tensor, TensorArray};

/// A 2-D convolution engine (stride 1, no padding).
///
/// Engines are purely computational: no I/O, no shared state. Each call
/// allocates its own output and staging buffers.
pub trait ConvEngine<T: Element> {
    /// Human-readable name of this engine.
    fn name(&self) -> &str;

    /// Convolves `activation` with every filter in `filters`.
    ///
    /// The output has shape `(W−KW+1, H−KH+1, C)`.
    fn conv2d(
        &self,
        activation: &Tensor<T>,
        filters: &TensorArray<T>,
    ) -> Result<Tensor<T>, EngineError>;
}
