// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Direct sliding-window convolution, used as the correctness oracle.

use super::ConvEngine;
use crate::{ConvGeometry, EngineError};
use tensor_core::{Element, Tensor, TensorArray};

/// The reference engine: one full dot product per output element.
///
/// No tiling, no serialization. Generic over the element type: on `f32`
/// it is the exact ground truth; on `i8` it gives the result of the same
/// sum evaluated in 8-bit modular arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceConv;

impl ReferenceConv {
    /// Creates the reference engine.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Element> ConvEngine<T> for ReferenceConv {
    fn name(&self) -> &str {
        "reference"
    }

    fn conv2d(
        &self,
        activation: &Tensor<T>,
        filters: &TensorArray<T>,
    ) -> Result<Tensor<T>, EngineError> {
        let geometry = ConvGeometry::of(activation, filters)?;
        let out_shape = geometry.output();
        let mut output = Tensor::zeros(out_shape);

        for (c, filter) in filters.iter().enumerate() {
            for j in 0..out_shape.height() {
                for i in 0..out_shape.width() {
                    let field = activation.extract_block(i, j, 0, geometry.kernel())?;
                    output[(i, j, c)] = filter.dot(&field)?;
                }
            }
        }
        Ok(output)
    }
}
