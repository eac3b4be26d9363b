// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Convolution geometry shared by both engines.

use crate::EngineError;
use tensor_core::{Element, Tensor, TensorArray, TensorShape};

/// Validated shapes of one stride-1, unpadded convolution.
///
/// An activation of `W × H × D` convolved with `C` filters of
/// `KW × KH × D` yields an output of `(W−KW+1) × (H−KH+1) × C`. The
/// `OW · OH` output positions are enumerated as surface indices
/// `s = j · OW + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvGeometry {
    activation: TensorShape,
    kernel: TensorShape,
    output: TensorShape,
}

impl ConvGeometry {
    /// Validates an activation shape against a filter shape and channel count.
    ///
    /// # Errors
    /// - [`EngineError::DepthMismatch`] if the depths differ.
    /// - [`EngineError::FilterTooLarge`] if `KW > W` or `KH > H`.
    pub fn new(
        activation: TensorShape,
        kernel: TensorShape,
        channels: usize,
    ) -> Result<Self, EngineError> {
        if activation.depth() != kernel.depth() {
            return Err(EngineError::DepthMismatch {
                activation: activation.depth(),
                filters: kernel.depth(),
            });
        }
        if kernel.width() > activation.width() || kernel.height() > activation.height() {
            return Err(EngineError::FilterTooLarge { activation, kernel });
        }
        let output = TensorShape::new(
            activation.width() - kernel.width() + 1,
            activation.height() - kernel.height() + 1,
            channels,
        )?;
        Ok(Self {
            activation,
            kernel,
            output,
        })
    }

    /// Validates an activation tensor against a filter bank.
    pub fn of<T: Element>(
        activation: &Tensor<T>,
        filters: &TensorArray<T>,
    ) -> Result<Self, EngineError> {
        Self::new(*activation.shape(), *filters.shape(), filters.count())
    }

    /// Shape of the activation tensor.
    pub fn activation(&self) -> TensorShape {
        self.activation
    }

    /// Shape of one filter (and of every receptive field).
    pub fn kernel(&self) -> TensorShape {
        self.kernel
    }

    /// Shape of the output tensor.
    pub fn output(&self) -> TensorShape {
        self.output
    }

    /// Number of output channels.
    pub fn channels(&self) -> usize {
        self.output.depth()
    }

    /// Number of output spatial positions (`OW · OH`).
    pub fn surface_count(&self) -> usize {
        self.output.width() * self.output.height()
    }

    /// Length of a serialized filter or receptive field (`KW · KH · D`).
    pub fn serial_len(&self) -> usize {
        self.kernel.len()
    }

    /// Maps a surface index to its output position `(i, j)`.
    pub fn surface_position(&self, s: usize) -> (usize, usize) {
        (s % self.output.width(), s / self.output.width())
    }
}
