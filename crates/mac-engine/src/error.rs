// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the convolution engines.

use tensor_core::{TensorError, TensorShape};

/// Errors that can occur while configuring or running an engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The hardware configuration is unusable.
    #[error("invalid hardware configuration: {0}")]
    InvalidConfig(String),

    /// The filter is wider or taller than the activation tensor.
    #[error("filter {kernel} does not fit inside activation {activation}")]
    FilterTooLarge {
        activation: TensorShape,
        kernel: TensorShape,
    },

    /// Activation and filter depths differ.
    #[error("depth mismatch: activation has {activation} planes, filters have {filters}")]
    DepthMismatch { activation: usize, filters: usize },

    /// A container operation failed.
    #[error("tensor error: {0}")]
    Tensor(#[from] TensorError),
}
