// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for trial execution.

use std::path::PathBuf;

/// Errors that can occur while configuring or running a trial.
#[derive(Debug, thiserror::Error)]
pub enum TrialError {
    /// The trial configuration could not be read, parsed or applied.
    #[error("configuration error: {0}")]
    Config(String),

    /// One of the convolution engines rejected its inputs.
    #[error("engine error: {0}")]
    Engine(#[from] mac_engine::EngineError),

    /// A container operation failed while building trial inputs.
    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),

    /// Writing the diagnostic dump failed.
    #[error("cannot write dump '{}': {source}", path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
