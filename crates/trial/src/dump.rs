// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CSV diagnostic dump of trial tensors.
//!
//! Each tensor is written as a block:
//! ```text
//! simulatedResultTensor
//! i,j,0,1,2
//! 0,0,4,-7,12
//! 1,0,...
//! ```
//! One row per spatial position (`j` outer, `i` inner), one column per
//! depth plane. Filter banks write one block per filter, titled
//! `name[c]`. Blocks are separated by an empty line.

use crate::TrialError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tensor_core::{Element, Tensor, TensorArray};

/// Writes one tensor block.
pub fn write_tensor<W: Write, T: Element>(
    out: &mut W,
    name: &str,
    tensor: &Tensor<T>,
) -> io::Result<()> {
    writeln!(out, "{name}")?;
    write!(out, "i,j")?;
    for k in 0..tensor.depth() {
        write!(out, ",{k}")?;
    }
    writeln!(out)?;
    for j in 0..tensor.height() {
        for i in 0..tensor.width() {
            write!(out, "{i},{j}")?;
            for k in 0..tensor.depth() {
                write!(out, ",{}", tensor[(i, j, k)].format_field())?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out)
}

/// Writes one block per filter, titled `name[c]`.
pub fn write_tensor_array<W: Write, T: Element>(
    out: &mut W,
    name: &str,
    filters: &TensorArray<T>,
) -> io::Result<()> {
    for (c, filter) in filters.iter().enumerate() {
        write_tensor(out, &format!("{name}[{c}]"), filter)?;
    }
    Ok(())
}

/// The six tensors of one trial.
#[derive(Debug, Clone, Copy)]
pub struct TrialTensors<'a> {
    pub simulated_activation: &'a Tensor<i8>,
    pub reference_activation: &'a Tensor<f32>,
    pub simulated_filters: &'a TensorArray<i8>,
    pub reference_filters: &'a TensorArray<f32>,
    pub simulated_result: &'a Tensor<i8>,
    pub reference_result: &'a Tensor<f32>,
}

impl TrialTensors<'_> {
    /// Writes all six tensors to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_tensor(out, "simulatedActivationTensor", self.simulated_activation)?;
        write_tensor(out, "referenceActivationTensor", self.reference_activation)?;
        write_tensor_array(out, "simulatedFilterSet", self.simulated_filters)?;
        write_tensor_array(out, "referenceFilterSet", self.reference_filters)?;
        write_tensor(out, "simulatedResultTensor", self.simulated_result)?;
        write_tensor(out, "referenceResultTensor", self.reference_result)?;
        out.flush()
    }

    /// Creates (or truncates) `path` and writes all six tensors to it.
    pub fn write_file(&self, path: &Path) -> Result<(), TrialError> {
        let to_dump_error = |source| TrialError::Dump {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(to_dump_error)?;
        self.write_to(&mut BufWriter::new(file)).map_err(to_dump_error)
    }
}

/// Returns the dump path for trial `index` of `count`.
///
/// A single trial uses `path` unchanged; otherwise the index is inserted
/// before the extension (`dump.csv` becomes `dump.3.csv`).
pub fn numbered_path(path: &Path, index: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}.{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{index}"),
    };
    path.with_file_name(name)
}
