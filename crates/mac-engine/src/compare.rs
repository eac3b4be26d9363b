// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error metrics between a simulated result and its reference.

use crate::EngineError;
use tensor_core::{Element, Tensor, TensorError};

/// Element-wise comparison of two equally shaped tensors.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Comparison {
    /// Number of compared elements.
    pub elements: usize,
    /// `sqrt(mean((sim - ref)^2))`.
    pub rms_error: f64,
    /// Largest `|sim - ref|`.
    pub max_abs_error: f64,
    /// Elements where `sim != ref`.
    pub mismatches: usize,
}

impl Comparison {
    /// Returns `true` if every element matched exactly.
    pub fn is_exact(&self) -> bool {
        self.mismatches == 0
    }

    /// Returns a human-readable one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "rms {:.4}, max |err| {:.4}, {}/{} mismatched",
            self.rms_error, self.max_abs_error, self.mismatches, self.elements
        )
    }
}

/// Compares `sim` against `reference`, element by element in `f64`.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] (wrapped) if the shapes differ.
pub fn compare<A: Element, B: Element>(
    sim: &Tensor<A>,
    reference: &Tensor<B>,
) -> Result<Comparison, EngineError> {
    if sim.shape() != reference.shape() {
        return Err(TensorError::ShapeMismatch {
            op: "compare",
            lhs: *sim.shape(),
            rhs: *reference.shape(),
        }
        .into());
    }

    let mut sum_sq = 0.0f64;
    let mut max_abs = 0.0f64;
    let mut mismatches = 0usize;
    for (&a, &b) in sim.as_slice().iter().zip(reference.as_slice()) {
        let diff = a.to_f64() - b.to_f64();
        if diff != 0.0 {
            mismatches += 1;
        }
        sum_sq += diff * diff;
        max_abs = max_abs.max(diff.abs());
    }

    let elements = sim.len();
    Ok(Comparison {
        elements,
        rms_error: (sum_sq / elements as f64).sqrt(),
        max_abs_error: max_abs,
        mismatches,
    })
}

/// Root-mean-square difference between two equally shaped tensors.
pub fn rms_error<A: Element, B: Element>(
    sim: &Tensor<A>,
    reference: &Tensor<B>,
) -> Result<f64, EngineError> {
    compare(sim, reference).map(|c| c.rms_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::TensorShape;

    fn ramp(w: usize, h: usize, d: usize) -> Tensor<f32> {
        let s = TensorShape::new(w, h, d).unwrap();
        Tensor::from_vec(s, (0..s.len()).map(|x| x as f32 * 0.5).collect()).unwrap()
    }

    #[test]
    fn test_self_comparison_is_zero() {
        let t = ramp(3, 4, 2);
        let c = compare(&t, &t).unwrap();
        assert_eq!(c.rms_error, 0.0);
        assert_eq!(c.max_abs_error, 0.0);
        assert!(c.is_exact());
        assert_eq!(c.elements, 24);
    }

    #[test]
    fn test_single_perturbation() {
        let t = ramp(3, 4, 2);
        let mut u = t.clone();
        u[(1, 2, 1)] += 3.0;
        let c = compare(&u, &t).unwrap();
        assert!((c.rms_error - (9.0f64 / 24.0).sqrt()).abs() < 1e-12);
        assert_eq!(c.max_abs_error, 3.0);
        assert_eq!(c.mismatches, 1);
        assert!(c.summary().contains("1/24"));
    }

    #[test]
    fn test_mixed_element_types() {
        let s = TensorShape::new(2, 2, 1).unwrap();
        let a = Tensor::<i8>::from_vec(s, vec![1, -2, 3, 4]).unwrap();
        let b = a.cast::<f32>();
        assert_eq!(rms_error(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = compare(&ramp(3, 4, 2), &ramp(4, 3, 2)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Tensor(TensorError::ShapeMismatch { .. })
        ));
    }
}
