// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Random trial inputs.
//!
//! Values are raw 8-bit integers with no quantization scale: the float
//! mirror of an input holds exactly the same numbers.

use crate::{DimRange, TrialConfig, TrialError};
use mac_engine::HwElement;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use tensor_core::{Tensor, TensorArray, TensorShape};

/// One randomly drawn activation tensor and filter bank.
#[derive(Debug, Clone)]
pub struct TrialInputs {
    pub activation: Tensor<HwElement>,
    pub filters: TensorArray<HwElement>,
}

/// Draws trial inputs from a normalized [`TrialConfig`].
#[derive(Debug, Clone)]
pub struct InputGenerator {
    config: TrialConfig,
    values: Uniform<i32>,
}

impl InputGenerator {
    /// Creates a generator. `config` is normalized first.
    pub fn new(config: &TrialConfig) -> Self {
        let config = config.normalized();
        let values = Uniform::new_inclusive(-config.max_int, config.max_int);
        Self { config, values }
    }

    /// Draws an activation tensor and a filter bank sized to fit it.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TrialInputs, TrialError> {
        let activation = self.activation(rng)?;
        let filters = self.filters(rng, activation.shape())?;
        Ok(TrialInputs {
            activation,
            filters,
        })
    }

    /// Draws an activation tensor with dimensions inside the configured ranges.
    pub fn activation<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Tensor<HwElement>, TrialError> {
        let a = &self.config.activation;
        let shape = TensorShape::new(draw(rng, a.width), draw(rng, a.height), draw(rng, a.depth))?;
        self.filled(rng, shape)
    }

    /// Draws a filter bank for `activation`.
    ///
    /// Kernel width and height are capped at the activation's, and the
    /// filter depth always equals the activation depth.
    pub fn filters<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        activation: &TensorShape,
    ) -> Result<TensorArray<HwElement>, TrialError> {
        let f = &self.config.filters;
        let kw = draw(rng, f.kernel_width).min(activation.width());
        let kh = draw(rng, f.kernel_height).min(activation.height());
        let channels = draw(rng, f.channels);
        let kernel = TensorShape::new(kw, kh, activation.depth())?;

        let members = (0..channels)
            .map(|_| self.filled(rng, kernel))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TensorArray::from_tensors(members)?)
    }

    fn filled<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        shape: TensorShape,
    ) -> Result<Tensor<HwElement>, TrialError> {
        let data = (0..shape.len())
            .map(|_| self.values.sample(rng) as HwElement)
            .collect();
        Ok(Tensor::from_vec(shape, data)?)
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, range: DimRange) -> usize {
    rng.gen_range(range.min..=range.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_shapes_within_ranges() {
        let config = TrialConfig::default();
        let generator = InputGenerator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            let inputs = generator.generate(&mut rng).unwrap();
            let a = inputs.activation.shape();
            assert!(config.activation.width.contains(a.width()));
            assert!(config.activation.height.contains(a.height()));
            assert!(config.activation.depth.contains(a.depth()));
            let k = inputs.filters.shape();
            assert_eq!(k.depth(), a.depth());
            assert!(k.width() <= a.width() && k.height() <= a.height());
            assert!(config.filters.channels.contains(inputs.filters.count()));
        }
    }

    #[test]
    fn test_values_within_max_int() {
        let config = TrialConfig {
            max_int: 5,
            ..Default::default()
        };
        let generator = InputGenerator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let inputs = generator.generate(&mut rng).unwrap();
        let all = inputs
            .activation
            .as_slice()
            .iter()
            .chain(inputs.filters.iter().flat_map(|f| f.as_slice()));
        for &x in all {
            assert!((-5..=5).contains(&x));
        }
    }

    #[test]
    fn test_kernel_capped_by_activation() {
        let mut config = TrialConfig::default();
        config.activation.width = DimRange::new(3, 3);
        config.activation.height = DimRange::new(2, 2);
        config.filters.kernel_width = DimRange::new(9, 9);
        config.filters.kernel_height = DimRange::new(9, 9);
        let generator = InputGenerator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let inputs = generator.generate(&mut rng).unwrap();
        assert_eq!(inputs.filters.shape().width(), 3);
        assert_eq!(inputs.filters.shape().height(), 2);
    }

    #[test]
    fn test_same_seed_same_inputs() {
        let generator = InputGenerator::new(&TrialConfig::default());
        let a = generator.generate(&mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        let b = generator.generate(&mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        assert_eq!(a.activation, b.activation);
        assert_eq!(a.filters, b.filters);
    }
}
