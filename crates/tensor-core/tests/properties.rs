// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property tests for container layout and slicing.

use proptest::prelude::*;
use tensor_core::{Tensor, TensorShape, Vector};

fn tensor_strategy() -> impl Strategy<Value = Tensor<i8>> {
    (1usize..=6, 1usize..=6, 1usize..=4).prop_flat_map(|(w, h, d)| {
        let shape = TensorShape::new(w, h, d).unwrap();
        prop::collection::vec(any::<i8>(), shape.len())
            .prop_map(move |data| Tensor::from_vec(shape, data).unwrap())
    })
}

proptest! {
    /// Serialization visits i fastest, then j, then k.
    #[test]
    fn test_serialization_order(t in tensor_strategy()) {
        let v = t.to_vector();
        let (w, h) = (t.width(), t.height());
        for k in 0..t.depth() {
            for j in 0..h {
                for i in 0..w {
                    prop_assert_eq!(v[(k * h + j) * w + i], t[(i, j, k)]);
                }
            }
        }
    }

    /// A block serialized in place equals the extracted block serialized.
    #[test]
    fn test_block_serialization_matches_extract(
        t in tensor_strategy(),
        frac in (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0),
    ) {
        let bw = 1 + ((t.width() - 1) as f64 * frac.0) as usize;
        let bh = 1 + ((t.height() - 1) as f64 * frac.1) as usize;
        let bd = 1 + ((t.depth() - 1) as f64 * frac.2) as usize;
        let block = TensorShape::new(bw, bh, bd).unwrap();
        let (i, j, k) = (t.width() - bw, t.height() - bh, t.depth() - bd);

        let extracted = t.extract_block(i, j, k, block).unwrap();
        let mut serial = vec![0i8; block.len()];
        t.serialize_block_into(i, j, k, block, &mut serial).unwrap();
        prop_assert_eq!(extracted.as_slice(), &serial[..]);
        prop_assert_eq!(extracted[(0, 0, 0)], t[(i, j, k)]);
    }

    /// Inserting a slice and reading it back returns the same elements.
    #[test]
    fn test_slice_round_trip(
        data in prop::collection::vec(any::<i8>(), 1..40),
        cut in (0.0f64..1.0, 0.0f64..1.0),
    ) {
        let v = Vector::from_vec(data.clone());
        let offset = ((data.len() - 1) as f64 * cut.0) as usize;
        let len = ((data.len() - offset) as f64 * cut.1) as usize;

        let piece = v.slice(offset, len).unwrap();
        prop_assert_eq!(piece.as_slice(), &data[offset..offset + len]);

        let mut target = Vector::<i8>::zeros(data.len());
        target.insert_slice(offset, &piece).unwrap();
        prop_assert_eq!(&target.as_slice()[offset..offset + len], piece.as_slice());
        prop_assert!(v.slice(offset, data.len() - offset + 1).is_err());
    }
}
