// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks comparing the simulated engine against the reference.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mac_engine::{ConvEngine, HwConfig, ReferenceConv, SimulatedMac};
use tensor_core::{Tensor, TensorArray, TensorShape};

fn problem() -> (Tensor<i8>, TensorArray<i8>) {
    let act_shape = TensorShape::new(24, 24, 8).unwrap();
    let act = Tensor::from_vec(
        act_shape,
        (0..act_shape.len()).map(|x| (x % 17) as i8 - 8).collect(),
    )
    .unwrap();
    let k = TensorShape::new(5, 5, 8).unwrap();
    let filters = (0..16)
        .map(|c| Tensor::from_vec(k, (0..k.len()).map(|x| ((x + c) % 9) as i8 - 4).collect()).unwrap())
        .collect();
    (act, TensorArray::from_tensors(filters).unwrap())
}

fn bench_simulated(c: &mut Criterion) {
    let (act, bank) = problem();
    let mut group = c.benchmark_group("simulated_mac");
    for (n, p) in [(4, 4), (16, 16), (32, 8)] {
        let engine = SimulatedMac::new(HwConfig::new(n, p).unwrap());
        group.bench_with_input(BenchmarkId::from_parameter(format!("{n}x{p}")), &engine, |b, e| {
            b.iter(|| e.conv2d(black_box(&act), black_box(&bank)).unwrap())
        });
    }
    group.finish();
}

fn bench_reference(c: &mut Criterion) {
    let (act, bank) = problem();
    let (act, bank) = (act.cast::<f32>(), bank.cast::<f32>());
    c.bench_function("reference_f32", |b| {
        b.iter(|| ReferenceConv.conv2d(black_box(&act), black_box(&bank)).unwrap())
    });
}

criterion_group!(benches, bench_simulated, bench_reference);
criterion_main!(benches);
