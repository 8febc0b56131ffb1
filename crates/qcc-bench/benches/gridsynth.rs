// Copyright 2026 The QCC Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License.You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qcc_synth::{default_epsilon, gridsynth_gates};
use std::f64::consts::PI;

fn bench_gridsynth(c: &mut Criterion) {
    let mut group = c.benchmark_group("gridsynth_gates");
    for &theta in &[PI / 4.0, PI / 3.0, 1.2345, PI / 128.0] {
        group.bench_with_input(format!("theta={theta}"), &theta, |b, &theta| {
            b.iter(|| gridsynth_gates(black_box(theta), black_box(default_epsilon(theta))));
        });
    }
    group.finish();
}

fn bench_gridsynth_tight_epsilon(c: &mut Criterion) {
    c.bench_function("gridsynth_gates/theta=1.0/eps=1e-4", |b| {
        b.iter(|| gridsynth_gates(black_box(1.0), black_box(1e-4)));
    });
}

criterion_group!(benches, bench_gridsynth, bench_gridsynth_tight_epsilon);
criterion_main!(benches);
