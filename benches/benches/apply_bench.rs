//! # Operator Benchmarks
//!
//! Measures matrix-vector application and measurement for growing dimensions.
//! Application is O(n²), measurement O(n).
//!
//! Run: `cargo bench --bench apply_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qstate_core::{Complex64, QuantumOperator, QuantumState};

/// Operador de permutação cíclica n×n (unitário)
fn shift_operator(n: usize) -> QuantumOperator {
    let rows = (0..n).map(|i| {
        (0..n).map(move |j| if (i + 1) % n == j { 1.0 } else { 0.0 })
    });
    QuantumOperator::new(format!("shift{n}"), rows).unwrap()
}

fn uniform_state(n: usize) -> QuantumState {
    let amplitude = Complex64::new(1.0 / (n as f64).sqrt(), 0.0);
    QuantumState::new("uniform", vec![amplitude; n], "computational").unwrap()
}

/// Benchmark operator application
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    for n in [2usize, 8, 64, 256] {
        let op = shift_operator(n);
        let state = uniform_state(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(op.apply(black_box(&state)).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark measurement
fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");

    for n in [2usize, 64, 4096] {
        let state = uniform_state(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(state.measure().unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply, bench_measure);
criterion_main!(benches);
