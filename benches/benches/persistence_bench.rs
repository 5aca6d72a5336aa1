//! # Persistence Benchmarks
//!
//! Measures the amplitude codec and a full save/load cycle.
//!
//! Run: `cargo bench --bench persistence_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qstate_core::{format_complex, parse_complex, Complex64, StateRepository};
use tempfile::TempDir;

/// Benchmark the "(re+imj)" codec
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let z = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, -1.0 / 3.0);
    let text = format_complex(z);

    group.bench_function("format", |b| b.iter(|| black_box(format_complex(black_box(z)))));
    group.bench_function("parse", |b| b.iter(|| black_box(parse_complex(black_box(&text)).unwrap())));

    group.finish();
}

/// Benchmark save_all + load_all of 100 states
fn bench_roundtrip(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("states.json");

    let mut repo = StateRepository::new();
    for i in 0..100 {
        repo.add_state(format!("q{i}"), [0.6, 0.8], "computational").unwrap();
    }

    c.bench_function("save_load_100", |b| {
        b.iter(|| {
            assert!(repo.save_all(&path));
            let mut restored = StateRepository::new();
            black_box(restored.load_all(&path));
            repo.take_notices();
        })
    });
}

criterion_group!(benches, bench_codec, bench_roundtrip);
criterion_main!(benches);
