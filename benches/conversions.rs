//! Benchmarks for CSR construction and format conversions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spmv_formats::{
    parallel::ell_from_csr_parallel, CooMatrix, CsrMatrix, CsrPayload, EllLayout, EllMatrix,
    EllOverflow, HybridMatrix, MatrixDescription, ScooMatrix, SystemParameters,
};

/// Random description with up to `max_row` entries per row
fn create_description(n: usize, max_row: usize, seed: u64) -> MatrixDescription<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut entries = Vec::new();

    for row in 0..n {
        let len = rng.gen_range(1..=max_row);
        for _ in 0..len {
            entries.push((row, rng.gen_range(0..n), rng.gen_range(-1.0..1.0)));
        }
    }

    MatrixDescription::new(n, n, entries)
}

fn bench_csr_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("csr_build");

    for &n in &[1_000, 10_000, 100_000] {
        let desc = create_description(n, 16, 42);
        group.bench_with_input(BenchmarkId::new("full", n), &desc, |b, desc| {
            b.iter(|| CsrMatrix::from_description(black_box(desc), CsrPayload::Full).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("row_ptr_only", n), &desc, |b, desc| {
            b.iter(|| CsrMatrix::from_description(black_box(desc), CsrPayload::RowPtrOnly).unwrap())
        });
    }

    group.finish();
}

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");
    let desc = create_description(50_000, 32, 7);
    let csr = CsrMatrix::from_description(&desc, CsrPayload::Full).unwrap();
    let params = SystemParameters {
        parallel_threshold: 0,
        ..SystemParameters::default()
    };

    group.bench_function("ell_row_major", |b| {
        b.iter(|| EllMatrix::from_csr(black_box(&csr), EllLayout::RowMajor).unwrap())
    });
    group.bench_function("ell_column_major", |b| {
        b.iter(|| EllMatrix::from_csr(black_box(&csr), EllLayout::ColumnMajor).unwrap())
    });
    group.bench_function("ell_parallel", |b| {
        b.iter(|| {
            ell_from_csr_parallel(
                black_box(&csr),
                None,
                EllLayout::RowMajor,
                EllOverflow::Reject,
                &params,
            )
            .unwrap()
        })
    });
    group.bench_function("coo", |b| b.iter(|| CooMatrix::from_csr(black_box(&csr)).unwrap()));
    group.bench_function("scoo_32", |b| {
        b.iter(|| ScooMatrix::from_csr(black_box(&csr), 32).unwrap())
    });

    for &percent in &[50.0, 90.0, 100.0] {
        group.bench_with_input(BenchmarkId::new("hybrid", percent), &percent, |b, &p| {
            b.iter(|| HybridMatrix::from_csr(black_box(&csr), p, EllLayout::RowMajor).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_csr_build, bench_conversions);
criterion_main!(benches);
