//! Benchmarks for the allotaxonometry pipeline.
//!
//! Run with: cargo bench

use allotax::analytics::{combine_elements, rank_turbulence_divergence};
use allotax::data::{Alpha, Dataset, InputBundle};
use allotax::pipeline::Pipeline;
use allotax::render::DashboardLayout;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn generate_dataset(n: usize, seed: u64, offset: usize) -> Dataset {
    // Simple deterministic pseudo-random for reproducibility
    let mut x = seed;
    Dataset::from_pairs((0..n).map(|i| {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        let noise = 0.5 + (x >> 11) as f64 / (1u64 << 53) as f64;
        (format!("type{}", i + offset), (1e6 * noise / (i as f64 + 1.0)).ceil())
    }))
    .expect("generated dataset is valid")
}

fn generate_bundle(n: usize) -> InputBundle {
    InputBundle::new(
        generate_dataset(n, 42, 0),
        generate_dataset(n, 123, n / 3),
        Alpha::Finite(0.17),
    )
}

fn bench_rank_turbulence(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_turbulence_divergence");

    for size in [1_000, 10_000, 100_000].iter() {
        let bundle = generate_bundle(*size);
        let mixed = combine_elements(&bundle.data1, &bundle.data2);

        group.throughput(Throughput::Elements(mixed.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| rank_turbulence_divergence(black_box(&mixed), Alpha::Finite(0.17)))
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");
    let pipeline = Pipeline::new();

    for size in [1_000, 10_000, 50_000].iter() {
        let bundle = generate_bundle(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| pipeline.run(black_box(&bundle)))
        });
    }

    group.finish();
}

fn bench_render_html(c: &mut Criterion) {
    let graph = Pipeline::new()
        .run(&generate_bundle(10_000))
        .expect("pipeline runs");
    let layout = DashboardLayout::default();

    c.bench_function("render_html", |b| b.iter(|| graph.render_html(black_box(&layout))));
}

criterion_group!(benches, bench_rank_turbulence, bench_pipeline, bench_render_html);
criterion_main!(benches);
