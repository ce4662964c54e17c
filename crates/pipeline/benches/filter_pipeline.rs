//! Benchmarks for deck preparation
//!
//! Run with: cargo bench --package pipeline
//!
//! Filters and annotates a synthetic deck of pods scattered around a city.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{CardAnnotator, FilterPipeline};
use pod_model::{GeoPoint, Location, Pod};
use sources::UserContext;

const TAGS: [&str; 6] = ["art", "music", "sports", "food", "books", "games"];

fn synthetic_pods(count: usize) -> Vec<Pod> {
    (0..count)
        .map(|i| {
            let offset = (i % 100) as f64 * 0.001;
            Pod::new(i.to_string(), format!("Pod {}", i))
                .with_tags([TAGS[i % TAGS.len()], TAGS[(i / 7) % TAGS.len()]])
                .with_location(Location::new(44.97 + offset, -93.26 - offset))
                .with_schedule("2024-06-01", "18:00")
        })
        .collect()
}

fn context() -> UserContext {
    UserContext::new()
        .with_interests(["art", "food"])
        .with_position(GeoPoint::new(44.97, -93.26))
        .with_max_distance(8_000.0)
}

fn bench_filter_pipeline(c: &mut Criterion) {
    let pods = synthetic_pods(1_000);
    let context = context();
    let pipeline = FilterPipeline::standard();

    c.bench_function("filter_pipeline_1000", |b| {
        b.iter(|| {
            let filtered = pipeline.apply(black_box(pods.clone()), black_box(&context)).unwrap();
            black_box(filtered)
        })
    });
}

fn bench_annotate(c: &mut Criterion) {
    let pods = synthetic_pods(1_000);
    let context = context();
    let annotator = CardAnnotator::new();

    c.bench_function("annotate_1000", |b| {
        b.iter(|| {
            let details = annotator.annotate(black_box(&pods), black_box(&context));
            black_box(details)
        })
    });
}

criterion_group!(benches, bench_filter_pipeline, bench_annotate);
criterion_main!(benches);
