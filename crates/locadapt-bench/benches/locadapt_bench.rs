//! Benchmarks for the adaptation pipeline.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use locadapt_color::ciecam02::{
    forward_row, forward_row_scalar, inverse_row, inverse_row_scalar, AdaptationConstants,
    ChromaticAdapter, CorrelateRows, Surround, ViewingConditions, XyzRows,
};
use locadapt_core::{Image, WideGamut};
use locadapt_ops::zone::{Extents, Shape, ZoneGeometry};
use locadapt_ops::{LocalAdaptParams, LocalAdaptation, ZoneSpec};

fn constants(white: [f64; 3]) -> AdaptationConstants {
    let vc = ViewingConditions::new(white, 18.0, 400.0, Surround::Average)
        .and_then(|vc| vc.with_degree_of_adaptation(0.8))
        .unwrap();
    AdaptationConstants::new(&vc)
}

fn xyz_row(len: usize) -> XyzRows {
    let mut rows = XyzRows::with_len(len);
    for i in 0..len {
        let t = i as f32 / len as f32;
        rows.x[i] = 5.0 + 80.0 * t;
        rows.y[i] = 4.0 + 90.0 * t;
        rows.z[i] = 70.0 - 60.0 * t;
    }
    rows
}

/// Scalar lane vs `f32x4` over one row.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("ciecam02_row");
    let k = constants([96.42, 100.0, 82.49]);

    for size in [256usize, 1024, 4096] {
        let src = xyz_row(size);
        let mut jch = CorrelateRows::with_len(size);
        forward_row(&src, &k, &mut jch);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("forward_f32x4", size), &src, |b, s| {
            let mut out = CorrelateRows::with_len(size);
            b.iter(|| forward_row(black_box(s), &k, &mut out))
        });

        group.bench_with_input(BenchmarkId::new("forward_scalar", size), &src, |b, s| {
            let mut out = CorrelateRows::with_len(size);
            b.iter(|| forward_row_scalar(black_box(s), &k, &mut out))
        });

        group.bench_with_input(BenchmarkId::new("inverse_f32x4", size), &jch, |b, j| {
            let mut out = XyzRows::with_len(size);
            b.iter(|| inverse_row(black_box(j), &k, &mut out))
        });

        group.bench_with_input(BenchmarkId::new("inverse_scalar", size), &jch, |b, j| {
            let mut out = XyzRows::with_len(size);
            b.iter(|| inverse_row_scalar(black_box(j), &k, &mut out))
        });
    }

    group.finish();
}

/// Lab row through scene and destination conditions.
fn bench_adapter(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapt_lab_row");
    let adapter =
        ChromaticAdapter::new(constants([96.42, 100.0, 82.49]), constants([95.05, 100.0, 108.88]));
    let size = 2048;
    let src: Vec<f32> = (0..size)
        .flat_map(|i| {
            let t = i as f32 / size as f32;
            [8000.0 + 20000.0 * t, -3000.0 + 6000.0 * t, 2000.0 - 4000.0 * t]
        })
        .collect();
    let mut dst = vec![0.0f32; src.len()];

    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("f32x4", |b| {
        b.iter(|| adapter.adapt_lab_row(black_box(&src), &mut dst))
    });
    group.bench_function("scalar", |b| {
        b.iter(|| adapter.adapt_lab_row_scalar(black_box(&src), &mut dst))
    });
    group.finish();
}

/// Zone classification over a 512x512 grid.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let extents = Extents { right: 180.0, left: 120.0, down: 150.0, up: 90.0 };
    group.throughput(Throughput::Elements(512 * 512));

    for shape in [Shape::Ellipse, Shape::Rectangle] {
        let zone = ZoneGeometry::new((256.0, 256.0), extents, 0.6, shape)
            .and_then(|z| z.with_rotation(15.0))
            .unwrap();
        group.bench_function(format!("{shape:?}"), |b| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for y in 0..512 {
                    for x in 0..512 {
                        sum += zone.classify(x as f32, y as f32).factor();
                    }
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

/// Whole engine run on a 1024x768 frame.
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.sample_size(20);

    let (w, h) = (1024u32, 768u32);
    let data: Vec<f32> = (0..w * h)
        .flat_map(|i| {
            let t = (i % w) as f32 / w as f32;
            [10000.0 + 20000.0 * t, 15000.0, 25000.0 - 10000.0 * t]
        })
        .collect();
    let image = Image::<WideGamut>::from_data(w, h, data).unwrap();

    for loc in [250, 1000] {
        let params = LocalAdaptParams {
            enabled: true,
            amount: 80,
            temperature: 6500,
            zone: ZoneSpec {
                loc_x: loc,
                loc_xl: loc,
                loc_y: loc,
                loc_yt: loc,
                ..ZoneSpec::default()
            },
            ..Default::default()
        };
        let engine = LocalAdaptation::new(params).unwrap();
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(BenchmarkId::new("apply", loc), &image, |b, img| {
            b.iter(|| engine.apply(black_box(img)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform, bench_adapter, bench_classify, bench_engine);
criterion_main!(benches);
