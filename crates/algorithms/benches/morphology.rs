//! Benchmarks for QA dilation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lsqa_algorithms::morphology::{dilate_class_value, dilate_pixel_bit};
use lsqa_algorithms::qa::{PixelQaBit, QaClass};
use lsqa_core::raster::Raster;

fn class_test_raster(size: usize) -> Raster<u8> {
    let mut r = Raster::filled(size, size, QaClass::Clear.value());
    // Scattered cloud pixels so the short-circuit scan has work to do
    for row in (0..size).step_by(17) {
        for col in (0..size).step_by(23) {
            r.set(row, col, QaClass::Cloud.value()).unwrap();
        }
    }
    r
}

fn pixel_test_raster(size: usize) -> Raster<u16> {
    let mut r = Raster::filled(size, size, PixelQaBit::Clear.mask());
    for row in (0..size).step_by(17) {
        for col in (0..size).step_by(23) {
            r.set(row, col, PixelQaBit::Clear.mask() | PixelQaBit::Cloud.mask())
                .unwrap();
        }
    }
    r
}

fn bench_dilate_class(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/dilate_class");
    for size in [256, 512, 1024, 2048] {
        let raster = class_test_raster(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| dilate_class_value(black_box(&raster), QaClass::Cloud.value(), 3).unwrap())
        });
    }
    group.finish();
}

fn bench_dilate_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/dilate_pixel");
    for size in [256, 512, 1024, 2048] {
        let raster = pixel_test_raster(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| dilate_pixel_bit(black_box(&raster), PixelQaBit::Cloud, 3).unwrap())
        });
    }
    group.finish();
}

fn bench_distance_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/dilate_class_distance");
    let raster = class_test_raster(1024);
    for distance in [1, 2, 3, 5, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(distance),
            &distance,
            |b, &d| b.iter(|| dilate_class_value(black_box(&raster), QaClass::Cloud.value(), d).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_dilate_class,
    bench_dilate_pixel,
    bench_distance_scaling,
);
criterion_main!(benches);
