#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmarks for the rasterization strategies and trace encoders.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use line_raster::prelude::*;

fn rasterize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize");

    for length in [16.0, 256.0, 4096.0] {
        let segment = Segment::from_coords(0.37, 0.81, length + 0.37, length * 0.41 + 0.81);
        group.throughput(Throughput::Elements(length as u64 + 1));

        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), length as u32),
                &segment,
                |b, &segment| {
                    b.iter(|| {
                        drive(algorithm.rasterize(black_box(segment)), &mut Discard, &mut Discard)
                    });
                },
            );
        }
    }

    group.finish();
}

fn trace_capture_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_capture");
    let segment = Segment::from_coords(0.37, 0.81, 1000.37, 410.81);

    for algorithm in [Algorithm::SubpixelDda, Algorithm::Bresenham, Algorithm::SubpixelBresenham] {
        group.bench_with_input(BenchmarkId::from_parameter(algorithm), &segment, |b, &segment| {
            b.iter(|| Trace::capture(algorithm, black_box(segment)));
        });
    }

    group.finish();
}

fn encoder_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoders");
    let segment = Segment::from_coords(0.5, 0.5, 63.5, 40.5);
    let trace = Trace::capture(Algorithm::SubpixelBresenham, segment);

    let mut fb = Framebuffer::new(64, 64).expect("framebuffer creation should succeed");
    drive(trace.pixels.iter().copied().map(RasterStep::untraced), &mut fb, &mut Discard);

    group.bench_function("svg", |b| {
        let encoder = SvgEncoder::for_trace(segment, trace.clone());
        b.iter(|| encoder.render());
    });

    group.bench_function("png", |b| {
        let encoder = PngEncoder::new().cell_size(8);
        b.iter(|| encoder.to_bytes(black_box(&fb)).expect("PNG encoding should succeed"));
    });

    group.bench_function("terminal", |b| {
        let encoder = TerminalEncoder::new();
        b.iter(|| encoder.render(black_box(&fb)));
    });

    group.finish();
}

criterion_group!(benches, rasterize_benchmark, trace_capture_benchmark, encoder_benchmark);
criterion_main!(benches);
