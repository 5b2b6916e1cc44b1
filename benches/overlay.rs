use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use ndarray::Array2;
use seismic_report::{colorize, overlay, ClassMask};

fn synthetic_mask(width: usize, height: usize) -> ClassMask {
    // horizontal facies bands, 15 classes
    ClassMask::from_array2(Array2::from_shape_fn((height, width), |(y, _)| {
        (y * 15 / height) as i64
    }))
}

fn benchmark_overlay(c: &mut Criterion) {
    let mask = synthetic_mask(1024, 512);
    let original = RgbImage::from_fn(1024, 512, |x, y| {
        let v = ((x ^ y) & 0xFF) as u8;
        Rgb([v, v, v])
    });

    c.bench_function("colorize_1024x512", |b| {
        b.iter(|| colorize(black_box(&mask)))
    });

    let colorized = colorize(&mask);
    c.bench_function("overlay_1024x512", |b| {
        b.iter(|| overlay(black_box(&original), black_box(&colorized), 0.5))
    });

    let half = synthetic_mask(512, 256);
    let half_colorized = colorize(&half);
    c.bench_function("overlay_resampled_512_to_1024", |b| {
        b.iter(|| overlay(black_box(&original), black_box(&half_colorized), 0.5))
    });
}

criterion_group!(benches, benchmark_overlay);
criterion_main!(benches);
