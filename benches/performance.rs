use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lumaview::equalize::{apply_lut, build_lut, histogram};
use lumaview::grayscale::{is_grayscale, to_grayscale};
use lumaview::raster::{PixelDepth, RasterImage, ReadPolicy, Rgba};

fn color_gradient(width: u32, height: u32) -> RasterImage {
    let mut img = RasterImage::new(width, height, PixelDepth::Packed32).unwrap();
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            img.write_pixel(x, y, Rgba::new(r, g, 128, 255));
        }
    }
    img
}

fn bench_grayscale_conversion(c: &mut Criterion) {
    let img = color_gradient(1920, 1080);

    c.bench_function("to_grayscale_1920x1080", |b| {
        b.iter(|| to_grayscale(black_box(&img), ReadPolicy::Continue).unwrap())
    });

    c.bench_function("is_grayscale_1920x1080", |b| {
        b.iter(|| is_grayscale(black_box(&img)))
    });
}

fn bench_equalization(c: &mut Criterion) {
    let gray = to_grayscale(&color_gradient(1920, 1080), ReadPolicy::Continue).unwrap();

    c.bench_function("histogram_1920x1080", |b| {
        b.iter(|| histogram(black_box(&gray)))
    });

    let hist = histogram(&gray);
    c.bench_function("build_lut", |b| {
        b.iter(|| build_lut(black_box(&hist), gray.pixel_count()))
    });

    let lut = build_lut(&hist, gray.pixel_count());
    c.bench_function("apply_lut_1920x1080", |b| {
        b.iter(|| apply_lut(black_box(&gray), &lut, ReadPolicy::Continue).unwrap())
    });
}

criterion_group!(benches, bench_grayscale_conversion, bench_equalization);
criterion_main!(benches);
