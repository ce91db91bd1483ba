use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hlsphere::{solid_point, PointBudget, SampledColors};
use image::{Rgb, RgbImage};

fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn sample_decimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_decimation");
    for (width, height) in [(480, 270), (960, 540), (1920, 1080), (3840, 2160)] {
        let image = gradient_image(width, height);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &image,
            |b, image| b.iter(|| SampledColors::from_image(image, PointBudget::DEFAULT)),
        );
    }
    group.finish();
}

fn solid_mapping(c: &mut Criterion) {
    let image = gradient_image(1920, 1080);
    let samples = SampledColors::from_image(&image, PointBudget::DEFAULT);
    c.bench_function("solid_mapping", |b| {
        b.iter(|| {
            samples
                .colors()
                .iter()
                .map(|&color| solid_point(color))
                .collect::<Vec<_>>()
        })
    });
}

criterion_group!(benches, sample_decimation, solid_mapping);
criterion_main!(benches);
