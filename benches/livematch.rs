use livematch::lowlevel::{Correlator, TemplatePlan};
use livematch::{
    find_all, find_best, Frame, MatchOptions, Metric, PixelBuffer, PixelFormat, Plane, Template,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn to_pixels(gray: &[u8], width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, PixelFormat::Bgra8, |x, y| {
        let v = gray[y * width + x];
        [v, v, v]
    })
    .unwrap()
}

fn bench_matcher(c: &mut Criterion) {
    let (img_width, img_height) = (640, 400);
    let image = make_image(img_width, img_height);
    let pixels = to_pixels(&image, img_width, img_height);
    let template = Template::new("patch", pixels.crop(210, 140, 48, 32).unwrap());
    let frame = Frame::new(pixels, 1);

    let single = MatchOptions::default();
    c.bench_function("find_best_unit_scale", |b| {
        b.iter(|| black_box(find_best(&frame, &template, &single).unwrap()));
    });

    let sweep = MatchOptions {
        scale_min: 0.9,
        scale_max: 1.1,
        scale_step: 0.05,
        ..MatchOptions::default()
    };
    c.bench_function("find_best_scale_sweep", |b| {
        b.iter(|| black_box(find_best(&frame, &template, &sweep).unwrap()));
    });

    let roi = MatchOptions {
        roi: Some(livematch::Rect::new(150, 100, 160, 120)),
        ..MatchOptions::default()
    };
    c.bench_function("find_best_local_roi", |b| {
        b.iter(|| black_box(find_best(&frame, &template, &roi).unwrap()));
    });

    c.bench_function("find_all_sqdiff", |b| {
        let options = MatchOptions {
            metric: Metric::SqDiffNormed,
            ..MatchOptions::default()
        };
        b.iter(|| black_box(find_all(&frame, &template, &options, 8, 0.2).unwrap()));
    });

    #[cfg(feature = "rayon")]
    {
        let parallel = MatchOptions {
            parallel: true,
            ..sweep.clone()
        };
        c.bench_function("find_best_scale_sweep_parallel", |b| {
            b.iter(|| black_box(find_best(&frame, &template, &parallel).unwrap()));
        });
    }
}

fn bench_surface(c: &mut Criterion) {
    let (width, height) = (320, 240);
    let source = Plane::gray(make_image(width, height), width, height).unwrap();
    let tpl = Plane::gray(make_image(40, 30), 40, 30).unwrap();
    let plan = TemplatePlan::from_plane(&tpl).unwrap();
    let correlator = Correlator::new(&source);
    c.bench_function("zncc_surface_320x240", |b| {
        b.iter(|| black_box(correlator.surface(&plan, Metric::Zncc, false).unwrap()));
    });
}

criterion_group!(benches, bench_matcher, bench_surface);
criterion_main!(benches);
