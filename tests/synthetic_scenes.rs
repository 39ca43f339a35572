//! Scale-space search against synthetic scenes with known ground truth.
//!
//! Each case pastes a resampled copy of a noise template into a noise
//! background; the matcher must recover position and scale.

use livematch::image::resize::resize_bilinear;
use livematch::{
    find_all, find_best, Frame, MatchOptions, Metric, PixelBuffer, PixelFormat, Plane, Rect,
    Template,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

const SCENE_W: usize = 220;
const SCENE_H: usize = 160;
const TPL_W: usize = 32;
const TPL_H: usize = 24;

/// Position tolerance in pixels.
const POSITION_TOLERANCE_PX: i32 = 1;

const CASES: &str = r#"[
    { "case_id": "unit_scale", "scale": 1.0, "x": 40, "y": 30, "metric": "zncc" },
    { "case_id": "upscaled", "scale": 1.15, "x": 100, "y": 60, "metric": "zncc" },
    { "case_id": "downscaled", "scale": 0.85, "x": 12, "y": 90, "metric": "ncc" },
    { "case_id": "sqdiff", "scale": 1.1, "x": 150, "y": 20, "metric": "sq_diff_normed" },
    { "case_id": "roi_offset", "scale": 1.0, "x": 70, "y": 70, "metric": "zncc",
      "roi": [60, 60, 80, 70] },
    { "case_id": "roi_partly_outside", "scale": 0.9, "x": 180, "y": 120, "metric": "zncc",
      "roi": [170, 110, 200, 200] }
]"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricJson {
    Zncc,
    Ncc,
    SqDiffNormed,
}

impl From<MetricJson> for Metric {
    fn from(value: MetricJson) -> Self {
        match value {
            MetricJson::Zncc => Metric::Zncc,
            MetricJson::Ncc => Metric::Ncc,
            MetricJson::SqDiffNormed => Metric::SqDiffNormed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Case {
    case_id: String,
    scale: f32,
    x: usize,
    y: usize,
    metric: MetricJson,
    #[serde(default)]
    roi: Option<[i32; 4]>,
}

fn noise(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random::<u8>()).collect()
}

fn gray_pixels(data: &[u8], width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, PixelFormat::Bgra8, |x, y| {
        let v = data[y * width + x];
        [v, v, v]
    })
    .unwrap()
}

fn paste(scene: &mut [u8], patch: &Plane, x0: usize, y0: usize) {
    for y in 0..patch.height() {
        let row = patch.row(y).unwrap();
        let start = (y0 + y) * SCENE_W + x0;
        scene[start..start + row.len()].copy_from_slice(row);
    }
}

fn scaled(extent: usize, scale: f32) -> usize {
    ((extent as f32 * scale).round() as usize).max(1)
}

fn sweep() -> MatchOptions {
    MatchOptions {
        scale_min: 0.8,
        scale_max: 1.2,
        scale_step: 0.05,
        ..MatchOptions::default()
    }
}

#[test]
fn recovers_position_and_scale() {
    let cases: Vec<Case> = serde_json::from_str(CASES).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let tpl_data = noise(&mut rng, TPL_W * TPL_H);
    let tpl_plane = Plane::gray(tpl_data.clone(), TPL_W, TPL_H).unwrap();
    let template = Template::new("noise-patch", gray_pixels(&tpl_data, TPL_W, TPL_H));

    for case in cases {
        let mut scene = noise(&mut rng, SCENE_W * SCENE_H);
        let patch = resize_bilinear(
            &tpl_plane,
            scaled(TPL_W, case.scale),
            scaled(TPL_H, case.scale),
        )
        .unwrap();
        paste(&mut scene, &patch, case.x, case.y);
        let frame = Frame::new(gray_pixels(&scene, SCENE_W, SCENE_H), 1);

        let options = MatchOptions {
            metric: case.metric.into(),
            roi: case.roi.map(|[x, y, w, h]| Rect::new(x, y, w as u32, h as u32)),
            ..sweep()
        };
        let found = find_best(&frame, &template, &options)
            .unwrap()
            .unwrap_or_else(|| panic!("{}: no result", case.case_id));

        assert!(found.hard_pass, "{}: score {}", case.case_id, found.score);
        assert!(
            (found.scale - case.scale).abs() <= options.scale_step + 1e-3,
            "{}: scale {} vs {}",
            case.case_id,
            found.scale,
            case.scale
        );
        assert!(
            (found.bounds.x - case.x as i32).abs() <= POSITION_TOLERANCE_PX
                && (found.bounds.y - case.y as i32).abs() <= POSITION_TOLERANCE_PX,
            "{}: found at {:?}",
            case.case_id,
            found.bounds
        );
        assert_eq!(found.bounds.width as usize, scaled(TPL_W, found.scale));
        assert_eq!(found.center, found.bounds.center());
    }
}

#[test]
fn absent_template_is_reported_but_not_passed() {
    let mut rng = StdRng::seed_from_u64(7);
    let tpl_data = noise(&mut rng, TPL_W * TPL_H);
    let template = Template::new("missing", gray_pixels(&tpl_data, TPL_W, TPL_H));
    let scene = noise(&mut rng, SCENE_W * SCENE_H);
    let frame = Frame::new(gray_pixels(&scene, SCENE_W, SCENE_H), 1);

    let found = find_best(&frame, &template, &MatchOptions::default()).unwrap().unwrap();
    assert!(!found.hard_pass);
    assert!(found.score < 0.8);

    let strict = MatchOptions {
        metric: Metric::SqDiffNormed,
        ..MatchOptions::default()
    };
    let found = find_best(&frame, &template, &strict).unwrap().unwrap();
    assert!(!found.hard_pass);
}

#[test]
fn geometry_that_cannot_match_returns_none() {
    let mut rng = StdRng::seed_from_u64(8);
    let tpl_data = noise(&mut rng, TPL_W * TPL_H);
    let template = Template::new("icon", gray_pixels(&tpl_data, TPL_W, TPL_H));
    let scene = noise(&mut rng, SCENE_W * SCENE_H);
    let frame = Frame::new(gray_pixels(&scene, SCENE_W, SCENE_H), 1);

    let outside = MatchOptions {
        roi: Some(Rect::new(500, 500, 40, 40)),
        ..MatchOptions::default()
    };
    assert_eq!(find_best(&frame, &template, &outside).unwrap(), None);

    let too_small = MatchOptions {
        roi: Some(Rect::new(0, 0, 20, 60)),
        ..MatchOptions::default()
    };
    assert_eq!(find_best(&frame, &template, &too_small).unwrap(), None);

    // The unit-scale template must fit even when smaller scales would.
    let tight = MatchOptions {
        roi: Some(Rect::new(0, 0, 28, 22)),
        scale_min: 0.8,
        scale_max: 1.0,
        scale_step: 0.1,
        ..MatchOptions::default()
    };
    assert_eq!(find_best(&frame, &template, &tight).unwrap(), None);
}

#[test]
fn colour_and_edge_modes_find_exact_copy() {
    let mut rng = StdRng::seed_from_u64(9);
    let tpl = PixelBuffer::from_fn(TPL_W, TPL_H, PixelFormat::Rgba8, |_, _| {
        [rng.random(), rng.random(), rng.random()]
    })
    .unwrap();
    let mut scene = PixelBuffer::from_fn(SCENE_W, SCENE_H, PixelFormat::Bgra8, |_, _| {
        [rng.random(), rng.random(), rng.random()]
    })
    .unwrap();
    scene.blit(&tpl, 77, 41);
    let frame = Frame::new(scene, 3);
    let template = Template::new("colour", tpl);

    let colour = MatchOptions {
        grayscale: false,
        ..MatchOptions::default()
    };
    let found = find_best(&frame, &template, &colour).unwrap().unwrap();
    assert_eq!((found.bounds.x, found.bounds.y), (77, 41));
    assert!(found.score > 0.99);

    let edges = MatchOptions {
        edge: true,
        threshold: 0.5,
        ..MatchOptions::default()
    };
    let found = find_best(&frame, &template, &edges).unwrap().unwrap();
    assert_eq!((found.bounds.x, found.bounds.y), (77, 41));
    assert!(found.hard_pass);
}

#[test]
fn solid_template_on_solid_frame_is_not_found() {
    let white = PixelBuffer::from_fn(8, 8, PixelFormat::Bgra8, |_, _| [255, 255, 255]).unwrap();
    let black = PixelBuffer::from_fn(64, 48, PixelFormat::Bgra8, |_, _| [0, 0, 0]).unwrap();
    let frame = Frame::new(black, 1);
    let template = Template::new("solid", white);

    assert_eq!(find_best(&frame, &template, &MatchOptions::default()).unwrap(), None);
    assert!(find_all(&frame, &template, &MatchOptions::default(), 4, 0.0)
        .unwrap()
        .is_empty());

    for metric in [Metric::Ncc, Metric::SqDiffNormed] {
        let options = MatchOptions {
            metric,
            ..MatchOptions::default()
        };
        let found = find_best(&frame, &template, &options).unwrap().unwrap();
        assert!(!found.hard_pass, "{metric:?}: score {}", found.score);
    }
}

#[test]
fn wide_sweep_does_not_settle_on_tiny_scales() {
    let mut rng = StdRng::seed_from_u64(31);
    let tpl_data = noise(&mut rng, 16 * 16);
    let tpl_plane = Plane::gray(tpl_data.clone(), 16, 16).unwrap();
    let template = Template::new("small-noise", gray_pixels(&tpl_data, 16, 16));
    let mut scene = noise(&mut rng, SCENE_W * SCENE_H);
    paste(&mut scene, &tpl_plane, 40, 30);
    let frame = Frame::new(gray_pixels(&scene, SCENE_W, SCENE_H), 1);

    let options = MatchOptions {
        scale_min: 0.05,
        scale_max: 1.0,
        scale_step: 0.05,
        ..MatchOptions::default()
    };
    let found = find_best(&frame, &template, &options).unwrap().unwrap();
    assert_eq!((found.bounds.x, found.bounds.y), (40, 30));
    assert!((found.scale - 1.0).abs() < 1e-3);
    assert!(found.hard_pass);
}

#[test]
fn unbounded_sweep_stops_once_the_template_outgrows_the_region() {
    let mut rng = StdRng::seed_from_u64(32);
    let tpl_data = noise(&mut rng, 16 * 12);
    let tpl_plane = Plane::gray(tpl_data.clone(), 16, 12).unwrap();
    let template = Template::new("bounded", gray_pixels(&tpl_data, 16, 12));
    let mut scene = noise(&mut rng, SCENE_W * SCENE_H);
    paste(&mut scene, &tpl_plane, 9, 7);
    let frame = Frame::new(gray_pixels(&scene, SCENE_W, SCENE_H), 1);

    let options = MatchOptions {
        scale_min: 1.0,
        scale_max: f32::MAX,
        roi: Some(Rect::new(0, 0, 40, 30)),
        ..MatchOptions::default()
    };
    let found = find_best(&frame, &template, &options).unwrap().unwrap();
    assert_eq!((found.bounds.x, found.bounds.y), (9, 7));
    assert!((found.scale - 1.0).abs() < 1e-3);
}
