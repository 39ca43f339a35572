use livematch::{find_all, Frame, MatchOptions, Metric, PixelBuffer, PixelFormat, Template};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TPL: usize = 16;

fn noise_pixels(rng: &mut StdRng, width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, PixelFormat::Bgra8, |_, _| {
        let v: u8 = rng.random();
        [v, v, v]
    })
    .unwrap()
}

fn scene_with_copies(seed: u64, positions: &[(usize, usize)]) -> (Frame, Template) {
    let mut rng = StdRng::seed_from_u64(seed);
    let tpl = noise_pixels(&mut rng, TPL, TPL);
    let mut scene = noise_pixels(&mut rng, 160, 120);
    for &(x, y) in positions {
        scene.blit(&tpl, x, y);
    }
    (Frame::new(scene, 1), Template::new("tile", tpl))
}

fn top_lefts(results: &[livematch::MatchResult]) -> Vec<(i32, i32)> {
    let mut out: Vec<_> = results.iter().map(|r| (r.bounds.x, r.bounds.y)).collect();
    out.sort_by_key(|&(x, y)| (y, x));
    out
}

#[test]
fn finds_every_copy_and_nothing_else() {
    let (frame, template) = scene_with_copies(1, &[(10, 10), (60, 50), (120, 90)]);
    let results = find_all(&frame, &template, &MatchOptions::default(), 10, 0.0).unwrap();
    assert_eq!(top_lefts(&results), vec![(10, 10), (60, 50), (120, 90)]);
    for r in &results {
        assert!(r.hard_pass);
        assert_eq!(r.scale, 1.0);
        assert_eq!((r.bounds.width, r.bounds.height), (TPL as u32, TPL as u32));
        assert!(r.score > 0.99);
    }
}

#[test]
fn results_are_capped_and_best_first() {
    let (frame, template) = scene_with_copies(2, &[(10, 10), (60, 50), (120, 90)]);
    let results = find_all(&frame, &template, &MatchOptions::default(), 2, 0.0).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].score >= results[1].score);
    assert!(find_all(&frame, &template, &MatchOptions::default(), 0, 0.0).unwrap().is_empty());
}

#[test]
fn results_respect_suppression_window() {
    let (frame, template) = scene_with_copies(3, &[(30, 30), (50, 30), (100, 80)]);

    let tight = find_all(&frame, &template, &MatchOptions::default(), 10, 0.0).unwrap();
    assert_eq!(tight.len(), 3);

    // Window grows to 48x48, so copies 20 px apart collapse into one hit.
    let wide = find_all(&frame, &template, &MatchOptions::default(), 10, 2.0).unwrap();
    assert_eq!(wide.len(), 2);
    let half = (TPL as f32 * 3.0 / 2.0).floor() as i32;
    for (i, a) in wide.iter().enumerate() {
        for b in &wide[i + 1..] {
            let dx = (a.bounds.x - b.bounds.x).abs();
            let dy = (a.bounds.y - b.bounds.y).abs();
            assert!(dx.max(dy) > half);
        }
    }
}

#[test]
fn negative_overlap_behaves_like_zero() {
    let (frame, template) = scene_with_copies(4, &[(30, 30), (50, 30)]);
    let zero = find_all(&frame, &template, &MatchOptions::default(), 10, 0.0).unwrap();
    let negative = find_all(&frame, &template, &MatchOptions::default(), 10, -0.5).unwrap();
    assert_eq!(top_lefts(&zero), top_lefts(&negative));
}

#[test]
fn lower_is_better_metric_finds_the_same_copies() {
    let (frame, template) = scene_with_copies(5, &[(10, 10), (120, 90)]);
    let options = MatchOptions {
        metric: Metric::SqDiffNormed,
        ..MatchOptions::default()
    };
    let results = find_all(&frame, &template, &options, 10, 0.0).unwrap();
    assert_eq!(top_lefts(&results), vec![(10, 10), (120, 90)]);
    assert!(results.iter().all(|r| r.score < 0.01));
}

#[test]
fn roi_limits_and_offsets_results() {
    let (frame, template) = scene_with_copies(6, &[(10, 10), (120, 90)]);
    let options = MatchOptions {
        roi: Some(livematch::Rect::new(100, 70, 100, 100)),
        ..MatchOptions::default()
    };
    let results = find_all(&frame, &template, &options, 10, 0.0).unwrap();
    assert_eq!(top_lefts(&results), vec![(120, 90)]);
}
