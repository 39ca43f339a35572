//! Scale-space matcher: best placement across a sweep of template scales.

use crate::candidate::{best_peak, Peak};
use crate::frame::Frame;
use crate::image::resize::resize_bilinear;
use crate::image::Rect;
use crate::kernel::{Correlator, FLAT_EPS};
use crate::preprocess;
use crate::search::{resolve_region, MatchOptions, MatchResult, Metric};
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::math::{is_unit_scale, scaled_extent};
use crate::util::LiveMatchResult;

/// Scaled templates narrower or shorter than this carry no usable structure.
const MIN_SCALED_EXTENT: usize = 3;

#[derive(Clone, Copy)]
struct ScaleCandidate {
    peak: Peak,
    scale: f32,
}

/// Finds the single best placement of `template` in `frame`.
///
/// The source region (ROI clamped to the frame) is preprocessed once, then
/// every scale in the sweep is correlated against it and the best extremum
/// wins; earlier scales win ties. Returns `Ok(None)` when the ROI is empty
/// or no scale of the template fits inside it. The result's `hard_pass`
/// reports whether the score clears `options.threshold`.
///
/// Scales that shrink the template below three pixels per axis, or that
/// leave it without variance under `Metric::Zncc`, are skipped. The sweep
/// stops at the first scale that no longer fits the region.
pub fn find_best(
    frame: &Frame,
    template: &Template,
    options: &MatchOptions,
) -> LiveMatchResult<Option<MatchResult>> {
    let _span = trace_span!("find_best", sequence = frame.sequence()).entered();
    let pixels = frame.pixels();
    let Some(region) = resolve_region(pixels, options.roi) else {
        trace_event!("roi_empty", sequence = frame.sequence());
        return Ok(None);
    };

    let key = options.preprocess_key();
    let source = preprocess::apply(pixels, Some(region), &key)?;
    let tpl = template.shared_variant(&key)?;
    if !source.fits(&tpl) {
        trace_event!(
            "template_larger_than_region",
            width = source.width(),
            height = source.height()
        );
        return Ok(None);
    }

    let metric = options.metric;
    let correlator = Correlator::new(&source);
    let mut best: Option<ScaleCandidate> = None;
    for scale in options.scales() {
        let plan = if is_unit_scale(scale) {
            TemplatePlan::from_plane(&tpl)?
        } else {
            let width = scaled_extent(tpl.width(), scale);
            let height = scaled_extent(tpl.height(), scale);
            if width > source.width() || height > source.height() {
                break;
            }
            if width < MIN_SCALED_EXTENT || height < MIN_SCALED_EXTENT {
                continue;
            }
            TemplatePlan::from_plane(&resize_bilinear(&tpl, width, height)?)?
        };
        if metric == Metric::Zncc && plan.centered_energy() <= FLAT_EPS {
            trace_debug!("scale_flat", scale = scale);
            continue;
        }
        let Some(surface) = correlator.surface(&plan, metric, options.parallel)? else {
            continue;
        };
        let Some(peak) = best_peak(&surface, metric) else {
            continue;
        };
        trace_debug!("scale_scored", scale = scale, score = peak.score);
        if best.map_or(true, |b| metric.is_better(peak.score, b.peak.score)) {
            best = Some(ScaleCandidate { peak, scale });
        }
    }

    let Some(best) = best else {
        trace_event!("no_scale_fits", scales = options.scales().len());
        return Ok(None);
    };

    let bounds = Rect::new(
        region.x + best.peak.x as i32,
        region.y + best.peak.y as i32,
        scaled_extent(template.width(), best.scale) as u32,
        scaled_extent(template.height(), best.scale) as u32,
    );
    let hard_pass = options.is_hard_pass(best.peak.score);
    let result = MatchResult::new(bounds, best.peak.score, best.scale, hard_pass);
    trace_event!(
        "best_match",
        score = result.score,
        scale = result.scale,
        hard_pass = result.hard_pass
    );
    Ok(Some(result))
}
