//! Multi-match finder: repeated peak extraction with window suppression.

use crate::candidate::nms::suppress_peak;
use crate::candidate::{best_peak, nms_half_extents};
use crate::frame::Frame;
use crate::image::Rect;
use crate::kernel::Correlator;
use crate::preprocess;
use crate::search::{resolve_region, MatchOptions, MatchResult};
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_span};
use crate::util::LiveMatchResult;

/// Finds up to `max_results` non-overlapping placements at scale 1.0.
///
/// Peaks are taken best-first from one score surface; after each one the
/// window of `template_size * (1 + nms_overlap)` around it is overwritten
/// with the metric's worst score. Extraction stops at the first peak that
/// fails the threshold, so every result is a hard pass. Negative
/// `nms_overlap` is treated as 0.
pub fn find_all(
    frame: &Frame,
    template: &Template,
    options: &MatchOptions,
    max_results: usize,
    nms_overlap: f32,
) -> LiveMatchResult<Vec<MatchResult>> {
    let _span = trace_span!(
        "find_all",
        sequence = frame.sequence(),
        max_results = max_results
    )
    .entered();
    let pixels = frame.pixels();
    let Some(region) = resolve_region(pixels, options.roi) else {
        return Ok(Vec::new());
    };

    let key = options.preprocess_key();
    let source = preprocess::apply(pixels, Some(region), &key)?;
    let tpl = template.shared_variant(&key)?;
    if !source.fits(&tpl) {
        return Ok(Vec::new());
    }

    let metric = options.metric;
    let plan = TemplatePlan::from_plane(&tpl)?;
    let correlator = Correlator::new(&source);
    let Some(mut surface) = correlator.surface(&plan, metric, options.parallel)? else {
        return Ok(Vec::new());
    };

    let half = nms_half_extents(tpl.width(), tpl.height(), nms_overlap);
    let mut results = Vec::new();
    while results.len() < max_results {
        let Some(peak) = best_peak(&surface, metric) else {
            break;
        };
        if !options.is_hard_pass(peak.score) {
            break;
        }
        let bounds = Rect::new(
            region.x + peak.x as i32,
            region.y + peak.y as i32,
            template.width() as u32,
            template.height() as u32,
        );
        results.push(MatchResult::new(bounds, peak.score, 1.0, true));
        suppress_peak(&mut surface, &peak, half, metric);
    }

    trace_event!("find_all_done", found = results.len());
    Ok(results)
}
