//! Accumulator peak selection with circumference normalization.

use circle_tracker_core::Circle;
use log::debug;

use crate::accumulator::Accumulator;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Pick the single best circle in `acc`.
///
/// A cell's score is its vote count divided by `ceil(2*pi*r)`. Only cells
/// whose full circle fits inside the frame (`r <= x < w - r`, same for `y`)
/// and that received at least one vote are considered. The cell must reach
/// `acc_thresh` percent; among those the highest score wins, and exact ties
/// keep the first cell in scan order (radius, then row, then column).
///
/// The returned score is clamped to `1.0`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(acc), fields(radii = acc.range().len()))
)]
pub fn select_peak(acc: &Accumulator, acc_thresh: f32) -> Option<Circle> {
    let w = acc.width();
    let h = acc.height();
    let range = acc.range();
    let min_score = if acc_thresh.is_finite() {
        acc_thresh.clamp(0.0, 100.0) as f64 / 100.0
    } else {
        0.0
    };

    // (score, ri, x, y)
    let mut best: Option<(f64, usize, usize, usize)> = None;

    for ri in 0..range.len() {
        let r = range.radius(ri) as usize;
        if w <= 2 * r || h <= 2 * r {
            continue;
        }
        let max_possible = range.max_possible_votes(ri) as f64;
        let plane = acc.plane(ri);

        for y in r..h - r {
            let row = &plane[y * w..(y + 1) * w];
            for (x, &v) in row.iter().enumerate().take(w - r).skip(r) {
                if v == 0 {
                    continue;
                }
                let score = v as f64 / max_possible;
                if score < min_score {
                    continue;
                }
                if best.is_none_or(|(s, ..)| score > s) {
                    best = Some((score, ri, x, y));
                }
            }
        }
    }

    let (score, ri, x, y) = best?;
    let r = range.radius(ri);
    debug!("peak at ({x}, {y}) r={r} score={score:.3}");
    Some(Circle::new(
        x as f32,
        y as f32,
        r as f32,
        score.min(1.0) as f32,
    ))
}
