//! Cross-frame exponential smoothing of the detected circle.

use circle_tracker_core::Circle;
use log::trace;
use serde::{Deserialize, Serialize};

/// Weight of the newest sample in the exponential filter.
pub const SMOOTHING_ALPHA: f32 = 0.5;

/// Smoothed circle carried from one frame to the next.
///
/// One instance per video session. It is the only state that outlives a
/// single pipeline call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    smooth: Option<Circle>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Circle> {
        self.smooth
    }

    pub fn reset(&mut self) {
        self.smooth = None;
    }

    /// Feed this frame's raw detection and return the smoothed circle.
    ///
    /// - `None` clears the state; one missed frame restarts smoothing.
    /// - The first detection after a reset is taken as is.
    /// - Otherwise `x`, `y`, `r` move toward the raw values by
    ///   [`SMOOTHING_ALPHA`]; `score` is copied from the raw circle.
    pub fn update(&mut self, raw: Option<Circle>) -> Option<Circle> {
        let Some(raw) = raw else {
            if self.smooth.take().is_some() {
                trace!("circle lost, smoothing reset");
            }
            return None;
        };

        let next = match self.smooth {
            None => {
                trace!("circle acquired at ({}, {}) r={}", raw.x, raw.y, raw.r);
                raw
            }
            Some(prev) => Circle {
                x: blend(prev.x, raw.x),
                y: blend(prev.y, raw.y),
                r: blend(prev.r, raw.r),
                score: raw.score,
            },
        };
        self.smooth = Some(next);
        Some(next)
    }
}

#[inline]
fn blend(old: f32, sample: f32) -> f32 {
    old * (1.0 - SMOOTHING_ALPHA) + sample * SMOOTHING_ALPHA
}
