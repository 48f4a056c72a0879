use serde::{Deserialize, Serialize};

/// A detected circle in processing-buffer pixel coordinates.
///
/// Raw detections always carry integer-valued `x`, `y` and `r`. Temporally
/// smoothed circles may hold fractional values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    /// Normalized vote fraction in `[0, 1]`.
    pub score: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, r: f32, score: f32) -> Self {
        Self { x, y, r, score }
    }

    /// Nearest integer pixel center and radius, for overlay rendering.
    pub fn rounded(&self) -> (i32, i32, i32) {
        (
            self.x.round() as i32,
            self.y.round() as i32,
            self.r.round() as i32,
        )
    }

    /// Scale center and radius by `s`, e.g. to map back to source resolution.
    pub fn scaled(&self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            r: self.r * s,
            score: self.score,
        }
    }
}
