use serde::{Deserialize, Serialize};

use crate::radius::RadiusRange;

/// Parameters for one detection call. May change between frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Smallest candidate radius in processing pixels (>= 1).
    pub r_min: u32,
    /// Largest candidate radius. Keep it below `min(w, h) / 2`; larger radii
    /// never fit inside the frame and collect no score.
    pub r_max: u32,
    /// Minimum edge magnitude (0..=255) for a pixel to vote.
    pub edge_thresh: u8,
    /// Minimum score, in percent of the circumference vote count.
    pub acc_thresh: f32,
    /// Width of the processing buffer. The host resizes camera frames to this
    /// width before calling the detector.
    pub proc_width: u32,
}

/// Defaults for a 320 px wide processing buffer.
///
/// Gradient directions on a hard-edged circle are only accurate to a few
/// degrees, so the votes of a large circle spread over several cells and a
/// clean high-contrast circle of radius 60 to 90 peaks at 4 to 12 percent.
/// `r_min` stays at 20 because smaller radii let chance alignments of edge
/// pixels reach similar scores.
impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            r_min: 20,
            r_max: 100,
            edge_thresh: 80,
            acc_thresh: 4.0,
            proc_width: 320,
        }
    }
}

impl DetectionParams {
    /// Copy with out-of-range values clamped: `r_min >= 1`,
    /// `acc_thresh` in `[0, 100]` (non-finite becomes 0), `proc_width >= 1`.
    pub fn sanitized(&self) -> Self {
        let acc_thresh = if self.acc_thresh.is_finite() {
            self.acc_thresh.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            r_min: self.r_min.max(1),
            acc_thresh,
            proc_width: self.proc_width.max(1),
            ..*self
        }
    }

    pub fn radius_range(&self) -> RadiusRange {
        RadiusRange::new(self.r_min, self.r_max)
    }

    /// Processing height that keeps the aspect ratio of a `src_w x src_h` frame.
    pub fn proc_height(&self, src_w: u32, src_h: u32) -> u32 {
        if src_w == 0 {
            return 0;
        }
        let h = (src_h as u64 * self.proc_width.max(1) as u64 + src_w as u64 / 2) / src_w as u64;
        h.max(1) as u32
    }
}
