use circle_tracker_core::Circle;
use serde::{Deserialize, Serialize};

/// Everything one pipeline call produced, for diagnostics and reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    /// Peak of this frame's accumulator, before smoothing.
    pub raw: Option<Circle>,
    /// Circle after the temporal tracker; what a renderer should draw.
    pub smoothed: Option<Circle>,
    /// Number of pixels that voted.
    pub edge_points: usize,
}
