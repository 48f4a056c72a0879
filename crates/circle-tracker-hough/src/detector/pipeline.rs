use circle_tracker_core::{Circle, GrayImageView, RgbaFrameView};
use log::{debug, log_enabled, trace, Level};

use crate::accumulator::collect_edge_points_into;
use crate::detector::{DetectionOutcome, DetectionParams};
use crate::edges::sobel_edges_into;
use crate::grayscale::rgba_to_gray_into;
use crate::peak::select_peak;
use crate::smooth::smooth_3x3_into;
use crate::tracker::TrackerState;
use crate::workspace::HoughWorkspace;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Detect the circle in one frame and update the tracker.
///
/// Allocates fresh scratch buffers on every call. Use [`CircleDetector`] to
/// reuse them across frames.
pub fn detect(
    frame: &RgbaFrameView<'_>,
    params: &DetectionParams,
    state: &mut TrackerState,
) -> Option<Circle> {
    CircleDetector::new().detect(frame, params, state)
}

/// Circle detector that keeps its scratch buffers between frames.
///
/// The detector itself is stateless from the caller's point of view: the
/// same frame, parameters and [`TrackerState`] always give the same result.
/// One detector per thread; several sessions may share it sequentially as
/// long as each passes its own `TrackerState`.
#[derive(Debug, Default)]
pub struct CircleDetector {
    workspace: HoughWorkspace,
}

impl CircleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workspace(&self) -> &HoughWorkspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut HoughWorkspace {
        &mut self.workspace
    }

    /// Main entry: smoothed circle for this frame, or `None`.
    pub fn detect(
        &mut self,
        frame: &RgbaFrameView<'_>,
        params: &DetectionParams,
        state: &mut TrackerState,
    ) -> Option<Circle> {
        self.process(frame, params, state).smoothed
    }

    /// Run the full pipeline and return raw and smoothed results.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, frame, params, state),
            fields(w = frame.width, h = frame.height)
        )
    )]
    pub fn process(
        &mut self,
        frame: &RgbaFrameView<'_>,
        params: &DetectionParams,
        state: &mut TrackerState,
    ) -> DetectionOutcome {
        let params = checked_params(params);
        let raw = self.find_raw(frame, &params);
        let smoothed = state.update(raw);
        DetectionOutcome {
            raw,
            smoothed,
            edge_points: self.workspace.points.len(),
        }
    }

    /// Edge magnitude of the last processed frame, for debug overlays.
    pub fn edge_magnitude(&self) -> Option<GrayImageView<'_>> {
        let edges = &self.workspace.edges;
        (edges.width > 0 && edges.height > 0).then(|| edges.magnitude_view())
    }

    fn find_raw(&mut self, frame: &RgbaFrameView<'_>, params: &DetectionParams) -> Option<Circle> {
        let ws = &mut self.workspace;
        let (w, h) = (frame.width, frame.height);

        rgba_to_gray_into(frame, &mut ws.gray);
        smooth_3x3_into(&ws.gray.view(), &mut ws.smoothed);
        sobel_edges_into(&ws.smoothed.view(), &mut ws.edges);
        collect_edge_points_into(&ws.edges, params.edge_thresh, &mut ws.points);

        let range = params.radius_range();
        debug!(
            "{}x{} frame: {} edge points, {} radii from {} step {}",
            w,
            h,
            ws.points.len(),
            range.len(),
            range.r_min,
            range.r_step
        );
        if range.is_empty() || ws.points.is_empty() {
            return None;
        }

        ws.accumulator.reset(range, w, h);
        ws.accumulator.cast_votes(&ws.points);
        if log_enabled!(Level::Trace) {
            trace!("{} votes cast", ws.accumulator.total_votes());
        }
        select_peak(&ws.accumulator, params.acc_thresh)
    }
}

fn checked_params(params: &DetectionParams) -> DetectionParams {
    let sane = params.sanitized();
    if sane != *params {
        debug!("detection parameters clamped: {params:?} -> {sane:?}");
    }
    if sane.r_max <= sane.r_min {
        debug!(
            "empty radius range (r_min={}, r_max={})",
            sane.r_min, sane.r_max
        );
    }
    sane
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk_frame(w: usize, h: usize, cx: f32, cy: f32, r: f32) -> Vec<u8> {
        let mut data = vec![0u8; w * h * 4];
        for y in 0..h {
            for x in 0..w {
                let d2 = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2);
                let v = if d2 <= r * r { 220 } else { 30 };
                let i = (y * w + x) * 4;
                data[i..i + 4].copy_from_slice(&[v, v, v, 255]);
            }
        }
        data
    }

    fn params() -> DetectionParams {
        DetectionParams {
            r_min: 20,
            r_max: 45,
            edge_thresh: 200,
            acc_thresh: 10.0,
            proc_width: 160,
        }
    }

    #[test]
    fn finds_disk_and_exposes_edge_map() {
        let data = disk_frame(160, 120, 80.0, 60.0, 30.0);
        let frame = RgbaFrameView::new(160, 120, &data).unwrap();
        let mut detector = CircleDetector::new();
        let mut state = TrackerState::new();

        let out = detector.process(&frame, &params(), &mut state);
        let raw = out.raw.expect("raw detection");
        assert!((raw.x - 80.0).abs() <= 2.0);
        assert!((raw.y - 60.0).abs() <= 2.0);
        assert!((raw.r - 30.0).abs() <= 1.0);
        assert_eq!(out.smoothed, Some(raw));
        assert!(out.edge_points > 0);

        let mag = detector.edge_magnitude().expect("edge map");
        assert_eq!((mag.width, mag.height), (160, 120));
        assert!(mag.data.iter().any(|&v| v >= 200));
    }

    #[test]
    fn reuses_accumulator_between_frames() {
        let data = disk_frame(160, 120, 80.0, 60.0, 30.0);
        let frame = RgbaFrameView::new(160, 120, &data).unwrap();
        let mut detector = CircleDetector::new();
        let mut state = TrackerState::new();

        detector.detect(&frame, &params(), &mut state);
        let bytes = detector.workspace().accumulator().capacity_bytes();
        assert!(bytes > 0);
        detector.detect(&frame, &params(), &mut state);
        assert_eq!(detector.workspace().accumulator().capacity_bytes(), bytes);
        assert!(detector.workspace().footprint_bytes() > bytes);

        detector.workspace_mut().release_accumulator();
        assert_eq!(detector.workspace().accumulator().capacity_bytes(), 0);
        // Scratch release does not touch tracking: the next frame still detects.
        assert!(detector.detect(&frame, &params(), &mut state).is_some());
    }

    #[test]
    fn degenerate_radius_range_returns_none() {
        let data = disk_frame(160, 120, 80.0, 60.0, 30.0);
        let frame = RgbaFrameView::new(160, 120, &data).unwrap();
        let mut state = TrackerState::new();
        let p = DetectionParams {
            r_min: 40,
            r_max: 40,
            ..params()
        };
        assert!(detect(&frame, &p, &mut state).is_none());
        let p = DetectionParams {
            r_min: 0,
            r_max: 0,
            ..params()
        };
        assert!(detect(&frame, &p, &mut state).is_none());
    }

    #[test]
    fn zero_edge_threshold_does_not_panic() {
        let data = disk_frame(64, 48, 32.0, 24.0, 10.0);
        let frame = RgbaFrameView::new(64, 48, &data).unwrap();
        let mut state = TrackerState::new();
        let p = DetectionParams {
            r_min: 5,
            r_max: 15,
            edge_thresh: 0,
            acc_thresh: 5.0,
            proc_width: 64,
        };
        if let Some(c) = detect(&frame, &p, &mut state) {
            assert!(c.x.is_finite() && c.y.is_finite());
            assert!(c.score <= 1.0);
        }
    }

    #[test]
    fn empty_frame_returns_none() {
        let frame = RgbaFrameView::new(0, 0, &[]).unwrap();
        let mut state = TrackerState::new();
        assert!(detect(&frame, &DetectionParams::default(), &mut state).is_none());
    }
}
