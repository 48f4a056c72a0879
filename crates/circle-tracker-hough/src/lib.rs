//! Gradient-directed Hough circle detector for live video frames.
//!
//! ## Quickstart
//!
//! ```
//! use circle_tracker_core::RgbaFrameView;
//! use circle_tracker_hough::{detect, DetectionParams, TrackerState};
//!
//! let (w, h) = (64usize, 48usize);
//! let pixels = vec![0u8; w * h * 4];
//! let frame = RgbaFrameView::new(w, h, &pixels).expect("frame");
//!
//! let params = DetectionParams::default();
//! let mut state = TrackerState::new();
//! let circle = detect(&frame, &params, &mut state);
//! assert!(circle.is_none());
//! ```
//!
//! Per-frame pipeline:
//! 1. Reduce RGBA to 8-bit luminance with fixed-point ITU-like weights.
//! 2. Blur with a 3x3 binomial kernel; border pixels are copied untouched.
//! 3. Sobel gradients on interior pixels; magnitude saturates at 255.
//! 4. Every interior pixel above `edge_thresh` votes, for each radius bucket,
//!    at the two points `r` pixels away along its gradient direction.
//! 5. Votes are normalized by `ceil(2*pi*r)`; the best cell above
//!    `acc_thresh` percent wins, earliest in scan order on ties.
//! 6. The raw circle is exponentially smoothed across frames; a frame
//!    without detection resets the smoothing.
//!
//! The only state carried between frames is [`TrackerState`]. A
//! [`CircleDetector`] additionally keeps scratch buffers so that repeated
//! calls do not reallocate the accumulator.
//!
//! ## Features
//! - `rayon` – casts votes for all radius buckets in parallel. Results are
//!   identical to the sequential path.
//! - `tracing` – wraps the stage functions in `tracing` spans.

mod accumulator;
mod detector;
mod edges;
mod grayscale;
mod io;
mod peak;
mod radius;
mod smooth;
mod tracker;
mod workspace;

pub use accumulator::{collect_edge_points, collect_edge_points_into, Accumulator, EdgePoint};
pub use detector::{detect, CircleDetector, DetectionOutcome, DetectionParams};
pub use edges::{sobel_edges, sobel_edges_into, EdgeMap};
pub use grayscale::{luma, rgba_to_gray, rgba_to_gray_into};
pub use io::{FrameReport, HoughIoError, TrackConfig, TrackReport};
pub use peak::select_peak;
pub use radius::RadiusRange;
pub use smooth::{smooth_3x3, smooth_3x3_into, BLUR_KERNEL};
pub use tracker::{TrackerState, SMOOTHING_ALPHA};
pub use workspace::HoughWorkspace;

pub use circle_tracker_core::{Circle, GrayImage, GrayImageView, RgbaFrameView};
