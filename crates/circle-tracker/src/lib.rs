//! High-level facade for the `circle-tracker-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core types and the Hough detector
//! - (feature-gated) helpers that take a decoded `image::DynamicImage`, scale
//!   it to the processing width, run the detector and map the result back to
//!   source pixels
//! - the `circle-tracker` command line tool (feature `cli`)
//!
//! ## Quickstart
//!
//! ```no_run
//! use circle_tracker::detect::detect_image;
//! use circle_tracker::hough::{DetectionParams, TrackerState};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("frame.png")?;
//! let params = DetectionParams::default();
//! let mut state = TrackerState::new();
//!
//! let found = detect_image(&img, &params, &mut state);
//! match found.source {
//!     Some(c) => println!("circle at ({:.1}, {:.1}) r={:.1}", c.x, c.y, c.r),
//!     None => println!("no circle"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `circle_tracker::core`: frame views, gray images, `Circle`, logger.
//! - `circle_tracker::hough`: pipeline stages, `CircleDetector`, tracker state,
//!   JSON config and reports.
//! - `circle_tracker::detect` (feature `image`): end-to-end helpers from
//!   `image::DynamicImage`.

pub use circle_tracker_core as core;
pub use circle_tracker_hough as hough;

pub use circle_tracker_core::{Circle, RgbaFrameView};
pub use circle_tracker_hough::{CircleDetector, DetectionOutcome, DetectionParams, TrackerState};

#[cfg(feature = "image")]
pub mod detect;
