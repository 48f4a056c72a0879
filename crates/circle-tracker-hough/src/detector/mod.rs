//! Per-frame detection pipeline.
//!
//! Wires grayscale reduction, blur, Sobel edges, Hough voting, peak
//! selection and temporal smoothing into a single call.

mod params;
mod pipeline;
mod result;

pub use params::DetectionParams;
pub use pipeline::{detect, CircleDetector};
pub use result::DetectionOutcome;
