//! Core types for real-time circle tracking.
//!
//! This crate is intentionally small. It holds the pixel buffer views the
//! detector consumes, the `Circle` value it produces, and the logger used by
//! the binaries. It does *not* depend on any concrete image decoding crate.

mod circle;
mod image;
mod logger;

pub use circle::Circle;
pub use image::{FrameError, GrayImage, GrayImageView, RgbaFrameView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
