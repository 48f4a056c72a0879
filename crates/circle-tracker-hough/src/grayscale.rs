//! RGBA to luminance reduction.

use circle_tracker_core::{GrayImage, RgbaFrameView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Fixed-point luma: `(77 R + 150 G + 29 B) >> 8`. Alpha is ignored.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 77 + g as u32 * 150 + b as u32 * 29) >> 8) as u8
}

pub fn rgba_to_gray(frame: &RgbaFrameView<'_>) -> GrayImage {
    let mut out = GrayImage::default();
    rgba_to_gray_into(frame, &mut out);
    out
}

/// Same as [`rgba_to_gray`], writing into a reusable buffer.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(frame, out), fields(w = frame.width, h = frame.height))
)]
pub fn rgba_to_gray_into(frame: &RgbaFrameView<'_>, out: &mut GrayImage) {
    out.reset(frame.width, frame.height);
    for (dst, px) in out.data.iter_mut().zip(frame.data.chunks_exact(4)) {
        *dst = luma(px[0], px[1], px[2]);
    }
}
