//! 3x3 binomial blur applied before edge detection.

use circle_tracker_core::{GrayImage, GrayImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Blur kernel, normalized by 16 (`>> 4`).
pub const BLUR_KERNEL: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];

pub fn smooth_3x3(src: &GrayImageView<'_>) -> GrayImage {
    let mut out = GrayImage::default();
    smooth_3x3_into(src, &mut out);
    out
}

/// Blur `src` into `out`. The outermost rows and columns keep their input
/// values; the kernel is only applied where the full neighborhood exists.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(src, out), fields(w = src.width, h = src.height))
)]
pub fn smooth_3x3_into(src: &GrayImageView<'_>, out: &mut GrayImage) {
    let w = src.width;
    let h = src.height;
    out.reset(w, h);
    out.data.copy_from_slice(src.data);
    if w < 3 || h < 3 {
        return;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut sum = 0u32;
            for (ky, row) in BLUR_KERNEL.iter().enumerate() {
                let base = (y + ky - 1) * w + x - 1;
                let px = &src.data[base..base + 3];
                sum += row[0] * px[0] as u32 + row[1] * px[1] as u32 + row[2] * px[2] as u32;
            }
            out.data[y * w + x] = (sum >> 4) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(w: usize, h: usize, data: &[u8]) -> GrayImageView<'_> {
        GrayImageView {
            width: w,
            height: h,
            data,
        }
    }

    #[test]
    fn uniform_image_is_unchanged() {
        let data = vec![123u8; 5 * 4];
        let out = smooth_3x3(&view(5, 4, &data));
        assert!(out.data.iter().all(|&v| v == 123));
    }

    #[test]
    fn impulse_spreads_with_kernel_weights() {
        let mut data = vec![0u8; 5 * 5];
        data[2 * 5 + 2] = 160;
        let out = smooth_3x3(&view(5, 5, &data));
        assert_eq!(out.at(2, 2), 40);
        assert_eq!(out.at(1, 2), 20);
        assert_eq!(out.at(2, 3), 20);
        assert_eq!(out.at(1, 1), 10);
        assert_eq!(out.at(3, 3), 10);
    }

    #[test]
    fn border_keeps_input_values() {
        let mut data = vec![0u8; 4 * 4];
        data[0] = 200;
        data[1] = 100;
        data[4 * 4 - 1] = 50;
        let out = smooth_3x3(&view(4, 4, &data));
        assert_eq!(out.at(0, 0), 200);
        assert_eq!(out.at(1, 0), 100);
        assert_eq!(out.at(3, 3), 50);
        // Interior neighbor of the corner impulse gets blurred.
        assert_eq!(out.at(1, 1), ((200 + 2 * 100) >> 4) as u8);
    }

    #[test]
    fn tiny_images_are_copied() {
        let data = [1u8, 2, 3, 4];
        let out = smooth_3x3(&view(2, 2, &data));
        assert_eq!(out.data, data);
    }
}
