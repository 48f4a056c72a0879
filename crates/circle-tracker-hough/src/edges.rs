//! Sobel gradients and edge magnitude.

use circle_tracker_core::GrayImageView;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Per-pixel gradient field of one frame.
///
/// Border pixels (first/last row and column) always hold zero gradient and
/// zero magnitude.
#[derive(Clone, Debug, Default)]
pub struct EdgeMap {
    pub width: usize,
    pub height: usize,
    /// `min(255, round(sqrt(gx^2 + gy^2)))`.
    pub magnitude: Vec<u8>,
    pub gx: Vec<f32>,
    pub gy: Vec<f32>,
}

impl EdgeMap {
    fn reset(&mut self, width: usize, height: usize) {
        let n = width * height;
        self.width = width;
        self.height = height;
        self.magnitude.clear();
        self.magnitude.resize(n, 0);
        self.gx.clear();
        self.gx.resize(n, 0.0);
        self.gy.clear();
        self.gy.resize(n, 0.0);
    }

    /// Edge magnitude as a grayscale view, for debug visualization.
    pub fn magnitude_view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.magnitude,
        }
    }

    #[inline]
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x + 1 < self.width && y + 1 < self.height
    }
}

pub fn sobel_edges(src: &GrayImageView<'_>) -> EdgeMap {
    let mut out = EdgeMap::default();
    sobel_edges_into(src, &mut out);
    out
}

/// 3x3 Sobel on interior pixels.
///
/// `gx` is the correlation with `[-1 0 1; -2 0 2; -1 0 1]`. `gy` is the
/// convolution with `[1 2 1; 0 0 0; -1 -2 -1]`, so it grows with the row
/// index and `(gx, gy)` points toward brighter pixels in image coordinates.
/// Hough voting relies on that orientation. Components are kept unquantized.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(src, out), fields(w = src.width, h = src.height))
)]
pub fn sobel_edges_into(src: &GrayImageView<'_>, out: &mut EdgeMap) {
    let w = src.width;
    let h = src.height;
    out.reset(w, h);
    if w < 3 || h < 3 {
        return;
    }

    let px = |x: usize, y: usize| src.data[y * w + x] as i32;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let tl = px(x - 1, y - 1);
            let tc = px(x, y - 1);
            let tr = px(x + 1, y - 1);
            let ml = px(x - 1, y);
            let mr = px(x + 1, y);
            let bl = px(x - 1, y + 1);
            let bc = px(x, y + 1);
            let br = px(x + 1, y + 1);

            let gx = (tr + 2 * mr + br) - (tl + 2 * ml + bl);
            let gy = (bl + 2 * bc + br) - (tl + 2 * tc + tr);

            let idx = y * w + x;
            let (gx, gy) = (gx as f32, gy as f32);
            out.gx[idx] = gx;
            out.gy[idx] = gy;
            out.magnitude[idx] = (gx * gx + gy * gy).sqrt().round().min(255.0) as u8;
        }
    }
}
