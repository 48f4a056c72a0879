use crate::core::{Circle, FrameError, RgbaFrameView};
use crate::hough::{CircleDetector, DetectionOutcome, DetectionParams, TrackerState};
use ::image::{imageops::FilterType, DynamicImage, GenericImageView, RgbaImage};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Image(#[from] ::image::ImageError),
}

/// Detection on a resized frame, with the result mapped back to the source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaledDetection {
    /// Raw and smoothed circles in processing coordinates.
    pub outcome: DetectionOutcome,
    pub proc_width: u32,
    pub proc_height: u32,
    /// Source pixels per processing pixel.
    pub scale: f32,
    /// Smoothed circle in source image coordinates.
    pub source: Option<Circle>,
}

/// Decode an image file from disk.
pub fn load_frame(path: impl AsRef<Path>) -> Result<DynamicImage, DetectError> {
    Ok(::image::open(path)?)
}

/// Processing size for a `src_w x src_h` source at `proc_width` columns.
pub fn proc_size(src_w: u32, src_h: u32, proc_width: u32) -> (u32, u32) {
    let params = DetectionParams {
        proc_width,
        ..DetectionParams::default()
    };
    (proc_width.max(1), params.proc_height(src_w, src_h))
}

/// Resize to `proc_width` columns, keeping the aspect ratio.
///
/// Images that already have the requested width are only converted to RGBA.
pub fn resize_to_proc_width(img: &DynamicImage, proc_width: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (pw, ph) = proc_size(w, h, proc_width);
    if w == 0 || h == 0 || (w == pw && h == ph) {
        return img.to_rgba8();
    }
    img.resize_exact(pw, ph, FilterType::Triangle).to_rgba8()
}

/// Borrow an `image::RgbaImage` as the detector's frame view.
pub fn frame_view(img: &RgbaImage) -> RgbaFrameView<'_> {
    let len = img.width() as usize * img.height() as usize * 4;
    RgbaFrameView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: &img.as_raw()[..len],
    }
}

/// Build an `image::RgbaImage` from a raw interleaved RGBA buffer.
pub fn rgba_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<RgbaImage, DetectError> {
    RgbaFrameView::new(width as usize, height as usize, pixels)?;
    RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or(DetectError::Frame(
        FrameError::Dimensions {
            width: width as usize,
            height: height as usize,
        },
    ))
}

/// Run the detector on a raw RGBA buffer already at processing resolution.
pub fn detect_from_rgba_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: &DetectionParams,
    state: &mut TrackerState,
) -> Result<Option<Circle>, DetectError> {
    let frame = RgbaFrameView::new(width as usize, height as usize, pixels)?;
    Ok(crate::hough::detect(&frame, params, state))
}

/// Resize, detect and map back, reusing `detector`'s scratch buffers.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(detector, img, params, state),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn detect_image_with(
    detector: &mut CircleDetector,
    img: &DynamicImage,
    params: &DetectionParams,
    state: &mut TrackerState,
) -> ScaledDetection {
    let small = resize_to_proc_width(img, params.proc_width);
    let outcome = detector.process(&frame_view(&small), params, state);

    let scale = if small.width() > 0 {
        img.width() as f32 / small.width() as f32
    } else {
        1.0
    };
    ScaledDetection {
        outcome,
        proc_width: small.width(),
        proc_height: small.height(),
        scale,
        source: outcome.smoothed.map(|c| c.scaled(scale)),
    }
}

/// Convenience overload with a fresh detector.
pub fn detect_image(
    img: &DynamicImage,
    params: &DetectionParams,
    state: &mut TrackerState,
) -> ScaledDetection {
    let mut detector = CircleDetector::new();
    detect_image_with(&mut detector, img, params, state)
}

/// Edge magnitude of the detector's last frame as an 8-bit image.
pub fn edge_magnitude_image(detector: &CircleDetector) -> Option<::image::GrayImage> {
    let view = detector.edge_magnitude()?;
    ::image::GrayImage::from_raw(view.width as u32, view.height as u32, view.data.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::Rgba;

    fn disk_image(w: u32, h: u32, cx: f32, cy: f32, r: f32) -> DynamicImage {
        let img = RgbaImage::from_fn(w, h, |x, y| {
            let d2 = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2);
            let v = if d2 <= r * r { 220 } else { 30 };
            Rgba([v, v, v, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    fn params(proc_width: u32) -> DetectionParams {
        DetectionParams {
            r_min: 20,
            r_max: 45,
            edge_thresh: 100,
            acc_thresh: 10.0,
            proc_width,
        }
    }

    #[test]
    fn resize_keeps_aspect_ratio() {
        let img = DynamicImage::new_rgba8(1280, 720);
        let small = resize_to_proc_width(&img, 320);
        assert_eq!(small.dimensions(), (320, 180));
    }

    #[test]
    fn same_width_is_not_resampled() {
        let img = disk_image(160, 120, 80.0, 60.0, 30.0);
        let small = resize_to_proc_width(&img, 160);
        assert_eq!(small.as_raw(), img.to_rgba8().as_raw());
    }

    #[test]
    fn frame_view_matches_image() {
        let img = RgbaImage::new(7, 5);
        let view = frame_view(&img);
        assert_eq!((view.width, view.height), (7, 5));
        assert_eq!(view.data.len(), 7 * 5 * 4);
    }

    #[test]
    fn detects_at_processing_width_and_maps_back() {
        let img = disk_image(320, 240, 160.0, 120.0, 60.0);
        let mut state = TrackerState::new();
        let found = detect_image(&img, &params(160), &mut state);

        assert_eq!((found.proc_width, found.proc_height), (160, 120));
        assert!((found.scale - 2.0).abs() < 1e-6);
        let small = found.outcome.smoothed.expect("proc circle");
        let src = found.source.expect("source circle");
        assert!((small.x - 80.0).abs() <= 2.0, "x = {}", small.x);
        assert!((src.x - 2.0 * small.x).abs() < 1e-4);
        assert!((src.r - 2.0 * small.r).abs() < 1e-4);
    }

    #[test]
    fn edge_image_has_processing_size() {
        let img = disk_image(160, 120, 80.0, 60.0, 30.0);
        let mut detector = CircleDetector::new();
        assert!(edge_magnitude_image(&detector).is_none());

        let mut state = TrackerState::new();
        detect_image_with(&mut detector, &img, &params(160), &mut state);
        let edges = edge_magnitude_image(&detector).expect("edges");
        assert_eq!(edges.dimensions(), (160, 120));
        assert!(edges.pixels().any(|p| p.0[0] > 100));
    }

    #[test]
    fn raw_buffer_length_is_checked() {
        let mut state = TrackerState::new();
        let err = detect_from_rgba_u8(4, 4, &[0u8; 10], &params(4), &mut state).unwrap_err();
        assert!(matches!(
            err,
            DetectError::Frame(FrameError::BufferLength {
                expected: 64,
                got: 10
            })
        ));
        assert!(rgba_image_from_slice(2, 2, &[0u8; 16]).is_ok());
        assert!(rgba_image_from_slice(2, 2, &[0u8; 15]).is_err());
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let err = load_frame("/nonexistent/frame.png").unwrap_err();
        assert!(matches!(err, DetectError::Image(_)));
    }
}
