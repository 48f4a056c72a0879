use criterion::{black_box, criterion_group, criterion_main, Criterion};

use circle_tracker_hough::{
    collect_edge_points, rgba_to_gray, smooth_3x3, sobel_edges, Accumulator, CircleDetector,
    DetectionParams, RgbaFrameView, TrackerState,
};

fn make_disk_fixture(w: usize, h: usize, r: f32) -> Vec<u8> {
    let (cx, cy) = (w as f32 * 0.55, h as f32 * 0.45);
    let mut data = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let d2 = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2);
            // Faint texture so the background still produces some edges.
            let bg = 40 + ((x * 7 + y * 13) % 23) as u8;
            let v = if d2 <= r * r { 210 } else { bg };
            data[(y * w + x) * 4..(y * w + x) * 4 + 4].copy_from_slice(&[v, v, v, 255]);
        }
    }
    data
}

fn bench_full_frame(c: &mut Criterion) {
    let data = make_disk_fixture(320, 240, 48.0);
    let frame = RgbaFrameView::new(320, 240, &data).expect("frame");
    let params = DetectionParams::default();
    let mut detector = CircleDetector::new();
    let mut state = TrackerState::new();

    c.bench_function("detect_320x240_defaults", |b| {
        b.iter(|| {
            let out = detector.detect(black_box(&frame), black_box(&params), &mut state);
            black_box(out)
        })
    });
}

fn bench_voting(c: &mut Criterion) {
    let data = make_disk_fixture(320, 240, 48.0);
    let frame = RgbaFrameView::new(320, 240, &data).expect("frame");
    let params = DetectionParams::default();
    let gray = rgba_to_gray(&frame);
    let edges = sobel_edges(&smooth_3x3(&gray.view()).view());
    let points = collect_edge_points(&edges, params.edge_thresh);
    let mut acc = Accumulator::default();

    c.bench_function("vote_320x240_defaults", |b| {
        b.iter(|| {
            acc.reset(params.radius_range(), 320, 240);
            acc.cast_votes(black_box(&points));
            black_box(acc.total_votes())
        })
    });
}

criterion_group!(benches, bench_full_frame, bench_voting);
criterion_main!(benches);
