//! Gradient-directed Hough voting.
//!
//! Each edge pixel votes, per radius bucket, for the two candidate centers
//! located `r` pixels away along its gradient normal. This keeps the work at
//! `O(edge_points * radii)` instead of sweeping a full circle per pixel.

use crate::edges::EdgeMap;
use crate::radius::RadiusRange;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Interior pixel whose edge magnitude passed the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePoint {
    pub x: u32,
    pub y: u32,
    /// Unit gradient direction.
    pub dx: f32,
    pub dy: f32,
}

pub fn collect_edge_points(edges: &EdgeMap, edge_thresh: u8) -> Vec<EdgePoint> {
    let mut out = Vec::new();
    collect_edge_points_into(edges, edge_thresh, &mut out);
    out
}

/// Gather interior pixels with `magnitude >= edge_thresh`.
///
/// Pixels with a zero gradient vector have no direction and are skipped;
/// they can only reach this point when `edge_thresh == 0`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(edges, out), fields(w = edges.width, h = edges.height))
)]
pub fn collect_edge_points_into(edges: &EdgeMap, edge_thresh: u8, out: &mut Vec<EdgePoint>) {
    out.clear();
    let w = edges.width;
    let h = edges.height;
    if w < 3 || h < 3 {
        return;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            if edges.magnitude[idx] < edge_thresh {
                continue;
            }
            let gx = edges.gx[idx];
            let gy = edges.gy[idx];
            let norm = (gx * gx + gy * gy).sqrt();
            if norm <= 0.0 || !norm.is_finite() {
                continue;
            }
            out.push(EdgePoint {
                x: x as u32,
                y: y as u32,
                dx: gx / norm,
                dy: gy / norm,
            });
        }
    }
}

/// Dense vote counts indexed by `(radius bucket, y, x)`.
///
/// One plane of `width * height` saturating counters per radius bucket,
/// stored contiguously. The buffer is kept across [`Accumulator::reset`]
/// calls so a long-lived accumulator only allocates when the frame or the
/// radius range grows.
#[derive(Clone, Debug, Default)]
pub struct Accumulator {
    range: Option<RadiusRange>,
    width: usize,
    height: usize,
    votes: Vec<u16>,
}

impl Accumulator {
    pub fn new(range: RadiusRange, width: usize, height: usize) -> Self {
        let mut acc = Self::default();
        acc.reset(range, width, height);
        acc
    }

    /// Zero all counters and resize for a new frame.
    pub fn reset(&mut self, range: RadiusRange, width: usize, height: usize) {
        self.range = Some(range);
        self.width = width;
        self.height = height;
        self.votes.clear();
        self.votes.resize(range.len() * width * height, 0);
    }

    /// Drop the backing buffer.
    pub fn release(&mut self) {
        self.votes = Vec::new();
        self.range = None;
    }

    pub fn range(&self) -> RadiusRange {
        self.range.unwrap_or_else(|| RadiusRange::new(1, 0))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn plane_len(&self) -> usize {
        self.width * self.height
    }

    /// Bytes currently reserved for vote counters.
    pub fn capacity_bytes(&self) -> usize {
        self.votes.capacity() * std::mem::size_of::<u16>()
    }

    /// Vote plane of radius bucket `ri`, row-major.
    pub fn plane(&self, ri: usize) -> &[u16] {
        let n = self.plane_len();
        &self.votes[ri * n..(ri + 1) * n]
    }

    #[inline]
    pub fn votes(&self, ri: usize, x: usize, y: usize) -> u16 {
        self.votes[ri * self.plane_len() + y * self.width + x]
    }

    /// Add one vote to a cell. Counters saturate instead of wrapping.
    #[inline]
    pub fn add_vote(&mut self, ri: usize, x: usize, y: usize) {
        let idx = ri * self.plane_len() + y * self.width + x;
        self.votes[idx] = self.votes[idx].saturating_add(1);
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.iter().map(|&v| v as u64).sum()
    }

    /// Cast two votes per edge point and radius bucket.
    ///
    /// Candidate centers are rounded to the nearest pixel; those outside the
    /// frame are dropped.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, points),
            fields(points = points.len(), radii = self.range().len())
        )
    )]
    pub fn cast_votes(&mut self, points: &[EdgePoint]) {
        let plane = self.plane_len();
        let range = self.range();
        if plane == 0 || range.is_empty() || points.is_empty() {
            return;
        }
        let (w, h) = (self.width, self.height);

        #[cfg(feature = "rayon")]
        self.votes
            .par_chunks_mut(plane)
            .enumerate()
            .for_each(|(ri, slice)| vote_plane(slice, range.radius(ri) as f32, points, w, h));

        #[cfg(not(feature = "rayon"))]
        for (ri, slice) in self.votes.chunks_mut(plane).enumerate() {
            vote_plane(slice, range.radius(ri) as f32, points, w, h);
        }
    }
}

fn vote_plane(plane: &mut [u16], r: f32, points: &[EdgePoint], w: usize, h: usize) {
    let (wf, hf) = (w as f32, h as f32);
    for p in points {
        let (px, py) = (p.x as f32, p.y as f32);
        for sign in [-1.0f32, 1.0] {
            let cx = (px + sign * r * p.dx + 0.5).floor();
            let cy = (py + sign * r * p.dy + 0.5).floor();
            if cx < 0.0 || cy < 0.0 || cx >= wf || cy >= hf {
                continue;
            }
            let idx = cy as usize * w + cx as usize;
            plane[idx] = plane[idx].saturating_add(1);
        }
    }
}
