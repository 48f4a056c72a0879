//! Reusable per-frame scratch buffers.
//!
//! The gray, blurred and gradient buffers and the Hough accumulator are
//! resized in place for each frame, so a detector running on a fixed
//! processing size stops allocating after the first frame. Nothing in here
//! carries detection state between frames.

use circle_tracker_core::GrayImage;

use crate::accumulator::{Accumulator, EdgePoint};
use crate::edges::EdgeMap;

#[derive(Clone, Debug, Default)]
pub struct HoughWorkspace {
    pub(crate) gray: GrayImage,
    pub(crate) smoothed: GrayImage,
    pub(crate) edges: EdgeMap,
    pub(crate) points: Vec<EdgePoint>,
    pub(crate) accumulator: Accumulator,
}

impl HoughWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edge map of the last processed frame.
    pub fn edges(&self) -> &EdgeMap {
        &self.edges
    }

    /// Edge points that voted in the last processed frame.
    pub fn edge_points(&self) -> &[EdgePoint] {
        &self.points
    }

    /// Accumulator of the last frame that reached the voting stage.
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Approximate bytes held by all scratch buffers.
    pub fn footprint_bytes(&self) -> usize {
        self.gray.data.capacity()
            + self.smoothed.data.capacity()
            + self.edges.magnitude.capacity()
            + (self.edges.gx.capacity() + self.edges.gy.capacity()) * std::mem::size_of::<f32>()
            + self.points.capacity() * std::mem::size_of::<EdgePoint>()
            + self.accumulator.capacity_bytes()
    }

    /// Free the accumulator, which dominates memory use.
    pub fn release_accumulator(&mut self) {
        self.accumulator.release();
    }
}
