//! JSON configuration and report helpers for frame-sequence runs.

use crate::detector::{DetectionOutcome, DetectionParams};
use circle_tracker_core::Circle;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum HoughIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration for tracking a circle through a sequence of frame files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Frame image paths, in playback order.
    #[serde(default)]
    pub frames: Vec<String>,
    #[serde(default)]
    pub params: DetectionParams,
    #[serde(default)]
    pub report_path: Option<String>,
    /// Directory for per-frame edge magnitude images.
    #[serde(default)]
    pub edges_dir: Option<String>,
}

impl TrackConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, HoughIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), HoughIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn report_path(&self) -> Option<PathBuf> {
        self.report_path.as_ref().map(PathBuf::from)
    }

    pub fn edges_dir(&self) -> Option<PathBuf> {
        self.edges_dir.as_ref().map(PathBuf::from)
    }
}

/// Detection result for one frame of a sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    pub index: usize,
    pub path: String,
    pub proc_width: usize,
    pub proc_height: usize,
    #[serde(default)]
    pub raw: Option<Circle>,
    #[serde(default)]
    pub smoothed: Option<Circle>,
    /// Smoothed circle in source image pixels.
    #[serde(default)]
    pub smoothed_source: Option<Circle>,
    pub edge_points: usize,
    pub elapsed_ms: f64,
}

impl FrameReport {
    pub fn new(index: usize, path: impl Into<String>, outcome: &DetectionOutcome) -> Self {
        Self {
            index,
            path: path.into(),
            proc_width: 0,
            proc_height: 0,
            raw: outcome.raw,
            smoothed: outcome.smoothed,
            smoothed_source: None,
            edge_points: outcome.edge_points,
            elapsed_ms: 0.0,
        }
    }
}

/// Report for a whole sequence run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackReport {
    pub params: DetectionParams,
    pub frames: Vec<FrameReport>,
}

impl TrackReport {
    pub fn new(params: DetectionParams) -> Self {
        Self {
            params,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: FrameReport) {
        self.frames.push(frame);
    }

    /// Number of frames with a smoothed detection.
    pub fn detected_frames(&self) -> usize {
        self.frames.iter().filter(|f| f.smoothed.is_some()).count()
    }

    /// Mean processing time per frame in milliseconds.
    pub fn mean_elapsed_ms(&self) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        self.frames.iter().map(|f| f.elapsed_ms).sum::<f64>() / self.frames.len() as f64
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, HoughIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), HoughIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
