//! circle-tracker CLI: track one circle through a sequence of image files.

use circle_tracker::detect::{detect_image_with, edge_magnitude_image, load_frame};
use circle_tracker::hough::{
    CircleDetector, DetectionParams, FrameReport, TrackConfig, TrackReport, TrackerState,
};
use clap::{ArgAction, Parser};
use log::{info, warn, LevelFilter};
use std::path::{Path, PathBuf};
use std::time::Instant;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "circle-tracker")]
#[command(about = "Track a single circle through consecutive video frames (Sobel + Hough)")]
#[command(version)]
struct Cli {
    /// Frame images, processed in order as one tracking session.
    frames: Vec<PathBuf>,

    /// JSON config with `frames`, `params`, `report_path`, `edges_dir`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Smallest candidate radius in processing pixels.
    #[arg(long)]
    r_min: Option<u32>,

    /// Largest candidate radius in processing pixels.
    #[arg(long)]
    r_max: Option<u32>,

    /// Minimum edge magnitude (0-255) for a pixel to vote.
    #[arg(long)]
    edge_thresh: Option<u8>,

    /// Minimum peak score in percent of the circumference.
    #[arg(long)]
    acc_thresh: Option<f32>,

    /// Width frames are resized to before detection.
    #[arg(long)]
    proc_width: Option<u32>,

    /// Write a JSON report of every frame.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Save each frame's edge magnitude as a PNG in this directory.
    #[arg(long)]
    edges_dir: Option<PathBuf>,

    /// Write the effective configuration (config file plus overrides) as JSON.
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve(&self) -> CliResult<TrackConfig> {
        let mut cfg = match &self.config {
            Some(path) => TrackConfig::load_json(path)
                .map_err(|e| -> CliError { format!("{}: {e}", path.display()).into() })?,
            None => TrackConfig::default(),
        };
        if !self.frames.is_empty() {
            cfg.frames = self
                .frames
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
        }
        apply_overrides(&mut cfg.params, self);
        if let Some(path) = &self.report {
            cfg.report_path = Some(path.to_string_lossy().into_owned());
        }
        if let Some(dir) = &self.edges_dir {
            cfg.edges_dir = Some(dir.to_string_lossy().into_owned());
        }
        if cfg.frames.is_empty() {
            return Err("no input frames (pass paths or a --config with `frames`)".into());
        }
        Ok(cfg)
    }
}

fn apply_overrides(params: &mut DetectionParams, cli: &Cli) {
    if let Some(v) = cli.r_min {
        params.r_min = v;
    }
    if let Some(v) = cli.r_max {
        params.r_max = v;
    }
    if let Some(v) = cli.edge_thresh {
        params.edge_thresh = v;
    }
    if let Some(v) = cli.acc_thresh {
        params.acc_thresh = v;
    }
    if let Some(v) = cli.proc_width {
        params.proc_width = v;
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    let level = log_level(verbose);

    #[cfg(feature = "tracing")]
    circle_tracker::core::init_tracing(false, level);

    #[cfg(not(feature = "tracing"))]
    {
        let _ = circle_tracker::core::init_with_level(level);
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = cli.resolve()?;
    if let Some(path) = &cli.save_config {
        cfg.write_json(path)?;
        info!("config written to {}", path.display());
    }
    run(&cfg)
}

fn run(cfg: &TrackConfig) -> CliResult<()> {
    let params = cfg.params.sanitized();
    if params != cfg.params {
        warn!(
            "detection parameters clamped: {:?} -> {:?}",
            cfg.params, params
        );
    }
    info!(
        "tracking {} frames, radius {}..{}, edge >= {}, score >= {}%, width {}",
        cfg.frames.len(),
        params.r_min,
        params.r_max,
        params.edge_thresh,
        params.acc_thresh,
        params.proc_width
    );

    let edges_dir = cfg.edges_dir();
    if let Some(dir) = &edges_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut detector = CircleDetector::new();
    let mut state = TrackerState::new();
    let mut report = TrackReport::new(params);

    for (index, path) in cfg.frames.iter().enumerate() {
        let started = Instant::now();
        let img = load_frame(path).map_err(|e| -> CliError { format!("{path}: {e}").into() })?;
        let found = detect_image_with(&mut detector, &img, &params, &mut state);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;

        match found.source {
            Some(c) => {
                let (px, py, pr) = c.rounded();
                println!(
                    "{index}\t{path}\tcircle x={:.1} y={:.1} r={:.1} score={:.3} px={px},{py},{pr}",
                    c.x, c.y, c.r, c.score
                )
            }
            None => println!("{index}\t{path}\tnone"),
        }

        if let Some(dir) = &edges_dir {
            save_edges(&detector, dir, index)?;
        }

        let mut frame = FrameReport::new(index, path.as_str(), &found.outcome);
        frame.proc_width = found.proc_width as usize;
        frame.proc_height = found.proc_height as usize;
        frame.smoothed_source = found.source;
        frame.elapsed_ms = elapsed_ms;
        report.push(frame);
    }

    info!(
        "circle found in {}/{} frames, {:.2} ms per frame",
        report.detected_frames(),
        report.frames.len(),
        report.mean_elapsed_ms()
    );

    if let Some(path) = cfg.report_path() {
        report.write_json(&path)?;
        info!("report written to {}", path.display());
    }
    Ok(())
}

fn save_edges(detector: &CircleDetector, dir: &Path, index: usize) -> CliResult<()> {
    match edge_magnitude_image(detector) {
        Some(edges) => edges.save(dir.join(format!("edges_{index:04}.png")))?,
        None => warn!("frame {index}: no edge map to save"),
    }
    Ok(())
}
