//! The `survey` subcommand: a full simulated measurement campaign.
//!
//! Sweeps a receiver over every grid cell (optionally in shuffled order),
//! draws a simulated RSSI reading per stop, feeds the estimator, and
//! refreshes the dense field on a fixed cadence. Each refresh produces a
//! heatmap frame and a peak-to-transmitter distance sample; the run ends
//! with a looping GIF, a convergence plot, and a JSON summary.

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use spectrum_map::{
    euclidean_distance, EstimatorConfig, InterpolationMethod, PeakEstimate, SpectrumMapEstimator,
    UpdateStatus,
};
use std::fs;
use std::path::PathBuf;

use crate::propagation::PathLossModel;
use crate::render;

/// Arguments for the `survey` subcommand
#[derive(Args, Debug)]
pub struct SurveyArgs {
    /// Interpolation method: kriging, nearest, idw, linear, or spline
    #[arg(long, default_value = "nearest")]
    pub method: String,

    /// Visit the grid cells in shuffled order instead of row-major
    #[arg(long)]
    pub shuffle: bool,

    /// RNG seed for the shuffle and the noise term
    #[arg(long, default_value_t = 7)]
    pub seed: u64,

    /// Transmitter x position (ground truth for the convergence plot)
    #[arg(long, default_value_t = 20.0)]
    pub tx_x: f64,

    /// Transmitter y position
    #[arg(long, default_value_t = 40.0)]
    pub tx_y: f64,

    /// Lower x bound of the survey area
    #[arg(long, default_value_t = -50.0)]
    pub x_min: f64,

    /// Upper x bound of the survey area
    #[arg(long, default_value_t = 50.0)]
    pub x_max: f64,

    /// Lower y bound of the survey area
    #[arg(long, default_value_t = -50.0)]
    pub y_min: f64,

    /// Upper y bound of the survey area
    #[arg(long, default_value_t = 50.0)]
    pub y_max: f64,

    /// Cell count along x
    #[arg(long, default_value_t = 25)]
    pub cells_x: usize,

    /// Cell count along y
    #[arg(long, default_value_t = 25)]
    pub cells_y: usize,

    /// Half-width of the uniform measurement noise (dB)
    #[arg(long, default_value_t = 0.0)]
    pub noise_db: f64,

    /// Refresh the dense field every N measurements
    #[arg(long, default_value_t = 3)]
    pub refresh_every: usize,

    /// Per-frame GIF delay (milliseconds)
    #[arg(long, default_value_t = 150)]
    pub gif_delay_ms: u32,

    /// Pixels per grid cell in rendered frames
    #[arg(long, default_value_t = 8)]
    pub cell_scale: u32,

    /// Output directory for frames, GIF, plot, and summary
    #[arg(long, default_value = "output/survey")]
    pub out: PathBuf,

    /// Estimator configuration as a JSON file; overrides the bounds,
    /// cell-count, and method flags
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run summary written alongside the rendered artifacts.
#[derive(Debug, Serialize)]
struct SurveySummary {
    method: String,
    transmitter: (f64, f64),
    measurements: usize,
    refreshes: usize,
    degenerate_refreshes: usize,
    final_peak: Option<PeakEstimate>,
    final_distance: Option<f64>,
    distances: Vec<f64>,
}

/// Resolves the estimator configuration from a JSON file or the flags.
fn resolve_config(args: &SurveyArgs) -> Result<EstimatorConfig> {
    if let Some(path) = &args.config {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: EstimatorConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        return Ok(config);
    }
    let method: InterpolationMethod = args
        .method
        .parse()
        .with_context(|| format!("unrecognized method {:?}", args.method))?;
    Ok(EstimatorConfig::builder()
        .x_bounds(args.x_min, args.x_max)
        .y_bounds(args.y_min, args.y_max)
        .cells(args.cells_x, args.cells_y)
        .method(method)
        .build())
}

/// Executes a survey run end to end.
pub fn execute(args: SurveyArgs) -> Result<()> {
    if args.refresh_every == 0 {
        bail!("--refresh-every must be at least 1");
    }

    let config = resolve_config(&args)?;
    let mut estimator = SpectrumMapEstimator::new(config)?;
    let transmitter = (args.tx_x, args.tx_y);

    let frames_dir = args.out.join("frames");
    fs::create_dir_all(&frames_dir)
        .with_context(|| format!("failed to create {}", frames_dir.display()))?;

    let (cells_x, cells_y) = estimator.grid().shape();
    let mut positions: Vec<(f64, f64)> = Vec::with_capacity(cells_x * cells_y);
    for ix in 0..cells_x {
        for iy in 0..cells_y {
            positions.push(estimator.grid().cell_position((ix, iy)));
        }
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    if args.shuffle {
        positions.shuffle(&mut rng);
    }

    let model = PathLossModel {
        noise_db: args.noise_db,
        ..Default::default()
    };

    tracing::info!(
        method = %estimator.method(),
        stops = positions.len(),
        shuffle = args.shuffle,
        tx_x = transmitter.0,
        tx_y = transmitter.1,
        "starting survey"
    );

    let mut frames = Vec::new();
    let mut distances = Vec::new();
    let mut degenerate_refreshes = 0;

    for (step, &position) in positions.iter().enumerate() {
        let rssi = model.rssi_at(transmitter, position, &mut rng);
        estimator.add_measurement(position, rssi)?;

        let is_last = step + 1 == positions.len();
        if (step + 1) % args.refresh_every != 0 && !is_last {
            continue;
        }

        match estimator.update_full_estimate() {
            UpdateStatus::Updated => {
                let frame = render::render_frame(
                    estimator.sparse_map(),
                    estimator.full_map(),
                    estimator.peak(),
                    args.cell_scale,
                );
                let path = frames_dir.join(format!("frame_{:04}.png", frames.len()));
                render::save_png(&frame, &path)?;
                frames.push(frame);

                if let Some(peak) = estimator.peak() {
                    let distance = euclidean_distance(peak.position, transmitter);
                    distances.push(distance);
                    tracing::info!(
                        step = step + 1,
                        peak_x = peak.position.0,
                        peak_y = peak.position.1,
                        distance,
                        "refresh"
                    );
                }
            }
            UpdateStatus::Degenerate => {
                degenerate_refreshes += 1;
            }
            UpdateStatus::InsufficientData => {}
        }
    }

    let refreshes = frames.len();
    if !frames.is_empty() {
        render::compose_gif(frames, &args.out.join("survey.gif"), args.gif_delay_ms)?;
    }
    render::plot_distances(&distances, &args.out.join("distance.png"))?;

    let summary = SurveySummary {
        method: estimator.method().token().to_string(),
        transmitter,
        measurements: estimator.measurements().len(),
        refreshes,
        degenerate_refreshes,
        final_peak: estimator.peak().copied(),
        final_distance: distances.last().copied(),
        distances,
    };
    let summary_path = args.out.join("summary.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    tracing::info!(
        measurements = summary.measurements,
        refreshes = summary.refreshes,
        final_distance = ?summary.final_distance,
        out = %args.out.display(),
        "survey complete"
    );
    Ok(())
}
