//! growila - flag cosmic-ray hits in a single-channel FITS or TIFF image.

mod io;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use common::log_setup::setup_logging;
use growila::{Config, Pipeline, Stage, DEFAULT_PFA};
use strum::IntoEnumIterator;

#[derive(Debug, Parser)]
#[command(name = "growila")]
#[command(about = "Detect cosmic-ray hits in a single-channel image and write a binary mask")]
#[command(version)]
struct Cli {
    /// Input image (.fits/.fit/.fts or .tif/.tiff, single channel).
    input: PathBuf,

    /// Output mask (8-bit, 1 for flagged pixels); format follows the extension.
    output: PathBuf,

    /// Zero-based HDU of a FITS input, or page of a TIFF input.
    #[arg(long, default_value_t = 0, visible_alias = "page")]
    hdu: usize,

    /// Probability of false alarm, in (0, 1).
    #[arg(long, default_value_t = DEFAULT_PFA)]
    pfa: f64,

    /// Growing radius in pixels; 0 disables growing.
    #[arg(long, default_value_t = 0, conflicts_with = "dilate")]
    radius: usize,

    /// Grow detections by one pixel (same as --radius 1).
    #[arg(long)]
    dilate: bool,

    /// Log filter, overridden by RUST_LOG.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        let radius = if self.dilate { 1 } else { self.radius };
        Config::new(self.pfa, radius)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, "growila", cli.log_dir.as_deref());

    let config = cli.config();
    config.validate()?;

    let image = io::read_image(&cli.input, cli.hdu)?;
    tracing::info!(
        path = %cli.input.display(),
        hdu = cli.hdu,
        width = image.width(),
        height = image.height(),
        "Image loaded"
    );

    let mut pipeline = Pipeline::new(image, config)?;
    let flagged = pipeline.mask().count_set();

    for stage in Stage::iter() {
        tracing::info!(
            %stage,
            elapsed_ms = pipeline.elapsed(stage).as_secs_f64() * 1000.0,
            "Stage timing"
        );
    }
    tracing::info!(
        total_ms = pipeline.total_elapsed().as_secs_f64() * 1000.0,
        threshold = pipeline.threshold(),
        flagged,
        "Detection finished"
    );

    io::write_mask(&cli.output, pipeline.mask())?;
    tracing::info!(path = %cli.output.display(), "Mask written");

    Ok(())
}
