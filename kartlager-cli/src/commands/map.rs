//! Orthophoto map rendering command.

use clap::{Args, ValueEnum};
use kartlager::api::{ImageFormat, MapRequest};
use kartlager::coord::SwerefBounds;
use std::path::PathBuf;

use super::common::build_service;
use crate::error::CliError;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Arguments for `kartlager map`.
#[derive(Debug, Args)]
pub struct MapArgs {
    /// Minimum northing in meters (SWEREF 99 TM)
    #[arg(long)]
    min_northing: f64,

    /// Minimum easting in meters (SWEREF 99 TM)
    #[arg(long)]
    min_easting: f64,

    /// Maximum northing in meters (SWEREF 99 TM)
    #[arg(long)]
    max_northing: f64,

    /// Maximum easting in meters (SWEREF 99 TM)
    #[arg(long)]
    max_easting: f64,

    /// Image width in pixels
    #[arg(long, default_value = "512")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "512")]
    height: u32,

    /// Comma-separated WMS layer names
    #[arg(long, default_value = "ortofoto")]
    layers: String,

    /// Output image format
    #[arg(long, value_enum, default_value = "png")]
    format: OutputFormat,

    /// Output file path
    #[arg(long)]
    output: PathBuf,
}

/// Run the map command.
pub async fn run(args: MapArgs) -> Result<(), CliError> {
    let service = build_service()?;

    let bounds = SwerefBounds::new(
        args.min_northing,
        args.min_easting,
        args.max_northing,
        args.max_easting,
    );
    let request = MapRequest::new(bounds, args.width, args.height)
        .with_layers(args.layers)
        .with_format(args.format.into());

    let data = service.map_image(&request).await?;

    std::fs::write(&args.output, &data).map_err(|error| CliError::FileWrite {
        path: args.output.display().to_string(),
        error,
    })?;

    println!(
        "Saved {}x{} map to {} ({} bytes)",
        args.width,
        args.height,
        args.output.display(),
        data.len()
    );

    Ok(())
}
