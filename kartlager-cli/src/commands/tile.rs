//! Topographic tile download command.

use clap::Args;
use std::path::PathBuf;

use super::common::{build_service, PositionArgs};
use crate::error::CliError;

/// Arguments for `kartlager tile`.
#[derive(Debug, Args)]
pub struct TileArgs {
    #[command(flatten)]
    position: PositionArgs,

    /// Zoom level (0-9)
    #[arg(long, default_value = "9")]
    zoom: u8,

    /// Output file path (PNG)
    #[arg(long)]
    output: PathBuf,
}

/// Run the tile command.
pub async fn run(args: TileArgs) -> Result<(), CliError> {
    let service = build_service()?;
    let tile = service.map_tile(args.position.position()?, args.zoom).await?;

    std::fs::write(&args.output, &tile.data).map_err(|error| CliError::FileWrite {
        path: args.output.display().to_string(),
        error,
    })?;

    println!(
        "Saved tile {}/{}/{} to {} ({} bytes)",
        tile.tile.zoom,
        tile.tile.row,
        tile.tile.col,
        args.output.display(),
        tile.data.len()
    );

    Ok(())
}
