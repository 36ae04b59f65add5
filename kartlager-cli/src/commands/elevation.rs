//! Elevation command.

use clap::Args;

use super::common::{build_service, PositionArgs};
use crate::error::CliError;

/// Arguments for `kartlager elevation`.
#[derive(Debug, Args)]
pub struct ElevationArgs {
    #[command(flatten)]
    position: PositionArgs,

    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,
}

/// Run the elevation command.
pub async fn run(args: ElevationArgs) -> Result<(), CliError> {
    let service = build_service()?;
    let elevation = service.elevation_at(args.position.position()?).await?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "northing": elevation.position.northing,
                "easting": elevation.position.easting,
                "elevation": elevation.meters,
            })
        );
    } else {
        println!("{:.1} m above sea level (RH 2000)", elevation.meters);
    }

    Ok(())
}
