//! Coordinate conversion command.

use clap::Args;
use kartlager::api::ApiError;
use kartlager::coord::{to_sweref, to_wgs84, Position};

use super::common::PositionArgs;
use crate::error::CliError;

/// Arguments for `kartlager convert`.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    position: PositionArgs,

    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,
}

/// Run the convert command. Purely local; no network or credentials.
pub fn run(args: ConvertArgs) -> Result<(), CliError> {
    let (wgs84, sweref) = match args.position.position()? {
        Position::Geographic(geo) => {
            let projected = to_sweref(geo).map_err(ApiError::from)?;
            (geo, projected)
        }
        Position::Projected(p) => {
            let geo = to_wgs84(p).map_err(ApiError::from)?;
            (geo, p)
        }
    };

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "wgs84": { "lat": wgs84.lat, "lon": wgs84.lon },
                "sweref99tm": { "northing": sweref.northing, "easting": sweref.easting },
            })
        );
    } else {
        println!("WGS84:        {:.6}, {:.6}", wgs84.lat, wgs84.lon);
        println!("SWEREF 99 TM: N {:.3}  E {:.3}", sweref.northing, sweref.easting);
    }

    Ok(())
}
