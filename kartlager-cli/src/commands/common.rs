//! Shared argument types and service construction for commands.

use clap::Args;
use kartlager::api::ReqwestClient;
use kartlager::config::ConfigFile;
use kartlager::coord::{GeoPoint, Position, SwerefPoint};
use kartlager::service::{GeodataService, ServiceConfig};

use crate::error::CliError;

/// A position in exactly one reference system.
///
/// The caller states the system explicitly by picking a flag pair;
/// nothing is guessed from value magnitudes.
#[derive(Debug, Args)]
pub struct PositionArgs {
    /// Latitude in decimal degrees (WGS84); pair with --lon
    #[arg(long, requires = "lon", conflicts_with_all = ["northing", "easting"])]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees (WGS84); pair with --lat
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,

    /// Northing in meters (SWEREF 99 TM); pair with --easting
    #[arg(long, requires = "easting", allow_hyphen_values = true)]
    pub northing: Option<f64>,

    /// Easting in meters (SWEREF 99 TM); pair with --northing
    #[arg(long, requires = "northing", allow_hyphen_values = true)]
    pub easting: Option<f64>,
}

impl PositionArgs {
    pub fn position(&self) -> Result<Position, CliError> {
        match (self.lat, self.lon, self.northing, self.easting) {
            (Some(lat), Some(lon), None, None) => {
                Ok(Position::Geographic(GeoPoint::new(lat, lon)))
            }
            (None, None, Some(northing), Some(easting)) => {
                Ok(Position::Projected(SwerefPoint::new(northing, easting)))
            }
            _ => Err(CliError::InvalidArguments(
                "give a position as either --lat/--lon or --northing/--easting".to_string(),
            )),
        }
    }
}

/// Builds the service from the user's config file.
pub fn build_service() -> Result<GeodataService<ReqwestClient>, CliError> {
    let config = ConfigFile::load().map_err(|e| CliError::Config(e.to_string()))?;
    GeodataService::new(ServiceConfig::from_config_file(&config)).map_err(CliError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(
        lat: Option<f64>,
        lon: Option<f64>,
        northing: Option<f64>,
        easting: Option<f64>,
    ) -> PositionArgs {
        PositionArgs {
            lat,
            lon,
            northing,
            easting,
        }
    }

    #[test]
    fn test_geographic_pair() {
        let position = args(Some(59.33), Some(18.07), None, None).position().unwrap();
        assert!(matches!(position, Position::Geographic(_)));
    }

    #[test]
    fn test_projected_pair() {
        let position = args(None, None, Some(6_580_000.0), Some(674_000.0))
            .position()
            .unwrap();
        assert!(matches!(position, Position::Projected(_)));
    }

    #[test]
    fn test_no_pair_is_rejected() {
        assert!(args(None, None, None, None).position().is_err());
    }

    #[test]
    fn test_half_pair_is_rejected() {
        assert!(args(Some(59.33), None, None, None).position().is_err());
    }
}
