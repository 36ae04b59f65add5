//! Elevation query client.
//!
//! Wraps the elevation REST product: elevation above sea level (RH 2000)
//! at a single SWEREF 99 TM position. The endpoint answers with a GeoJSON
//! point whose third coordinate is the elevation in meters.

use super::http::AsyncHttpClient;
use super::types::ApiError;
use crate::coord::{position_to_sweref, Position, SwerefPoint};
use serde::Deserialize;
use tracing::debug;

/// Base URL for the elevation REST API.
pub const ELEVATION_BASE_URL: &str =
    "https://api.lantmateriet.se/distribution/produkter/hojd/v1/rest/api";

/// Elevation at a position, meters above sea level in RH 2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elevation {
    /// The queried position, normalized to SWEREF 99 TM
    pub position: SwerefPoint,
    /// Meters above sea level
    pub meters: f64,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: Vec<f64>,
}

/// Client for the elevation API.
pub struct ElevationClient<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> ElevationClient<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, ELEVATION_BASE_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Elevation at a position given in either reference system.
    ///
    /// The position is validated and normalized to SWEREF 99 TM before
    /// the URL is built.
    pub async fn elevation_at(
        &self,
        bearer_token: &str,
        position: Position,
    ) -> Result<Elevation, ApiError> {
        let point = position_to_sweref(position)?;
        let url = self.build_url(point);
        debug!(url = %url, "Elevation query");

        let response = self.http_client.get_with_bearer(&url, bearer_token).await?;

        match response.status {
            401 => {
                return Err(ApiError::Authentication(
                    "bearer token was rejected by the elevation API".to_string(),
                ))
            }
            s if !(200..300).contains(&s) => {
                return Err(ApiError::Upstream {
                    status: s,
                    message: "elevation API request failed".to_string(),
                })
            }
            _ => {}
        }

        let geometry: PointGeometry = serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Malformed point geometry: {}", e)))?;

        if geometry.coordinates.len() < 3 {
            return Err(ApiError::InvalidResponse(
                "point geometry has no elevation component".to_string(),
            ));
        }

        Ok(Elevation {
            position: point,
            meters: geometry.coordinates[2],
        })
    }

    /// URL layout: `{base}/hojd/{northing}/{easting}`, millimeter precision.
    fn build_url(&self, point: SwerefPoint) -> String {
        format!(
            "{}/hojd/{:.3}/{:.3}",
            self.base_url, point.northing, point.easting
        )
    }
}
