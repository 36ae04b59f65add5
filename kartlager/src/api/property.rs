//! Property parcel search client.
//!
//! Wraps the cadastral index (fastighetsindelning) OGC API Features
//! collection: find the parcel covering a position, or search parcels by
//! their registered designation.
//!
//! # 404 handling
//!
//! Search-style queries map 404 to an empty result set. This is a
//! deliberate design choice limited to this client and the STAC client;
//! every other non-success status is surfaced as an upstream error.

use super::http::AsyncHttpClient;
use super::types::ApiError;
use super::url::encode_query;
use crate::coord::{position_to_wgs84, Position};
use serde::Deserialize;
use tracing::debug;

/// Base URL for the cadastral index OGC API Features service.
pub const PROPERTY_BASE_URL: &str =
    "https://api.lantmateriet.se/ogc-features/v1/fastighetsindelning";

/// Collection holding one feature per property parcel area.
const PARCEL_COLLECTION: &str = "registerenhetsomrade";

/// Half-side of the point-query box, degrees. Roughly five meters, small
/// enough to hit a single parcel in practice.
const POINT_QUERY_EPSILON: f64 = 0.00005;

/// Default page size for searches.
const DEFAULT_LIMIT: u32 = 20;

/// A property parcel as returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyParcel {
    /// Stable feature identity
    pub id: String,
    /// Registered designation, e.g. "STOCKHOLM KLAMPARNA 6"
    pub designation: String,
    /// Municipality name, when the feature carries one
    pub municipality: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: Option<String>,
    properties: ParcelProperties,
}

#[derive(Debug, Deserialize)]
struct ParcelProperties {
    #[serde(rename = "beteckning")]
    designation: Option<String>,
    #[serde(rename = "kommunnamn")]
    municipality: Option<String>,
}

/// Client for the property parcel API.
pub struct PropertyClient<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> PropertyClient<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, PROPERTY_BASE_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Finds the parcel(s) covering a position.
    ///
    /// The position may be given in either reference system; it is
    /// validated and normalized to WGS84 before the query.
    pub async fn find_at(
        &self,
        bearer_token: &str,
        position: Position,
    ) -> Result<Vec<PropertyParcel>, ApiError> {
        let geo = position_to_wgs84(position)?;
        let url = self.build_point_url(geo.lat, geo.lon);
        debug!(url = %url, "Property point query");
        self.fetch_parcels(&url, bearer_token).await
    }

    /// Searches parcels by registered designation (free text).
    ///
    /// # Errors
    ///
    /// Fails with a validation error on an empty query string.
    pub async fn search(
        &self,
        bearer_token: &str,
        designation: &str,
    ) -> Result<Vec<PropertyParcel>, ApiError> {
        if designation.trim().is_empty() {
            return Err(ApiError::Validation(
                "designation query must not be empty".to_string(),
            ));
        }

        let url = self.build_search_url(designation);
        debug!(url = %url, "Property designation search");
        self.fetch_parcels(&url, bearer_token).await
    }

    async fn fetch_parcels(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> Result<Vec<PropertyParcel>, ApiError> {
        let response = self.http_client.get_with_bearer(url, bearer_token).await?;

        match response.status {
            404 => return Ok(Vec::new()),
            401 => {
                return Err(ApiError::Authentication(
                    "bearer token was rejected by the property API".to_string(),
                ))
            }
            s if !(200..300).contains(&s) => {
                return Err(ApiError::Upstream {
                    status: s,
                    message: "property API request failed".to_string(),
                })
            }
            _ => {}
        }

        let collection: FeatureCollection = serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Malformed feature collection: {}", e)))?;

        Ok(collection
            .features
            .into_iter()
            .map(|f| PropertyParcel {
                id: f.id.unwrap_or_default(),
                designation: f.properties.designation.unwrap_or_default(),
                municipality: f.properties.municipality,
            })
            .collect())
    }

    /// Items URL for a point query: a degenerate-ish bbox around the point,
    /// axis order lon,lat per OGC API Features (CRS84).
    fn build_point_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/collections/{}/items?bbox={:.6},{:.6},{:.6},{:.6}&limit={}",
            self.base_url,
            PARCEL_COLLECTION,
            lon - POINT_QUERY_EPSILON,
            lat - POINT_QUERY_EPSILON,
            lon + POINT_QUERY_EPSILON,
            lat + POINT_QUERY_EPSILON,
            DEFAULT_LIMIT
        )
    }

    fn build_search_url(&self, designation: &str) -> String {
        format!(
            "{}/collections/{}/items?beteckning={}&limit={}",
            self.base_url,
            PARCEL_COLLECTION,
            encode_query(designation),
            DEFAULT_LIMIT
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockHttpClient;
    use crate::coord::{GeoPoint, Position, SwerefPoint};

    fn sample_collection() -> &'static str {
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "909a6a63-55f8-90ec-e040-ed8f66444c3f",
                    "properties": {
                        "beteckning": "STOCKHOLM KLAMPARNA 6",
                        "kommunnamn": "Stockholm"
                    }
                }
            ]
        }"#
    }

    #[tokio::test]
    async fn test_find_at_parses_parcels() {
        let client = PropertyClient::new(MockHttpClient::ok(sample_collection()));
        let parcels = client
            .find_at("token", Position::Geographic(GeoPoint::new(59.33, 18.07)))
            .await
            .unwrap();

        assert_eq!(parcels.len(), 1);
        assert_eq!(parcels[0].designation, "STOCKHOLM KLAMPARNA 6");
        assert_eq!(parcels[0].municipality.as_deref(), Some("Stockholm"));
    }

    #[tokio::test]
    async fn test_find_at_accepts_projected_position() {
        let client = PropertyClient::new(MockHttpClient::ok(sample_collection()));
        let parcels = client
            .find_at(
                "token",
                Position::Projected(SwerefPoint::new(6_580_000.0, 674_000.0)),
            )
            .await
            .unwrap();
        assert_eq!(parcels.len(), 1);
    }

    #[tokio::test]
    async fn test_find_at_rejects_out_of_range_position() {
        let client = PropertyClient::new(MockHttpClient::ok(sample_collection()));
        let result = client
            .find_at("token", Position::Geographic(GeoPoint::new(48.85, 2.35)))
            .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_not_found_maps_to_empty_result() {
        let client = PropertyClient::new(MockHttpClient::status(404));
        let parcels = client.search("token", "STOCKHOLM KLAMPARNA 6").await.unwrap();
        assert!(parcels.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_is_authentication_error() {
        let client = PropertyClient::new(MockHttpClient::status(401));
        let result = client.search("token", "STOCKHOLM KLAMPARNA 6").await;
        assert!(matches!(result, Err(ApiError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_server_error_carries_status() {
        let client = PropertyClient::new(MockHttpClient::status(502));
        match client.search("token", "STOCKHOLM KLAMPARNA 6").await {
            Err(ApiError::Upstream { status, .. }) => assert_eq!(status, 502),
            other => panic!("Expected Upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_designation_is_rejected() {
        let client = PropertyClient::new(MockHttpClient::ok(sample_collection()));
        let result = client.search("token", "  ").await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_point_url_uses_lon_lat_axis_order() {
        let client = PropertyClient::new(MockHttpClient::ok("{}"));
        let url = client.build_point_url(59.33, 18.07);
        assert!(url.contains("/collections/registerenhetsomrade/items?bbox=18.06"));
        assert!(url.contains(",59.32"));
        assert!(url.contains("limit=20"));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = PropertyClient::new(MockHttpClient::ok("{}"));
        let url = client.build_search_url("STOCKHOLM KLAMPARNA 6");
        assert!(url.contains("beteckning=STOCKHOLM%20KLAMPARNA%206"));
    }
}
