//! STAC catalog search client.
//!
//! Wraps the provider's STAC item search: POST a JSON query with a WGS84
//! bbox, collection ids, an optional datetime range and a result limit;
//! reshape the returned items to id, datetime and downloadable assets.
//!
//! Like property search, this is a search-style query: 404 maps to an
//! empty result set.

use super::http::AsyncHttpClient;
use super::types::ApiError;
use crate::coord::{bounds_to_sweref, GeoBounds};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Base URL for the elevation-data STAC catalog.
pub const STAC_BASE_URL: &str = "https://api.lantmateriet.se/stac-hojd/v1";

/// Default result limit.
const DEFAULT_LIMIT: u32 = 10;

/// Largest accepted result limit.
const MAX_LIMIT: u32 = 1000;

/// A STAC item search query.
#[derive(Debug, Clone, PartialEq)]
pub struct StacQuery {
    /// Collection ids to search; empty searches all collections
    pub collections: Vec<String>,
    /// Search extent, WGS84
    pub bounds: GeoBounds,
    /// Optional closed datetime interval
    pub datetime: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Result limit (1-1000)
    pub limit: u32,
}

impl StacQuery {
    pub fn new(bounds: GeoBounds) -> Self {
        Self {
            collections: Vec::new(),
            bounds,
            datetime: None,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_collections(mut self, collections: Vec<String>) -> Self {
        self.collections = collections;
        self
    }

    pub fn with_datetime(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.datetime = Some((from, to));
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// A downloadable asset on a STAC item.
#[derive(Debug, Clone, PartialEq)]
pub struct StacAsset {
    /// Asset key, e.g. "data"
    pub key: String,
    pub href: String,
    pub title: Option<String>,
}

/// A STAC item, reshaped for callers.
#[derive(Debug, Clone, PartialEq)]
pub struct StacItem {
    pub id: String,
    pub collection: Option<String>,
    pub datetime: Option<String>,
    pub assets: Vec<StacAsset>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    features: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    collection: Option<String>,
    #[serde(default)]
    properties: RawProperties,
    #[serde(default)]
    assets: std::collections::BTreeMap<String, RawAsset>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    datetime: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    href: String,
    title: Option<String>,
}

/// Client for the STAC catalog.
pub struct StacClient<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> StacClient<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, STAC_BASE_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Searches the catalog.
    pub async fn search(
        &self,
        bearer_token: &str,
        query: &StacQuery,
    ) -> Result<Vec<StacItem>, ApiError> {
        let body = Self::build_search_body(query)?;
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, "STAC item search");

        let response = self
            .http_client
            .post_json_with_bearer(&url, &body, bearer_token)
            .await?;

        match response.status {
            404 => return Ok(Vec::new()),
            401 => {
                return Err(ApiError::Authentication(
                    "bearer token was rejected by the STAC API".to_string(),
                ))
            }
            s if !(200..300).contains(&s) => {
                return Err(ApiError::Upstream {
                    status: s,
                    message: "STAC search request failed".to_string(),
                })
            }
            _ => {}
        }

        let parsed: SearchResponse = serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Malformed STAC response: {}", e)))?;

        Ok(parsed
            .features
            .into_iter()
            .map(|item| StacItem {
                id: item.id,
                collection: item.collection,
                datetime: item.properties.datetime,
                assets: item
                    .assets
                    .into_iter()
                    .map(|(key, asset)| StacAsset {
                        key,
                        href: asset.href,
                        title: asset.title,
                    })
                    .collect(),
            })
            .collect())
    }

    /// Builds the POST /search body. bbox is WGS84 lon,lat axis order per
    /// the STAC API spec.
    fn build_search_body(query: &StacQuery) -> Result<String, ApiError> {
        if query.limit == 0 || query.limit > MAX_LIMIT {
            return Err(ApiError::Validation(format!(
                "limit {} outside 1-{}",
                query.limit, MAX_LIMIT
            )));
        }

        // Range and min<max validation via the coordinate layer.
        bounds_to_sweref(query.bounds)?;

        let b = query.bounds;
        let mut body = json!({
            "bbox": [b.min_lon, b.min_lat, b.max_lon, b.max_lat],
            "limit": query.limit,
        });
        if !query.collections.is_empty() {
            body["collections"] = json!(query.collections);
        }
        if let Some((from, to)) = &query.datetime {
            body["datetime"] = json!(format!(
                "{}/{}",
                from.to_rfc3339_opts(SecondsFormat::Secs, true),
                to.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }

        Ok(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockHttpClient;
    use chrono::TimeZone;

    fn uppsala_bounds() -> GeoBounds {
        GeoBounds::new(59.8, 17.5, 59.9, 17.7)
    }

    fn sample_response() -> &'static str {
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "hojdgrid_633_60_2500",
                    "collection": "markhojdmodell",
                    "properties": {"datetime": "2023-04-12T00:00:00Z"},
                    "assets": {
                        "data": {
                            "href": "https://dl.lantmateriet.se/hojdgrid_633_60_2500.tif",
                            "title": "Elevation grid"
                        }
                    }
                }
            ]
        }"#
    }

    #[tokio::test]
    async fn test_search_reshapes_items() {
        let client = StacClient::new(MockHttpClient::ok(sample_response()));
        let items = client
            .search("token", &StacQuery::new(uppsala_bounds()))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "hojdgrid_633_60_2500");
        assert_eq!(items[0].collection.as_deref(), Some("markhojdmodell"));
        assert_eq!(items[0].assets.len(), 1);
        assert_eq!(items[0].assets[0].key, "data");
        assert!(items[0].assets[0].href.ends_with(".tif"));
    }

    #[tokio::test]
    async fn test_search_404_maps_to_empty() {
        let client = StacClient::new(MockHttpClient::status(404));
        let items = client
            .search("token", &StacQuery::new(uppsala_bounds()))
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let client = StacClient::new(MockHttpClient::status(500));
        match client.search("token", &StacQuery::new(uppsala_bounds())).await {
            Err(ApiError::Upstream { status, .. }) => assert_eq!(status, 500),
            other => panic!("Expected Upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_body_contains_bbox_lon_lat_order() {
        let body = StacClient::<MockHttpClient>::build_search_body(&StacQuery::new(
            uppsala_bounds(),
        ))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["bbox"][0], 17.5);
        assert_eq!(value["bbox"][1], 59.8);
        assert_eq!(value["limit"], 10);
        assert!(value.get("collections").is_none());
        assert!(value.get("datetime").is_none());
    }

    #[test]
    fn test_body_with_collections_and_datetime() {
        let from = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let query = StacQuery::new(uppsala_bounds())
            .with_collections(vec!["markhojdmodell".to_string()])
            .with_datetime(from, to)
            .with_limit(50);

        let body = StacClient::<MockHttpClient>::build_search_body(&query).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["collections"][0], "markhojdmodell");
        assert_eq!(value["datetime"], "2023-01-01T00:00:00Z/2023-12-31T23:59:59Z");
        assert_eq!(value["limit"], 50);
    }

    #[test]
    fn test_invalid_limit_rejected() {
        let query = StacQuery::new(uppsala_bounds()).with_limit(0);
        assert!(matches!(
            StacClient::<MockHttpClient>::build_search_body(&query),
            Err(ApiError::Validation(_))
        ));

        let query = StacQuery::new(uppsala_bounds()).with_limit(5000);
        assert!(matches!(
            StacClient::<MockHttpClient>::build_search_body(&query),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let query = StacQuery::new(GeoBounds::new(59.9, 17.5, 59.8, 17.7));
        assert!(matches!(
            StacClient::<MockHttpClient>::build_search_body(&query),
            Err(ApiError::Validation(_))
        ));
    }
}
