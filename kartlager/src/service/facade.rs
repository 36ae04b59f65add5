//! Geodata service facade implementation.

use super::config::ServiceConfig;
use crate::api::{
    tile_for, ApiError, AsyncHttpClient, Elevation, ElevationClient, MapRequest, PropertyClient,
    PropertyParcel, ReqwestClient, StacClient, StacItem, StacQuery, TileCoord, WmsClient,
    WmtsClient,
};
use crate::auth::TokenCache;
use crate::coord::{to_sweref, to_wgs84, GeoPoint, Position, SwerefPoint};
use tracing::info;

/// A position expressed in both reference systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub wgs84: GeoPoint,
    pub sweref: SwerefPoint,
}

/// A fetched map tile with its grid coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTile {
    pub tile: TileCoord,
    /// PNG bytes
    pub data: Vec<u8>,
}

/// High-level facade over the geodata APIs.
///
/// Wires the HTTP client, token cache and per-API clients together and
/// exposes one method per tool operation. A tool-call transport binds to
/// this surface; the CLI exercises the same methods.
pub struct GeodataService<C: AsyncHttpClient + Clone> {
    token_cache: TokenCache<C>,
    property: PropertyClient<C>,
    elevation: ElevationClient<C>,
    wmts: WmtsClient<C>,
    wms: WmsClient<C>,
    stac: StacClient<C>,
}

impl GeodataService<ReqwestClient> {
    /// Create a service backed by a real HTTP client.
    pub fn new(config: ServiceConfig) -> Result<Self, ApiError> {
        let http_client = ReqwestClient::with_timeout(config.timeout_secs)?;
        Ok(Self::with_client(config, http_client))
    }
}

impl<C: AsyncHttpClient + Clone> GeodataService<C> {
    /// Create a service with an injected HTTP client (used by tests).
    pub fn with_client(config: ServiceConfig, http_client: C) -> Self {
        info!(token_url = %config.token_url, "Creating geodata service");
        Self {
            token_cache: TokenCache::new(
                http_client.clone(),
                config.token_url,
                config.client_id,
                config.client_secret,
            ),
            property: PropertyClient::with_base_url(http_client.clone(), config.property_base_url),
            elevation: ElevationClient::with_base_url(
                http_client.clone(),
                config.elevation_base_url,
            ),
            wmts: WmtsClient::with_base_url(http_client.clone(), config.wmts_base_url),
            wms: WmsClient::with_base_url(http_client.clone(), config.wms_base_url),
            stac: StacClient::with_base_url(http_client, config.stac_base_url),
        }
    }

    /// Converts a position to both reference systems.
    ///
    /// Purely local; no network access.
    pub fn convert(&self, position: Position) -> Result<Conversion, ApiError> {
        let conversion = match position {
            Position::Geographic(geo) => Conversion {
                wgs84: geo,
                sweref: to_sweref(geo)?,
            },
            Position::Projected(p) => Conversion {
                wgs84: to_wgs84(p)?,
                sweref: p,
            },
        };
        Ok(conversion)
    }

    /// Finds the property parcel(s) covering a position.
    pub async fn property_at(&self, position: Position) -> Result<Vec<PropertyParcel>, ApiError> {
        let token = self.token_cache.get_token().await?;
        self.property.find_at(&token, position).await
    }

    /// Searches property parcels by registered designation.
    pub async fn property_search(
        &self,
        designation: &str,
    ) -> Result<Vec<PropertyParcel>, ApiError> {
        let token = self.token_cache.get_token().await?;
        self.property.search(&token, designation).await
    }

    /// Elevation above sea level at a position.
    pub async fn elevation_at(&self, position: Position) -> Result<Elevation, ApiError> {
        let token = self.token_cache.get_token().await?;
        self.elevation.elevation_at(&token, position).await
    }

    /// Fetches the topographic map tile covering a position.
    pub async fn map_tile(&self, position: Position, zoom: u8) -> Result<MapTile, ApiError> {
        let tile = tile_for(position, zoom)?;
        let data = self.wmts.fetch_tile(tile).await?;
        Ok(MapTile { tile, data })
    }

    /// Renders an orthophoto map image for an extent.
    pub async fn map_image(&self, request: &MapRequest) -> Result<Vec<u8>, ApiError> {
        self.wms.get_map(request).await
    }

    /// Searches the STAC catalog.
    pub async fn stac_search(&self, query: &StacQuery) -> Result<Vec<StacItem>, ApiError> {
        let token = self.token_cache.get_token().await?;
        self.stac.search(&token, query).await
    }

    /// Drops the cached access token; the next authenticated call
    /// performs a fresh exchange.
    pub async fn invalidate_token(&self) {
        self.token_cache.invalidate().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpResponse;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Mock that answers the token exchange and data requests separately
    /// and counts the exchanges.
    #[derive(Clone)]
    struct RoutingMockClient {
        data_response: Result<HttpResponse, ApiError>,
        token_exchanges: Arc<AtomicU32>,
    }

    impl RoutingMockClient {
        fn ok(data_body: &str) -> Self {
            Self {
                data_response: Ok(HttpResponse::new(200, data_body.as_bytes().to_vec())),
                token_exchanges: Arc::new(AtomicU32::new(0)),
            }
        }

        fn token_body() -> HttpResponse {
            HttpResponse::new(
                200,
                br#"{"access_token":"service-token","expires_in":3600}"#.to_vec(),
            )
        }
    }

    impl AsyncHttpClient for RoutingMockClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, ApiError> {
            self.data_response.clone()
        }

        async fn get_with_bearer(
            &self,
            _url: &str,
            bearer_token: &str,
        ) -> Result<HttpResponse, ApiError> {
            assert_eq!(bearer_token, "service-token");
            self.data_response.clone()
        }

        async fn post_form(
            &self,
            _url: &str,
            _params: &[(&str, &str)],
        ) -> Result<HttpResponse, ApiError> {
            self.token_exchanges.fetch_add(1, Ordering::SeqCst);
            Ok(Self::token_body())
        }

        async fn post_json_with_bearer(
            &self,
            _url: &str,
            _json_body: &str,
            bearer_token: &str,
        ) -> Result<HttpResponse, ApiError> {
            assert_eq!(bearer_token, "service-token");
            self.data_response.clone()
        }
    }

    fn service_with(client: RoutingMockClient) -> GeodataService<RoutingMockClient> {
        let config = ServiceConfig::default().with_credentials("id", "secret");
        GeodataService::with_client(config, client)
    }

    fn parcel_body() -> &'static str {
        r#"{"features":[{"id":"abc","properties":{"beteckning":"UPPSALA KRONAN 1"}}]}"#
    }

    #[test]
    fn test_convert_geographic() {
        let service = service_with(RoutingMockClient::ok("{}"));
        let conversion = service
            .convert(Position::Geographic(GeoPoint::new(59.33, 18.07)))
            .unwrap();
        assert!((conversion.sweref.easting - 674_000.0).abs() < 2_000.0);
        assert_eq!(conversion.wgs84, GeoPoint::new(59.33, 18.07));
    }

    #[test]
    fn test_convert_rejects_out_of_range() {
        let service = service_with(RoutingMockClient::ok("{}"));
        let result = service.convert(Position::Geographic(GeoPoint::new(40.0, 18.07)));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_property_at_uses_cached_token_across_calls() {
        let client = RoutingMockClient::ok(parcel_body());
        let service = service_with(client.clone());

        let position = Position::Geographic(GeoPoint::new(59.33, 18.07));
        let first = service.property_at(position).await.unwrap();
        let second = service.property_at(position).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].designation, "UPPSALA KRONAN 1");
        assert_eq!(first, second);
        assert_eq!(
            client.token_exchanges.load(Ordering::SeqCst),
            1,
            "Second call must reuse the cached token"
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_network() {
        let client = RoutingMockClient::ok(parcel_body());
        let service = GeodataService::with_client(ServiceConfig::default(), client.clone());

        let result = service
            .property_at(Position::Geographic(GeoPoint::new(59.33, 18.07)))
            .await;
        assert!(matches!(result, Err(ApiError::Configuration(_))));
        assert_eq!(client.token_exchanges.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_map_tile_returns_tile_and_bytes() {
        let client = RoutingMockClient {
            data_response: Ok(HttpResponse::new(200, vec![0x89, 0x50, 0x4E, 0x47])),
            token_exchanges: Arc::new(AtomicU32::new(0)),
        };
        let service = service_with(client);

        let tile = service
            .map_tile(Position::Geographic(GeoPoint::new(59.33, 18.07)), 5)
            .await
            .unwrap();
        assert_eq!(tile.tile.zoom, 5);
        assert_eq!(tile.data[..4], [0x89, 0x50, 0x4E, 0x47]);
    }

    #[tokio::test]
    async fn test_invalidate_token_forces_new_exchange() {
        let client = RoutingMockClient::ok(parcel_body());
        let service = service_with(client.clone());

        let position = Position::Geographic(GeoPoint::new(59.33, 18.07));
        service.property_at(position).await.unwrap();
        service.invalidate_token().await;
        service.property_at(position).await.unwrap();

        assert_eq!(client.token_exchanges.load(Ordering::SeqCst), 2);
    }
}
