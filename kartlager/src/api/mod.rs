//! Geodata API clients
//!
//! One module per upstream API, each doing the same three things:
//! validate arguments through the coordinate layer, build the request
//! URL or body, and reshape the response into a small typed result.
//!
//! All clients take their HTTP client by injection, so every module is
//! tested against mocks without network access.

mod elevation;
mod http;
mod property;
mod stac;
mod types;
mod url;
mod wms;
mod wmts;

pub use elevation::{Elevation, ElevationClient, ELEVATION_BASE_URL};
pub use http::{AsyncHttpClient, HttpResponse, ReqwestClient};
pub use property::{PropertyClient, PropertyParcel, PROPERTY_BASE_URL};
pub use stac::{StacAsset, StacClient, StacItem, StacQuery, STAC_BASE_URL};
pub use types::ApiError;
pub use wms::{ImageFormat, MapRequest, WmsClient, DEFAULT_LAYER, WMS_BASE_URL};
pub use wmts::{tile_extent, tile_for, TileCoord, WmtsClient, MAX_ZOOM, MIN_ZOOM, WMTS_BASE_URL};

#[cfg(test)]
pub use http::tests::{CountingHttpClient, MockHttpClient};
