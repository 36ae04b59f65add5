//! Topographic WMTS tile client.
//!
//! The topographic web map is served as a WMTS layer in the national
//! EPSG:3006 tile grid. This module does the position → tile-index math
//! and fetches tiles through the open (HVD) endpoint, which requires no
//! authentication.
//!
//! # Tile grid
//!
//! - Origin (top-left): easting −1 200 000, northing 8 500 000
//! - Tile size: 256 × 256 px
//! - Resolution 4096 m/px at zoom 0, halving per level
//! - Zoom levels 0–9
//!
//! Rows grow southwards from the origin, columns eastwards.

use super::http::AsyncHttpClient;
use super::types::ApiError;
use crate::coord::{position_to_sweref, Position, SwerefPoint};
use tracing::debug;

/// Base URL for the topographic WMTS.
pub const WMTS_BASE_URL: &str = "https://api.lantmateriet.se/open/topowebb-ccby/v1/wmts";

/// WMTS layer and style identifiers.
const LAYER: &str = "topowebb";
const STYLE: &str = "default";
const TILE_MATRIX_SET: &str = "3006";

/// Tile grid origin, SWEREF 99 TM meters (top-left corner).
const GRID_ORIGIN_NORTHING: f64 = 8_500_000.0;
const GRID_ORIGIN_EASTING: f64 = -1_200_000.0;

/// Tile size in pixels.
const TILE_SIZE_PX: f64 = 256.0;

/// Meters per pixel at zoom 0.
const ZOOM0_RESOLUTION: f64 = 4_096.0;

/// Supported zoom levels.
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 9;

/// Tile coordinates in the EPSG:3006 WMTS grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Row, 0 at the northern grid edge, growing south
    pub row: u32,
    /// Column, 0 at the western grid edge, growing east
    pub col: u32,
    /// Zoom level (0-9)
    pub zoom: u8,
}

/// Computes the tile covering a position at the given zoom.
///
/// # Errors
///
/// Fails with a validation error for unsupported zoom levels or positions
/// outside the supported region.
pub fn tile_for(position: Position, zoom: u8) -> Result<TileCoord, ApiError> {
    if zoom > MAX_ZOOM {
        return Err(ApiError::Validation(format!(
            "Invalid zoom level: {} (must be between {} and {})",
            zoom, MIN_ZOOM, MAX_ZOOM
        )));
    }

    let point = position_to_sweref(position)?;
    let tile_span = ZOOM0_RESOLUTION / 2f64.powi(zoom as i32) * TILE_SIZE_PX;

    let col = ((point.easting - GRID_ORIGIN_EASTING) / tile_span).floor() as u32;
    let row = ((GRID_ORIGIN_NORTHING - point.northing) / tile_span).floor() as u32;

    Ok(TileCoord { row, col, zoom })
}

/// Southwest/northeast extent of a tile in SWEREF 99 TM meters.
pub fn tile_extent(tile: TileCoord) -> (SwerefPoint, SwerefPoint) {
    let tile_span = ZOOM0_RESOLUTION / 2f64.powi(tile.zoom as i32) * TILE_SIZE_PX;
    let west = GRID_ORIGIN_EASTING + tile.col as f64 * tile_span;
    let north = GRID_ORIGIN_NORTHING - tile.row as f64 * tile_span;
    (
        SwerefPoint::new(north - tile_span, west),
        SwerefPoint::new(north, west + tile_span),
    )
}

/// Client for the topographic WMTS.
pub struct WmtsClient<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> WmtsClient<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, WMTS_BASE_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetches a tile as PNG bytes.
    pub async fn fetch_tile(&self, tile: TileCoord) -> Result<Vec<u8>, ApiError> {
        if tile.zoom > MAX_ZOOM {
            return Err(ApiError::Validation(format!(
                "Invalid zoom level: {} (must be between {} and {})",
                tile.zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }

        let url = self.build_url(tile);
        debug!(url = %url, "WMTS tile fetch");
        let response = self.http_client.get(&url).await?;

        if !response.is_success() {
            return Err(ApiError::Upstream {
                status: response.status,
                message: "WMTS tile request failed".to_string(),
            });
        }

        Ok(response.body)
    }

    /// RESTful WMTS layout: `{base}/1.0.0/{layer}/{style}/{set}/{z}/{y}/{x}.png`.
    fn build_url(&self, tile: TileCoord) -> String {
        format!(
            "{}/1.0.0/{}/{}/{}/{}/{}/{}.png",
            self.base_url, LAYER, STYLE, TILE_MATRIX_SET, tile.zoom, tile.row, tile.col
        )
    }
}
