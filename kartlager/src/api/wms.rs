//! Orthophoto WMS client.
//!
//! Builds WMS 1.3.0 GetMap requests against the orthophoto service and
//! fetches the rendered image. Requests are expressed in SWEREF 99 TM
//! (EPSG:3006) only; bounding boxes are validated through the coordinate
//! layer before any URL is built.

use super::http::AsyncHttpClient;
use super::types::ApiError;
use super::url::encode_query;
use crate::coord::{bounds_to_wgs84, SwerefBounds};
use tracing::debug;

/// Base URL for the orthophoto WMS.
pub const WMS_BASE_URL: &str = "https://api.lantmateriet.se/open/ortofoto/wms/v1";

/// Default layer name.
pub const DEFAULT_LAYER: &str = "ortofoto";

/// Largest accepted image dimension, pixels.
const MAX_IMAGE_SIZE: u32 = 4096;

/// Output image format for GetMap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// A GetMap request.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRequest {
    /// Comma-separated WMS layer names
    pub layers: String,
    /// Requested extent, SWEREF 99 TM
    pub bounds: SwerefBounds,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Output format
    pub format: ImageFormat,
}

impl MapRequest {
    pub fn new(bounds: SwerefBounds, width: u32, height: u32) -> Self {
        Self {
            layers: DEFAULT_LAYER.to_string(),
            bounds,
            width,
            height,
            format: ImageFormat::Png,
        }
    }

    pub fn with_layers(mut self, layers: impl Into<String>) -> Self {
        self.layers = layers.into();
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }
}

/// Client for the orthophoto WMS.
pub struct WmsClient<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> WmsClient<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, WMS_BASE_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetches a rendered map image.
    ///
    /// # Errors
    ///
    /// Fails with a validation error for degenerate or out-of-region
    /// bounds, empty layer list, or oversized image dimensions; with an
    /// upstream error for non-success statuses.
    pub async fn get_map(&self, request: &MapRequest) -> Result<Vec<u8>, ApiError> {
        let url = self.build_get_map_url(request)?;
        debug!(url = %url, "WMS GetMap");

        let response = self.http_client.get(&url).await?;
        if !response.is_success() {
            return Err(ApiError::Upstream {
                status: response.status,
                message: "WMS GetMap request failed".to_string(),
            });
        }

        Ok(response.body)
    }

    fn build_get_map_url(&self, request: &MapRequest) -> Result<String, ApiError> {
        if request.layers.trim().is_empty() {
            return Err(ApiError::Validation("LAYERS must not be empty".to_string()));
        }
        if request.width == 0
            || request.height == 0
            || request.width > MAX_IMAGE_SIZE
            || request.height > MAX_IMAGE_SIZE
        {
            return Err(ApiError::Validation(format!(
                "image size {}x{} outside 1-{} pixels",
                request.width, request.height, MAX_IMAGE_SIZE
            )));
        }

        // Range and min<max validation via the coordinate layer.
        bounds_to_wgs84(request.bounds)?;

        let b = request.bounds;
        // WMS 1.3.0 axis order for EPSG:3006 is northing,easting.
        Ok(format!(
            "{}?SERVICE=WMS&VERSION=1.3.0&REQUEST=GetMap&LAYERS={}&STYLES=&CRS=EPSG:3006\
             &BBOX={:.3},{:.3},{:.3},{:.3}&WIDTH={}&HEIGHT={}&FORMAT={}",
            self.base_url,
            encode_query(&request.layers),
            b.min_northing,
            b.min_easting,
            b.max_northing,
            b.max_easting,
            request.width,
            request.height,
            encode_query(request.format.mime()),
        ))
    }
}
