//! Kartlager - Swedish geodata tooling
//!
//! This library wraps the national land survey's REST/WMTS/WMS APIs
//! behind a small set of typed operations: coordinate conversion between
//! WGS84 and SWEREF 99 TM, property parcel search, elevation queries, map
//! tiles and images, and STAC catalog search, with an OAuth2
//! client-credentials token cache in front of the authenticated APIs.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a facade:
//!
//! ```no_run
//! use kartlager::coord::{GeoPoint, Position};
//! use kartlager::service::{GeodataService, ServiceConfig};
//!
//! # async fn run() -> Result<(), kartlager::api::ApiError> {
//! let service = GeodataService::new(
//!     ServiceConfig::default().with_credentials("id", "secret"),
//! )?;
//! let elevation = service
//!     .elevation_at(Position::Geographic(GeoPoint::new(59.33, 18.07)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod coord;
pub mod logging;
pub mod service;

/// Version of the kartlager library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_coord_module_exists() {
        use crate::coord::{to_sweref, GeoPoint};
        let result = to_sweref(GeoPoint::new(59.33, 18.07));
        assert!(result.is_ok());
    }
}
