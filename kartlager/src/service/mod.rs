//! High-level service facade for geodata operations.
//!
//! [`GeodataService`] encapsulates component wiring (HTTP client, token
//! cache, API clients) behind one method per tool operation.
//!
//! # Example
//!
//! ```no_run
//! use kartlager::coord::{GeoPoint, Position};
//! use kartlager::service::{GeodataService, ServiceConfig};
//!
//! # async fn run() -> Result<(), kartlager::api::ApiError> {
//! let config = ServiceConfig::default().with_credentials("id", "secret");
//! let service = GeodataService::new(config)?;
//!
//! let parcels = service
//!     .property_at(Position::Geographic(GeoPoint::new(59.33, 18.07)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod facade;

pub use config::ServiceConfig;
pub use facade::{Conversion, GeodataService, MapTile};
