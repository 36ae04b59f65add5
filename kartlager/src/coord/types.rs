//! Coordinate type definitions

use std::fmt;

/// Supported latitude range (degrees north), covering Sweden.
pub const MIN_LAT: f64 = 55.0;
pub const MAX_LAT: f64 = 69.0;

/// Supported longitude range (degrees east).
pub const MIN_LON: f64 = 11.0;
pub const MAX_LON: f64 = 24.0;

/// Supported SWEREF 99 TM easting range (meters).
pub const MIN_EASTING: f64 = 200_000.0;
pub const MAX_EASTING: f64 = 1_000_000.0;

/// Supported SWEREF 99 TM northing range (meters).
pub const MIN_NORTHING: f64 = 6_100_000.0;
pub const MAX_NORTHING: f64 = 7_700_000.0;

/// A geographic point in WGS84 latitude/longitude (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, positive north
    pub lat: f64,
    /// Longitude in decimal degrees, positive east
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°N {:.6}°E", self.lat, self.lon)
    }
}

/// A projected point in SWEREF 99 TM (EPSG:3006), meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwerefPoint {
    /// Northing in meters
    pub northing: f64,
    /// Easting in meters
    pub easting: f64,
}

impl SwerefPoint {
    pub fn new(northing: f64, easting: f64) -> Self {
        Self { northing, easting }
    }
}

impl fmt::Display for SwerefPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N {:.3} E {:.3}", self.northing, self.easting)
    }
}

/// A position with its reference system stated explicitly.
///
/// Callers declare whether a coordinate pair is geographic or projected;
/// nothing is inferred from value magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// WGS84 latitude/longitude
    Geographic(GeoPoint),
    /// SWEREF 99 TM northing/easting
    Projected(SwerefPoint),
}

/// A geographic bounding box in WGS84 (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Southwest corner.
    pub fn lower(&self) -> GeoPoint {
        GeoPoint::new(self.min_lat, self.min_lon)
    }

    /// Northeast corner.
    pub fn upper(&self) -> GeoPoint {
        GeoPoint::new(self.max_lat, self.max_lon)
    }
}

/// A projected bounding box in SWEREF 99 TM (meters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwerefBounds {
    pub min_northing: f64,
    pub min_easting: f64,
    pub max_northing: f64,
    pub max_easting: f64,
}

impl SwerefBounds {
    pub fn new(min_northing: f64, min_easting: f64, max_northing: f64, max_easting: f64) -> Self {
        Self {
            min_northing,
            min_easting,
            max_northing,
            max_easting,
        }
    }

    /// Southwest corner.
    pub fn lower(&self) -> SwerefPoint {
        SwerefPoint::new(self.min_northing, self.min_easting)
    }

    /// Northeast corner.
    pub fn upper(&self) -> SwerefPoint {
        SwerefPoint::new(self.max_northing, self.max_easting)
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside the supported range
    InvalidLatitude(f64),
    /// Longitude is outside the supported range
    InvalidLongitude(f64),
    /// Northing is outside the supported range
    InvalidNorthing(f64),
    /// Easting is outside the supported range
    InvalidEasting(f64),
    /// Bounding box has min >= max on an axis
    InvalidBounds { axis: &'static str, min: f64, max: f64 },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            CoordError::InvalidNorthing(northing) => {
                write!(
                    f,
                    "Invalid northing: {} (must be between {} and {})",
                    northing, MIN_NORTHING, MAX_NORTHING
                )
            }
            CoordError::InvalidEasting(easting) => {
                write!(
                    f,
                    "Invalid easting: {} (must be between {} and {})",
                    easting, MIN_EASTING, MAX_EASTING
                )
            }
            CoordError::InvalidBounds { axis, min, max } => {
                write!(
                    f,
                    "Invalid bounding box: min {} ({}) must be less than max ({})",
                    axis, min, max
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
