//! Coordinate conversion module
//!
//! Provides conversions between WGS84 geographic coordinates
//! (latitude/longitude) and the SWEREF 99 TM projected grid (EPSG:3006)
//! used by the national geodata APIs.
//!
//! The projection is the Gauss conformal (transverse Mercator) projection
//! on the GRS 80 ellipsoid, evaluated with Krüger's series. Round-tripping
//! a point through `to_sweref` and `to_wgs84` reproduces it to well below
//! one meter anywhere inside the supported region.

mod types;

pub use types::{
    CoordError, GeoBounds, GeoPoint, Position, SwerefBounds, SwerefPoint, MAX_EASTING, MAX_LAT,
    MAX_LON, MAX_NORTHING, MIN_EASTING, MIN_LAT, MIN_LON, MIN_NORTHING,
};

/// GRS 80 semi-major axis (meters).
const AXIS: f64 = 6_378_137.0;

/// GRS 80 flattening.
const FLATTENING: f64 = 1.0 / 298.257_222_101;

/// SWEREF 99 TM central meridian (degrees east).
const CENTRAL_MERIDIAN: f64 = 15.0;

/// SWEREF 99 TM scale factor on the central meridian.
const SCALE: f64 = 0.9996;

/// SWEREF 99 TM false easting (meters).
const FALSE_EASTING: f64 = 500_000.0;

/// SWEREF 99 TM false northing (meters).
const FALSE_NORTHING: f64 = 0.0;

/// Converts a WGS84 geographic point to SWEREF 99 TM.
///
/// # Errors
///
/// Returns `CoordError` if the point lies outside the supported region
/// (55–69°N, 11–24°E).
pub fn to_sweref(geo: GeoPoint) -> Result<SwerefPoint, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&geo.lat) {
        return Err(CoordError::InvalidLatitude(geo.lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&geo.lon) {
        return Err(CoordError::InvalidLongitude(geo.lon));
    }

    let e2 = FLATTENING * (2.0 - FLATTENING);
    let n = FLATTENING / (2.0 - FLATTENING);
    let a_roof = AXIS / (1.0 + n) * (1.0 + n * n / 4.0 + n.powi(4) / 64.0);

    // Geodetic latitude to conformal latitude.
    let a = e2;
    let b = (5.0 * e2.powi(2) - e2.powi(3)) / 6.0;
    let c = (104.0 * e2.powi(3) - 45.0 * e2.powi(4)) / 120.0;
    let d = 1237.0 * e2.powi(4) / 1260.0;

    let phi = geo.lat.to_radians();
    let lambda = geo.lon.to_radians();
    let lambda0 = CENTRAL_MERIDIAN.to_radians();

    let sin_phi = phi.sin();
    let phi_star = phi
        - sin_phi
            * phi.cos()
            * (a + b * sin_phi.powi(2) + c * sin_phi.powi(4) + d * sin_phi.powi(6));
    let delta_lambda = lambda - lambda0;

    let xi = (phi_star.tan() / delta_lambda.cos()).atan();
    let eta = (phi_star.cos() * delta_lambda.sin()).atanh();

    let beta1 = n / 2.0 - 2.0 * n.powi(2) / 3.0 + 5.0 * n.powi(3) / 16.0 + 41.0 * n.powi(4) / 180.0;
    let beta2 = 13.0 * n.powi(2) / 48.0 - 3.0 * n.powi(3) / 5.0 + 557.0 * n.powi(4) / 1440.0;
    let beta3 = 61.0 * n.powi(3) / 240.0 - 103.0 * n.powi(4) / 140.0;
    let beta4 = 49_561.0 * n.powi(4) / 161_280.0;

    let northing = SCALE
        * a_roof
        * (xi
            + beta1 * (2.0 * xi).sin() * (2.0 * eta).cosh()
            + beta2 * (4.0 * xi).sin() * (4.0 * eta).cosh()
            + beta3 * (6.0 * xi).sin() * (6.0 * eta).cosh()
            + beta4 * (8.0 * xi).sin() * (8.0 * eta).cosh())
        + FALSE_NORTHING;
    let easting = SCALE
        * a_roof
        * (eta
            + beta1 * (2.0 * xi).cos() * (2.0 * eta).sinh()
            + beta2 * (4.0 * xi).cos() * (4.0 * eta).sinh()
            + beta3 * (6.0 * xi).cos() * (6.0 * eta).sinh()
            + beta4 * (8.0 * xi).cos() * (8.0 * eta).sinh())
        + FALSE_EASTING;

    Ok(SwerefPoint { northing, easting })
}

/// Converts a SWEREF 99 TM point back to WGS84.
///
/// # Errors
///
/// Returns `CoordError` if the point lies outside the supported grid
/// (easting 200 000–1 000 000 m, northing 6 100 000–7 700 000 m).
pub fn to_wgs84(projected: SwerefPoint) -> Result<GeoPoint, CoordError> {
    if !(MIN_NORTHING..=MAX_NORTHING).contains(&projected.northing) {
        return Err(CoordError::InvalidNorthing(projected.northing));
    }
    if !(MIN_EASTING..=MAX_EASTING).contains(&projected.easting) {
        return Err(CoordError::InvalidEasting(projected.easting));
    }

    let e2 = FLATTENING * (2.0 - FLATTENING);
    let n = FLATTENING / (2.0 - FLATTENING);
    let a_roof = AXIS / (1.0 + n) * (1.0 + n * n / 4.0 + n.powi(4) / 64.0);

    let xi = (projected.northing - FALSE_NORTHING) / (SCALE * a_roof);
    let eta = (projected.easting - FALSE_EASTING) / (SCALE * a_roof);

    let delta1 = n / 2.0 - 2.0 * n.powi(2) / 3.0 + 37.0 * n.powi(3) / 96.0 - n.powi(4) / 360.0;
    let delta2 = n.powi(2) / 48.0 + n.powi(3) / 15.0 - 437.0 * n.powi(4) / 1440.0;
    let delta3 = 17.0 * n.powi(3) / 480.0 - 37.0 * n.powi(4) / 840.0;
    let delta4 = 4397.0 * n.powi(4) / 161_280.0;

    let xi_prime = xi
        - delta1 * (2.0 * xi).sin() * (2.0 * eta).cosh()
        - delta2 * (4.0 * xi).sin() * (4.0 * eta).cosh()
        - delta3 * (6.0 * xi).sin() * (6.0 * eta).cosh()
        - delta4 * (8.0 * xi).sin() * (8.0 * eta).cosh();
    let eta_prime = eta
        - delta1 * (2.0 * xi).cos() * (2.0 * eta).sinh()
        - delta2 * (4.0 * xi).cos() * (4.0 * eta).sinh()
        - delta3 * (6.0 * xi).cos() * (6.0 * eta).sinh()
        - delta4 * (8.0 * xi).cos() * (8.0 * eta).sinh();

    let phi_star = (xi_prime.sin() / eta_prime.cosh()).asin();
    let delta_lambda = (eta_prime.sinh() / xi_prime.cos()).atan();

    // Conformal latitude back to geodetic latitude.
    let a_star = e2 + e2.powi(2) + e2.powi(3) + e2.powi(4);
    let b_star = -(7.0 * e2.powi(2) + 17.0 * e2.powi(3) + 30.0 * e2.powi(4)) / 6.0;
    let c_star = (224.0 * e2.powi(3) + 889.0 * e2.powi(4)) / 120.0;
    let d_star = -4279.0 * e2.powi(4) / 1260.0;

    let sin_phi_star = phi_star.sin();
    let phi = phi_star
        + sin_phi_star
            * phi_star.cos()
            * (a_star
                + b_star * sin_phi_star.powi(2)
                + c_star * sin_phi_star.powi(4)
                + d_star * sin_phi_star.powi(6));
    let lambda = CENTRAL_MERIDIAN.to_radians() + delta_lambda;

    Ok(GeoPoint {
        lat: phi.to_degrees(),
        lon: lambda.to_degrees(),
    })
}

/// Resolves a tagged position to SWEREF 99 TM, validating either way.
pub fn position_to_sweref(position: Position) -> Result<SwerefPoint, CoordError> {
    match position {
        Position::Geographic(geo) => to_sweref(geo),
        Position::Projected(p) => {
            // Range check only; the converted value is discarded.
            to_wgs84(p)?;
            Ok(p)
        }
    }
}

/// Resolves a tagged position to WGS84, validating either way.
pub fn position_to_wgs84(position: Position) -> Result<GeoPoint, CoordError> {
    match position {
        Position::Geographic(geo) => {
            to_sweref(geo)?;
            Ok(geo)
        }
        Position::Projected(p) => to_wgs84(p),
    }
}

/// Converts a WGS84 bounding box to SWEREF 99 TM corner-wise.
///
/// # Errors
///
/// Returns `CoordError::InvalidBounds` if min >= max on either axis, or
/// the corner conversion errors if a corner is out of range.
pub fn bounds_to_sweref(bounds: GeoBounds) -> Result<SwerefBounds, CoordError> {
    if bounds.min_lat >= bounds.max_lat {
        return Err(CoordError::InvalidBounds {
            axis: "latitude",
            min: bounds.min_lat,
            max: bounds.max_lat,
        });
    }
    if bounds.min_lon >= bounds.max_lon {
        return Err(CoordError::InvalidBounds {
            axis: "longitude",
            min: bounds.min_lon,
            max: bounds.max_lon,
        });
    }

    let lower = to_sweref(bounds.lower())?;
    let upper = to_sweref(bounds.upper())?;

    Ok(SwerefBounds {
        min_northing: lower.northing,
        min_easting: lower.easting,
        max_northing: upper.northing,
        max_easting: upper.easting,
    })
}

/// Converts a SWEREF 99 TM bounding box to WGS84 corner-wise.
pub fn bounds_to_wgs84(bounds: SwerefBounds) -> Result<GeoBounds, CoordError> {
    if bounds.min_northing >= bounds.max_northing {
        return Err(CoordError::InvalidBounds {
            axis: "northing",
            min: bounds.min_northing,
            max: bounds.max_northing,
        });
    }
    if bounds.min_easting >= bounds.max_easting {
        return Err(CoordError::InvalidBounds {
            axis: "easting",
            min: bounds.min_easting,
            max: bounds.max_easting,
        });
    }

    let lower = to_wgs84(bounds.lower())?;
    let upper = to_wgs84(bounds.upper())?;

    Ok(GeoBounds {
        min_lat: lower.lat,
        min_lon: lower.lon,
        max_lat: upper.lat,
        max_lon: upper.lon,
    })
}
