//! Surface distance between two coordinates.
//!
//! Computed in meters, then converted into the requested unit with the exact
//! factors from [`DistanceUnit::meters_per_unit`].

use geo::{GeodesicDistance, Point};

use super::types::{Distance, DistanceUnit, EarthModel, GeoCoordinate, GeoError};

/// IUGG mean Earth radius, meters.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance on the mean-radius sphere.
pub fn distance(a: GeoCoordinate, b: GeoCoordinate, unit: DistanceUnit) -> Result<Distance, GeoError> {
    distance_with_model(a, b, unit, EarthModel::Sphere)
}

pub fn distance_with_model(
    a: GeoCoordinate,
    b: GeoCoordinate,
    unit: DistanceUnit,
    model: EarthModel,
) -> Result<Distance, GeoError> {
    a.validate()?;
    b.validate()?;

    let meters = match model {
        EarthModel::Sphere => haversine_meters(a, b),
        EarthModel::Wgs84 => {
            // geo points are (x = lon, y = lat)
            let pa = Point::new(a.lon, a.lat);
            let pb = Point::new(b.lon, b.lat);
            pa.geodesic_distance(&pb)
        }
    };

    if !meters.is_finite() || meters < 0.0 {
        return Err(GeoError::GeodesicFailure(format!(
            "non-finite distance between ({}) and ({})",
            a, b
        )));
    }

    Ok(Distance::from_meters(meters, unit))
}

fn haversine_meters(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push h a hair past 1 for near-antipodal points
    2.0 * MEAN_EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
