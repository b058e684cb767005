//! Great-circle midpoint by unit-vector averaging.
//!
//! The two points are treated as unit vectors, summed, and the sum projected
//! back onto the sphere. On a sphere this lands on the great-circle path,
//! equidistant from both ends. It is not a bisection of the WGS-84 geodesic,
//! which is fine for centering a map but not for navigation.

use super::types::{GeoCoordinate, GeoError};

/// Below this length the summed vector has no usable direction.
const DEGENERATE_EPSILON: f64 = 1e-9;
const WRAP_EPSILON: f64 = 1e-9;

pub fn midpoint(a: GeoCoordinate, b: GeoCoordinate) -> Result<GeoCoordinate, GeoError> {
    a.validate()?;
    b.validate()?;

    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let lon_a = a.lon.to_radians();
    // sin/cos of the delta are periodic, so a delta crossing ±180° still takes the short way
    let dlon = (b.lon - a.lon).to_radians();

    let bx = lat_b.cos() * dlon.cos();
    let by = lat_b.cos() * dlon.sin();

    let x = lat_a.cos() + bx;
    let z = lat_a.sin() + lat_b.sin();

    if (x * x + by * by + z * z).sqrt() < DEGENERATE_EPSILON {
        return Err(GeoError::DegenerateInput { a, b });
    }

    let lat_mid = z.atan2((x * x + by * by).sqrt());
    let lon_mid = lon_a + by.atan2(x);

    let mut lon = normalize_longitude(lon_mid.to_degrees());
    // The seam comes out as +180 or -180 depending on argument order; report it as +180
    if lon.abs() >= 180.0 - WRAP_EPSILON {
        lon = 180.0;
    }

    Ok(GeoCoordinate { lat: lat_mid.to_degrees(), lon })
}

/// Wrap a longitude into [-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    // absorb radian round-trip noise at the seam
    if (-180.0 - WRAP_EPSILON..=180.0 + WRAP_EPSILON).contains(&lon) {
        return lon.clamp(-180.0, 180.0);
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 onto -180; keep the sign of the input
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::distance::distance;
    use crate::geodesy::types::DistanceUnit;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate { lat, lon }
    }

    #[test]
    fn test_new_york_london() {
        let m = midpoint(coord(40.7128, -74.0060), coord(51.5074, -0.1278)).unwrap();
        println!("NY-London midpoint: {}", m);
        assert!((m.lat - 52.37).abs() < 0.05);
        assert!((m.lon - -41.29).abs() < 0.05);
    }

    #[test]
    fn test_equator() {
        let m = midpoint(coord(0.0, 0.0), coord(0.0, 90.0)).unwrap();
        assert_abs_diff_eq!(m.lat, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.lon, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_same_point() {
        for p in [coord(40.7128, -74.006), coord(-33.8688, 151.2093), coord(0.0, 180.0), coord(-89.0, 12.0)] {
            let m = midpoint(p, p).unwrap();
            assert_abs_diff_eq!(m.lat, p.lat, epsilon = 1e-9);
            assert_abs_diff_eq!(m.lon, p.lon, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            (coord(40.7128, -74.006), coord(51.5074, -0.1278)),
            (coord(59.3293, 18.0686), coord(-33.8688, 151.2093)),
            (coord(10.0, 170.0), coord(20.0, -170.0)),
        ];
        for (a, b) in pairs {
            let ab = midpoint(a, b).unwrap();
            let ba = midpoint(b, a).unwrap();
            assert_abs_diff_eq!(ab.lat, ba.lat, epsilon = 1e-9);
            assert_abs_diff_eq!(ab.lon, ba.lon, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_symmetric_on_antimeridian() {
        for (a, b) in [
            (coord(30.0, 170.0), coord(30.0, -170.0)),
            (coord(0.0, 179.0), coord(0.0, -179.0)),
            (coord(-45.0, -180.0), coord(-45.0, 180.0)),
        ] {
            let ab = midpoint(a, b).unwrap();
            let ba = midpoint(b, a).unwrap();
            assert_eq!(ab.lon, 180.0);
            assert_eq!(ba.lon, 180.0);
            assert_abs_diff_eq!(ab.lat, ba.lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_equidistant_from_both_ends() {
        let a = coord(59.3293, 18.0686);
        let b = coord(35.6762, 139.6503);
        let m = midpoint(a, b).unwrap();
        let da = distance(a, m, DistanceUnit::Meters).unwrap();
        let db = distance(m, b, DistanceUnit::Meters).unwrap();
        let total = distance(a, b, DistanceUnit::Meters).unwrap();
        assert_relative_eq!(da.value, db.value, max_relative = 1e-9);
        assert_relative_eq!(da.value + db.value, total.value, max_relative = 1e-9);
    }

    #[test]
    fn test_crosses_antimeridian_short_way() {
        let m = midpoint(coord(10.0, 170.0), coord(20.0, -170.0)).unwrap();
        assert!(m.lon.abs() > 179.0, "expected near ±180, got {}", m.lon);
        assert!((m.lat - 15.22).abs() < 0.01);
    }

    #[test]
    fn test_output_longitude_normalized() {
        let m = midpoint(coord(0.0, 175.0), coord(0.0, -165.0)).unwrap();
        assert!((-180.0..=180.0).contains(&m.lon));
        assert_abs_diff_eq!(m.lon, -175.0, epsilon = 1e-9);
    }

    #[test]
    fn test_poles() {
        let m = midpoint(coord(90.0, 0.0), coord(90.0, 50.0)).unwrap();
        assert_abs_diff_eq!(m.lat, 90.0, epsilon = 1e-9);

        let m = midpoint(coord(90.0, 0.0), coord(0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(m.lat, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_antipodal_equator() {
        let err = midpoint(coord(0.0, 0.0), coord(0.0, 180.0)).unwrap_err();
        assert!(matches!(err, GeoError::DegenerateInput { .. }));
    }

    #[test]
    fn test_antipodal_general() {
        let a = coord(40.7128, -74.006);
        let b = coord(-40.7128, 105.994);
        assert!(matches!(midpoint(a, b), Err(GeoError::DegenerateInput { .. })));
        assert!(matches!(
            midpoint(coord(90.0, 0.0), coord(-90.0, 0.0)),
            Err(GeoError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            midpoint(coord(0.0, 0.0), coord(0.0, 200.0)),
            Err(GeoError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(45.0), 45.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
        assert_abs_diff_eq!(normalize_longitude(190.0), -170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_longitude(-190.0), 170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_longitude(540.0), 180.0, epsilon = 1e-12);
    }
}
