//! Value types shared by the distance and midpoint calculators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on the Earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    /// Build a coordinate, rejecting anything outside lat -90..90 / lon -180..180.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        let c = Self { lat, lon };
        c.validate()?;
        Ok(c)
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Parses `"40.7128, -74.0060"`. Surrounding parentheses are tolerated.
impl FromStr for GeoCoordinate {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (lat, lon) = trimmed
            .split_once(',')
            .ok_or_else(|| GeoError::Unparseable(s.to_string()))?;
        let lat: f64 = lat.trim().parse().map_err(|_| GeoError::Unparseable(s.to_string()))?;
        let lon: f64 = lon.trim().parse().map_err(|_| GeoError::Unparseable(s.to_string()))?;
        Self::new(lat, lon)
    }
}

/// The closed set of units a distance can be reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
    Feet,
    Miles,
}

const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_MILE: f64 = 1609.344;

impl DistanceUnit {
    /// Prompt order, matching the short symbols offered to users.
    pub const ALL: [DistanceUnit; 4] = [Self::Kilometers, Self::Feet, Self::Meters, Self::Miles];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kilometers => "km",
            Self::Meters => "m",
            Self::Feet => "ft",
            Self::Miles => "mi",
        }
    }

    /// Exact length of one unit in meters.
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Kilometers => METERS_PER_KILOMETER,
            Self::Meters => 1.0,
            Self::Feet => METERS_PER_FOOT,
            Self::Miles => METERS_PER_MILE,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DistanceUnit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(Self::Kilometers),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meters),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            _ => Err(GeoError::UnsupportedUnit(s.to_string())),
        }
    }
}

/// A non-negative length tagged with the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn from_meters(meters: f64, unit: DistanceUnit) -> Self {
        Self { value: meters / unit.meters_per_unit(), unit }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}

/// Which Earth figure distances are measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarthModel {
    /// Haversine on the mean Earth radius.
    #[default]
    Sphere,
    /// Geodesic on the WGS-84 ellipsoid.
    Wgs84,
}

impl fmt::Display for EarthModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sphere => write!(f, "sphere"),
            Self::Wgs84 => write!(f, "wgs84"),
        }
    }
}

impl FromStr for EarthModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sphere" | "spherical" | "haversine" => Ok(Self::Sphere),
            "wgs84" | "ellipsoid" | "geodesic" => Ok(Self::Wgs84),
            _ => Err(format!("Unknown earth model '{}'. Use 'sphere' or 'wgs84'.", s)),
        }
    }
}

/// The box spanned by two points: south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: GeoCoordinate,
    pub north_east: GeoCoordinate,
}

impl Bounds {
    pub fn enclosing(a: GeoCoordinate, b: GeoCoordinate) -> Self {
        Self {
            south_west: GeoCoordinate { lat: a.lat.min(b.lat), lon: a.lon.min(b.lon) },
            north_east: GeoCoordinate { lat: a.lat.max(b.lat), lon: a.lon.max(b.lon) },
        }
    }
}

/// Geodesy errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    InvalidCoordinate { lat: f64, lon: f64 },
    Unparseable(String),
    UnsupportedUnit(String),
    /// Antipodal (or numerically indistinguishable) pair: the midpoint is undefined.
    DegenerateInput { a: GeoCoordinate, b: GeoCoordinate },
    GeodesicFailure(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { lat, lon } => write!(
                f,
                "Invalid coordinate ({}, {}). Lat: -90..90, Lon: -180..180",
                lat, lon
            ),
            Self::Unparseable(s) => write!(f, "Cannot parse '{}' as 'lat, lon'", s),
            Self::UnsupportedUnit(u) => write!(
                f,
                "Unsupported unit '{}'. Use one of: km, m, ft, mi",
                u
            ),
            Self::DegenerateInput { a, b } => write!(
                f,
                "Points ({}) and ({}) are antipodal; the midpoint is undefined",
                a, b
            ),
            Self::GeodesicFailure(msg) => write!(f, "Geodesic computation failed: {}", msg),
        }
    }
}

impl std::error::Error for GeoError {}
