//! Geodesy core: surface distance and great-circle midpoint.
//!
//! Everything here is a pure function of its inputs. Coordinates are checked
//! on every call and units only ever come from the closed [`DistanceUnit`] set.

pub mod distance;
pub mod midpoint;
pub mod types;

pub use distance::{distance, distance_with_model, MEAN_EARTH_RADIUS_M};
pub use midpoint::{midpoint, normalize_longitude};
pub use types::{Bounds, Distance, DistanceUnit, EarthModel, GeoCoordinate, GeoError};
