//! midway: distance and midpoint between two places.
//!
//! Places are resolved to coordinates ([`location`]), measured with the
//! geodesy core ([`geodesy`]), summarized as a [`trip::TripReport`] and
//! drawn on a map ([`render`]). The same pipeline is exposed over HTTP by
//! [`server`].

pub mod geodesy;
pub mod location;
pub mod prompt;
pub mod render;
pub mod server;
pub mod trip;

pub use geodesy::{distance, midpoint, Distance, DistanceUnit, EarthModel, GeoCoordinate, GeoError};
pub use trip::{measure, TripReport};
