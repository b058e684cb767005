//! Place-name resolution for midway.
//!
//! Provides free-text geocoding through Nominatim with a built-in fallback
//! dataset and fuzzy matching, plus direct "lat, lon" input.

pub mod providers;
pub mod resolver;
pub mod types;

pub use providers::{builtin_city_list, format_coords, CityInfo};
pub use resolver::LocationResolver;
pub use types::{Geocoder, LocationError, LocationSource, ResolveOptions, ResolvedLocation};
