//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geodesy::{GeoCoordinate, GeoError};

/// How a location was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    /// The query itself was a "lat, lon" pair.
    Coordinates,
    Nominatim,
    Fallback,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates => write!(f, "Coordinates"),
            Self::Nominatim => write!(f, "Nominatim"),
            Self::Fallback => write!(f, "Built-in"),
        }
    }
}

/// A place name resolved to coordinates, with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    /// The text the place was resolved from, as typed.
    #[serde(default)]
    pub query: String,
    pub lat: f64,
    pub lon: f64,
    pub source: LocationSource,
    /// Full display name from provider (e.g. "London, Greater London, England, United Kingdom")
    #[serde(default)]
    pub display_name: Option<String>,
    /// ISO 3166-1 alpha-2 country code (e.g. "GB")
    #[serde(default)]
    pub country_code: Option<String>,
    /// Resolver confidence score (0.0 to 1.0)
    #[serde(default = "default_confidence")]
    pub resolver_confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl ResolvedLocation {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate { lat: self.lat, lon: self.lon }
    }

    /// The typed query, or the resolved name when there is none.
    pub fn label(&self) -> &str {
        if self.query.is_empty() {
            &self.name
        } else {
            &self.query
        }
    }

    pub fn display_line(&self) -> String {
        let country_part = match &self.country_code {
            Some(cc) => format!(" ({})", cc),
            None => String::new(),
        };
        format!(
            "{}{} [{}] \u{2014} {}",
            self.name,
            country_part,
            self.source,
            super::providers::format_coords(self.lat, self.lon)
        )
    }
}

/// Options for place resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// ISO 3166-1 alpha-2 country code hint (e.g. "GB")
    pub country: Option<String>,
}

/// Location resolution errors.
#[derive(Debug)]
pub enum LocationError {
    Network(String),
    NotFound(String),
    InvalidResponse(String),
    /// Input parsed as coordinates but was out of range.
    InvalidCoordinates(GeoError),
    NoInput,
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::NotFound(q) => write!(f, "Location not found: '{}'", q),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
            Self::InvalidCoordinates(e) => write!(f, "{}", e),
            Self::NoInput => write!(f, "No location specified"),
        }
    }
}

impl std::error::Error for LocationError {}

/// Anything that turns a free-text place description into coordinates.
pub trait Geocoder {
    fn resolve(&mut self, query: &str) -> Result<ResolvedLocation, LocationError>;
}
