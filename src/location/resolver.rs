//! Location resolver: orchestrates the fallback chain.
//!
//! Coordinates literal → Nominatim → simplified query → built-in dataset → error

use super::providers;
use super::types::{Geocoder, LocationError, LocationSource, ResolveOptions, ResolvedLocation};
use crate::geodesy::{GeoCoordinate, GeoError};

/// The location resolver with its fallback pipeline.
#[derive(Debug, Default)]
pub struct LocationResolver {
    opts: ResolveOptions,
    offline: bool,
}

impl LocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(opts: ResolveOptions) -> Self {
        Self { opts, offline: false }
    }

    /// Set offline mode (no network calls).
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Resolve with per-call options, overriding the resolver's own.
    pub fn resolve_with_opts(
        &mut self,
        query: &str,
        opts: &ResolveOptions,
    ) -> Result<ResolvedLocation, LocationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LocationError::NoInput);
        }
        let mut loc = self.lookup(query, opts)?;
        loc.query = query.to_string();
        Ok(loc)
    }

    fn lookup(&self, query: &str, opts: &ResolveOptions) -> Result<ResolvedLocation, LocationError> {
        let country_hint = opts.country.as_deref().or(self.opts.country.as_deref());

        // 1. Raw "lat, lon"
        match query.parse::<GeoCoordinate>() {
            Ok(c) => return Ok(Self::from_coordinate(c)),
            Err(GeoError::Unparseable(_)) => {}
            // Looked like coordinates but out of range; not a place name either
            Err(e) => return Err(LocationError::InvalidCoordinates(e)),
        }

        if !self.offline {
            // 2. Nominatim
            match providers::nominatim_resolve(query, country_hint) {
                Ok(loc) => return Ok(loc),
                Err(e) => log::info!("nominatim lookup for '{}' failed: {}", query, e),
            }

            // 3. Simplified query
            let simplified = simplify_query(query);
            if simplified != query.to_lowercase() {
                match providers::nominatim_resolve(&simplified, country_hint) {
                    Ok(loc) => return Ok(loc),
                    Err(e) => log::info!("nominatim retry for '{}' failed: {}", simplified, e),
                }
            }
        }

        // 4. Built-in dataset (always available)
        if let Some(loc) = providers::builtin_lookup(&simplify_query(query), country_hint) {
            log::debug!("built-in match for '{}': {}", query, loc.name);
            return Ok(loc);
        }

        Err(LocationError::NotFound(query.to_string()))
    }

    /// A location taken verbatim from a coordinate pair.
    pub fn from_coordinate(c: GeoCoordinate) -> ResolvedLocation {
        ResolvedLocation {
            name: format!("{:.4}, {:.4}", c.lat, c.lon),
            query: String::new(),
            lat: c.lat,
            lon: c.lon,
            source: LocationSource::Coordinates,
            display_name: None,
            country_code: None,
            resolver_confidence: 1.0,
        }
    }
}

impl Geocoder for LocationResolver {
    fn resolve(&mut self, query: &str) -> Result<ResolvedLocation, LocationError> {
        let opts = self.opts.clone();
        self.resolve_with_opts(query, &opts)
    }
}

/// Simplify a query for retry: lowercase, strip accents/diacritics, collapse spaces.
fn simplify_query(q: &str) -> String {
    q.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_resolver() -> LocationResolver {
        let mut resolver = LocationResolver::new();
        resolver.set_offline(true);
        resolver
    }

    #[test]
    fn test_resolve_builtin_fallback() {
        let mut resolver = offline_resolver();
        let loc = resolver.resolve("London").unwrap();
        assert_eq!(loc.source, LocationSource::Fallback);
        assert!((loc.lat - 51.5074).abs() < 0.01);
    }

    #[test]
    fn test_resolve_keeps_typed_query() {
        let mut resolver = offline_resolver();
        let loc = resolver.resolve("  New York ").unwrap();
        assert_eq!(loc.name, "new york");
        assert_eq!(loc.query, "New York");
        assert_eq!(loc.label(), "New York");
    }

    #[test]
    fn test_resolve_rejects_names_containing_a_city() {
        let mut resolver = offline_resolver();
        for query in ["Limassol", "Romania", "Parisot"] {
            assert!(
                matches!(resolver.resolve(query), Err(LocationError::NotFound(_))),
                "'{}' should not resolve offline",
                query
            );
        }
    }

    #[test]
    fn test_resolve_coordinates() {
        let mut resolver = offline_resolver();
        let loc = resolver.resolve(" 40.7128, -74.0060 ").unwrap();
        assert_eq!(loc.source, LocationSource::Coordinates);
        assert_eq!(loc.name, "40.7128, -74.0060");
        assert!((loc.lon + 74.006).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_out_of_range_coordinates() {
        let mut resolver = offline_resolver();
        assert!(matches!(
            resolver.resolve("120, 10"),
            Err(LocationError::InvalidCoordinates(GeoError::InvalidCoordinate { .. }))
        ));
    }

    #[test]
    fn test_resolve_not_found() {
        let mut resolver = offline_resolver();
        let result = resolver.resolve("xyznonexistentcity123");
        assert!(matches!(result, Err(LocationError::NotFound(q)) if q == "xyznonexistentcity123"));
    }

    #[test]
    fn test_resolve_empty() {
        let mut resolver = offline_resolver();
        assert!(matches!(resolver.resolve("   "), Err(LocationError::NoInput)));
    }

    #[test]
    fn test_resolve_accented() {
        let mut resolver = offline_resolver();
        let loc = resolver.resolve("São  Paulo").unwrap();
        assert_eq!(loc.name, "sao paulo");
    }

    #[test]
    fn test_resolve_country_option() {
        let mut resolver = LocationResolver::with_options(ResolveOptions { country: Some("US".into()) });
        resolver.set_offline(true);
        assert_eq!(resolver.resolve("LA").unwrap().name, "los angeles");
        assert!(resolver.resolve("Paris").is_err());

        let opts = ResolveOptions { country: Some("FR".into()) };
        assert_eq!(resolver.resolve_with_opts("Paris", &opts).unwrap().country_code.as_deref(), Some("FR"));
    }

    #[test]
    fn test_simplify_query() {
        assert_eq!(simplify_query("Tromsø"), "tromso");
        assert_eq!(simplify_query("São Paulo"), "sao paulo");
        assert_eq!(simplify_query("  Multiple   Spaces  "), "multiple spaces");
    }
}
