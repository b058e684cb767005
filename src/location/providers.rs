//! Location providers: Nominatim and the built-in fallback dataset.

use super::types::{LocationError, LocationSource, ResolvedLocation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─── Built-in dataset ───────────────────────────────────────────

struct BuiltinCity {
    names: &'static [&'static str], // canonical + aliases
    lat: f64,
    lon: f64,
    country_code: &'static str,
}

const BUILTIN_CITIES: &[BuiltinCity] = &[
    BuiltinCity { names: &["new york", "newyork", "nyc"], lat: 40.7128, lon: -74.0060, country_code: "US" },
    BuiltinCity { names: &["london"], lat: 51.5074, lon: -0.1278, country_code: "GB" },
    BuiltinCity { names: &["paris"], lat: 48.8566, lon: 2.3522, country_code: "FR" },
    BuiltinCity { names: &["berlin"], lat: 52.5200, lon: 13.4050, country_code: "DE" },
    BuiltinCity { names: &["madrid"], lat: 40.4168, lon: -3.7038, country_code: "ES" },
    BuiltinCity { names: &["rome", "roma"], lat: 41.9028, lon: 12.4964, country_code: "IT" },
    BuiltinCity { names: &["lisbon", "lisboa"], lat: 38.7223, lon: -9.1393, country_code: "PT" },
    BuiltinCity { names: &["stockholm"], lat: 59.3293, lon: 18.0686, country_code: "SE" },
    BuiltinCity { names: &["oslo"], lat: 59.9139, lon: 10.7522, country_code: "NO" },
    BuiltinCity { names: &["reykjavik", "reykjavík"], lat: 64.1466, lon: -21.9426, country_code: "IS" },
    BuiltinCity { names: &["moscow", "moskva"], lat: 55.7558, lon: 37.6173, country_code: "RU" },
    BuiltinCity { names: &["istanbul"], lat: 41.0082, lon: 28.9784, country_code: "TR" },
    BuiltinCity { names: &["cairo", "al-qahirah"], lat: 30.0444, lon: 31.2357, country_code: "EG" },
    BuiltinCity { names: &["lagos"], lat: 6.5244, lon: 3.3792, country_code: "NG" },
    BuiltinCity { names: &["nairobi"], lat: -1.2921, lon: 36.8219, country_code: "KE" },
    BuiltinCity { names: &["cape town", "kaapstad"], lat: -33.9249, lon: 18.4241, country_code: "ZA" },
    BuiltinCity { names: &["dubai"], lat: 25.2048, lon: 55.2708, country_code: "AE" },
    BuiltinCity { names: &["mumbai", "bombay"], lat: 19.0760, lon: 72.8777, country_code: "IN" },
    BuiltinCity { names: &["delhi", "new delhi"], lat: 28.6139, lon: 77.2090, country_code: "IN" },
    BuiltinCity { names: &["bangkok"], lat: 13.7563, lon: 100.5018, country_code: "TH" },
    BuiltinCity { names: &["singapore"], lat: 1.3521, lon: 103.8198, country_code: "SG" },
    BuiltinCity { names: &["beijing", "peking"], lat: 39.9042, lon: 116.4074, country_code: "CN" },
    BuiltinCity { names: &["tokyo"], lat: 35.6762, lon: 139.6503, country_code: "JP" },
    BuiltinCity { names: &["sydney"], lat: -33.8688, lon: 151.2093, country_code: "AU" },
    BuiltinCity { names: &["auckland"], lat: -36.8485, lon: 174.7633, country_code: "NZ" },
    BuiltinCity { names: &["honolulu"], lat: 21.3069, lon: -157.8583, country_code: "US" },
    BuiltinCity { names: &["los angeles", "la"], lat: 34.0522, lon: -118.2437, country_code: "US" },
    BuiltinCity { names: &["chicago"], lat: 41.8781, lon: -87.6298, country_code: "US" },
    BuiltinCity { names: &["toronto"], lat: 43.6532, lon: -79.3832, country_code: "CA" },
    BuiltinCity { names: &["mexico city", "ciudad de mexico", "cdmx"], lat: 19.4326, lon: -99.1332, country_code: "MX" },
    BuiltinCity { names: &["bogota", "bogotá"], lat: 4.7110, lon: -74.0721, country_code: "CO" },
    BuiltinCity { names: &["lima"], lat: -12.0464, lon: -77.0428, country_code: "PE" },
    BuiltinCity { names: &["sao paulo", "são paulo"], lat: -23.5505, lon: -46.6333, country_code: "BR" },
    BuiltinCity { names: &["buenos aires"], lat: -34.6037, lon: -58.3816, country_code: "AR" },
];

/// Compute edit distance between two strings (Levenshtein).
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut curr = Vec::with_capacity(b.len() + 1);
        curr.push(i + 1);
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr.push(substitution.min(prev[j + 1] + 1).min(curr[j] + 1));
        }
        prev = curr;
    }
    prev[b.len()]
}

/// Search the built-in dataset: exact name, then word prefix, then a close misspelling.
pub fn builtin_lookup(query: &str, country: Option<&str>) -> Option<ResolvedLocation> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }
    let country_filter = country.map(|c| c.to_uppercase());

    let candidates: Vec<&BuiltinCity> = BUILTIN_CITIES
        .iter()
        .filter(|c| country_filter.as_deref().map_or(true, |cc| c.country_code == cc))
        .collect();

    let names = || candidates.iter().flat_map(|c| c.names.iter().map(move |n| (*c, *n)));

    if let Some((city, _)) = names().find(|(_, name)| *name == q) {
        return Some(builtin_to_resolved(city, 0.95));
    }

    // Very short queries ("la") only match exactly; prefixes of them are noise
    if q.chars().count() >= 3 {
        if let Some((city, _)) = names().find(|(_, name)| is_word_prefix(&q, name)) {
            return Some(builtin_to_resolved(city, 0.85));
        }
    }

    // A longer query that merely contains a city name is a different place
    let q_len = q.chars().count();
    names()
        .filter(|(_, name)| q_len.abs_diff(name.chars().count()) <= 1)
        .map(|(city, name)| (city, edit_distance(&q, name)))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(city, _)| builtin_to_resolved(city, 0.75))
}

/// "buenos" and "aires" both start a word of "buenos aires"; "limassol" starts none of "lima".
fn is_word_prefix(query: &str, name: &str) -> bool {
    name.starts_with(query) || name.split(' ').any(|word| word.starts_with(query))
}

fn builtin_to_resolved(city: &BuiltinCity, confidence: f64) -> ResolvedLocation {
    ResolvedLocation {
        name: city.names[0].to_string(),
        query: String::new(),
        lat: city.lat,
        lon: city.lon,
        source: LocationSource::Fallback,
        display_name: None,
        country_code: Some(city.country_code.to_string()),
        resolver_confidence: confidence,
    }
}

/// A city entry for the public city list API.
#[derive(Debug, Clone, Serialize)]
pub struct CityInfo {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Return the full built-in city list.
pub fn builtin_city_list() -> Vec<CityInfo> {
    BUILTIN_CITIES
        .iter()
        .map(|c| CityInfo {
            name: c.names[0].to_string(),
            country: c.country_code.to_string(),
            lat: c.lat,
            lon: c.lon,
        })
        .collect()
}

/// "40.7128°N, 74.0060°W"
pub fn format_coords(lat: f64, lon: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", lat.abs(), ns, lon.abs(), ew)
}

// ─── Nominatim provider ─────────────────────────────────────────

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = concat!("Midway/", env!("CARGO_PKG_VERSION"), " (distance-midpoint)");
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize, Debug, Clone)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    #[serde(default)]
    pub importance: Option<f64>,
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    #[serde(default, rename = "class")]
    pub place_class: Option<String>,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NominatimAddress {
    #[serde(default)]
    pub country_code: Option<String>,
}

/// A scored Nominatim candidate.
#[derive(Debug, Clone)]
pub struct NominatimCandidate {
    pub name: String,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub country_code: Option<String>,
    pub score: f64,
}

// ─── Scoring weights ─────────────────────────────────────────────

const W_IMPORTANCE: f64 = 0.5;
const W_TYPE: f64 = 0.3;
const W_NAME: f64 = 0.2;

fn type_rank(place_class: &str, place_type: &str) -> f64 {
    match (place_class, place_type) {
        ("place", "city") | ("boundary", "administrative") => 1.0,
        ("place", "town") => 0.8,
        ("place", "village") | ("place", "suburb") => 0.5,
        ("place", "hamlet") => 0.3,
        _ => 0.5,
    }
}

fn name_similarity(query: &str, display_name: &str) -> f64 {
    let q = query.trim().to_lowercase();
    let first = display_name.split(',').next().unwrap_or("").trim().to_lowercase();
    if first == q {
        1.0
    } else if first.contains(&q) || q.contains(&first) {
        0.8
    } else if edit_distance(&q, &first) <= 2 {
        0.6
    } else {
        0.3
    }
}

fn score_candidate(query: &str, r: &NominatimResult) -> Result<NominatimCandidate, LocationError> {
    let lat: f64 = r
        .lat
        .parse()
        .map_err(|_| LocationError::InvalidResponse(format!("bad lat '{}'", r.lat)))?;
    let lon: f64 = r
        .lon
        .parse()
        .map_err(|_| LocationError::InvalidResponse(format!("bad lon '{}'", r.lon)))?;

    let score = W_IMPORTANCE * r.importance.unwrap_or(0.3)
        + W_TYPE * type_rank(
            r.place_class.as_deref().unwrap_or("unknown"),
            r.place_type.as_deref().unwrap_or("unknown"),
        )
        + W_NAME * name_similarity(query, &r.display_name);

    Ok(NominatimCandidate {
        name: r.display_name.split(',').next().unwrap_or(query).trim().to_string(),
        display_name: r.display_name.clone(),
        lat,
        lon,
        country_code: r
            .address
            .as_ref()
            .and_then(|a| a.country_code.as_ref())
            .map(|cc| cc.to_uppercase()),
        score,
    })
}

/// Rank raw Nominatim results, best first.
pub fn rank_candidates(query: &str, results: &[NominatimResult]) -> Result<Vec<NominatimCandidate>, LocationError> {
    let mut candidates = results
        .iter()
        .map(|r| score_candidate(query, r))
        .collect::<Result<Vec<_>, _>>()?;
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(candidates)
}

/// Resolve a place via OpenStreetMap Nominatim.
pub fn nominatim_resolve(query: &str, country_hint: Option<&str>) -> Result<ResolvedLocation, LocationError> {
    let mut request = ureq::get(NOMINATIM_URL)
        .set("User-Agent", USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .query("q", query)
        .query("format", "json")
        .query("limit", "5")
        .query("addressdetails", "1");
    if let Some(cc) = country_hint {
        request = request.query("countrycodes", &cc.to_lowercase());
    }

    let response = request.call().map_err(|e| match e {
        ureq::Error::Status(code, _) => LocationError::Network(format!("Nominatim returned HTTP {}", code)),
        other => LocationError::Network(other.to_string()),
    })?;

    let results: Vec<NominatimResult> = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    let top = rank_candidates(query, &results)?
        .into_iter()
        .next()
        .ok_or_else(|| LocationError::NotFound(query.to_string()))?;

    log::debug!("nominatim: '{}' -> {} (score {:.3})", query, top.display_name, top.score);

    Ok(ResolvedLocation {
        name: top.name,
        query: String::new(),
        lat: top.lat,
        lon: top.lon,
        source: LocationSource::Nominatim,
        display_name: Some(top.display_name),
        country_code: top.country_code,
        resolver_confidence: top.score.min(1.0),
    })
}
