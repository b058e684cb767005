use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::geodesy::{DistanceUnit, EarthModel, GeoError};
use crate::location::{builtin_city_list, CityInfo, LocationError, ResolveOptions, ResolvedLocation};
use crate::render::render_map;
use crate::trip::{measure, TripReport};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

impl From<GeoError> for ApiError {
    fn from(e: GeoError) -> Self {
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        let status = match e {
            LocationError::NotFound(_) => StatusCode::NOT_FOUND,
            LocationError::Network(_) | LocationError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            LocationError::InvalidCoordinates(_) | LocationError::NoInput => StatusCode::BAD_REQUEST,
        };
        api_error(status, e.to_string())
    }
}

// ─── GET /api/measure, GET /map ──────────────────────────────────

#[derive(Deserialize)]
pub struct MeasureQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub unit: Option<String>,
    pub model: Option<String>,
    pub country: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, format!("Missing '{}' parameter", name)))
}

fn resolve(state: &AppState, query: &str, opts: &ResolveOptions) -> Result<ResolvedLocation, ApiError> {
    let mut resolver = state
        .resolver
        .lock()
        .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "resolver unavailable"))?;
    Ok(resolver.resolve_with_opts(query, opts)?)
}

fn compute(state: &AppState, params: &MeasureQuery) -> Result<TripReport, ApiError> {
    let from = required(&params.from, "from")?;
    let to = required(&params.to, "to")?;

    let unit = match params.unit.as_deref() {
        Some(u) => u.parse::<DistanceUnit>()?,
        None => DistanceUnit::default(),
    };
    let model = match params.model.as_deref() {
        Some(m) => m.parse::<EarthModel>().map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?,
        None => EarthModel::default(),
    };

    let opts = ResolveOptions { country: params.country.clone() };
    let a = resolve(state, from, &opts)?;
    let b = resolve(state, to, &opts)?;

    Ok(measure(&a, &b, unit, model)?)
}

pub async fn measure_trip(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MeasureQuery>,
) -> Result<Json<TripReport>, ApiError> {
    let start = Instant::now();
    let report = compute(&state, &params)?;

    log::info!(
        "GET /api/measure {} -> {}: {} ({:.1}ms)",
        report.from.name,
        report.to.name,
        report.distance,
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(report))
}

pub async fn map_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MeasureQuery>,
) -> Result<Html<String>, ApiError> {
    let report = compute(&state, &params)?;
    log::info!("GET /map {} -> {}", report.from.name, report.to.name);
    Ok(Html(render_map(&report)))
}

// ─── GET /api/cities ─────────────────────────────────────────────

pub async fn city_list() -> Json<Vec<CityInfo>> {
    Json(builtin_city_list())
}
