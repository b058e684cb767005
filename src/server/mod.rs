//! HTTP surface: the same measurement as the CLI, as JSON or as a map page.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::io;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::location::LocationResolver;

pub fn build_router(resolver: LocationResolver) -> Router {
    let state = Arc::new(AppState {
        resolver: Mutex::new(resolver),
    });

    Router::new()
        .route("/api/measure", get(handlers::measure_trip))
        .route("/api/cities", get(handlers::city_list))
        .route("/map", get(handlers::map_page))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, resolver: LocationResolver) -> io::Result<()> {
    let app = build_router(resolver);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    eprintln!("  midway server listening on http://{}", addr);
    eprintln!("  Try http://{}/map?from=London&to=New%20York", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await
}
