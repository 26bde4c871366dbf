use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use islandgen::config::Params;
use islandgen::generator::{Generator, Timing};
use islandgen::snapshot::Snapshot;

#[derive(Deserialize)]
struct GenerateRequest {
    seed: Option<u64>,
    map_size: Option<f64>,
    voronoi_cell_count: Option<usize>,
    voronoi_relaxation: Option<u32>,
    land_fraction: Option<f64>,
    peak_elevation: Option<f64>,
    mountain_peak_count: Option<usize>,
    hilliness: Option<f64>,
    river_threshold: Option<u32>,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Serialize)]
struct GenerateResponse {
    snapshot: Snapshot,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn timings_to_entries(timings: Vec<Timing>) -> Vec<TimingEntry> {
    timings.into_iter().map(|t| TimingEntry { name: t.name.to_string(), ms: t.ms }).collect()
}

async fn generate_handler(
    State(state): State<Arc<Mutex<Option<Snapshot>>>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (axum::http::StatusCode, Json<ErrorResponse>)> {
    let defaults = Params::default();
    let params = Params {
        seed: req.seed.unwrap_or(defaults.seed),
        map_size: req.map_size.unwrap_or(defaults.map_size),
        voronoi_cell_count: req.voronoi_cell_count.unwrap_or(defaults.voronoi_cell_count),
        voronoi_relaxation: req.voronoi_relaxation.unwrap_or(defaults.voronoi_relaxation),
        land_fraction: req.land_fraction.unwrap_or(defaults.land_fraction),
        peak_elevation: req.peak_elevation.unwrap_or(defaults.peak_elevation),
        mountain_peak_count: req.mountain_peak_count.unwrap_or(defaults.mountain_peak_count),
        hilliness: req.hilliness.unwrap_or(defaults.hilliness),
        river_threshold: req.river_threshold.unwrap_or(defaults.river_threshold),
        ..defaults
    };

    let response = tokio::task::spawn_blocking(move || {
        let generator = Generator::new();
        generator.generate(&params, |_, _| {}, None)
    })
    .await
    .expect("generation task panicked");

    match response {
        Ok((snapshot, timings)) => {
            let mut guard = state.lock().await;
            *guard = Some(snapshot.clone());
            Ok(Json(GenerateResponse { snapshot, timings: timings_to_entries(timings) }))
        }
        Err(e) => Err((axum::http::StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() }))),
    }
}

#[derive(Deserialize)]
struct FindPathRequest {
    from: usize,
    to: usize,
}

async fn find_path_handler(
    State(state): State<Arc<Mutex<Option<Snapshot>>>>,
    Json(req): Json<FindPathRequest>,
) -> Result<Json<islandgen::transport::PathResult>, (axum::http::StatusCode, Json<ErrorResponse>)> {
    let guard = state.lock().await;
    let snapshot = guard.as_ref().ok_or_else(|| {
        (
            axum::http::StatusCode::CONFLICT,
            Json(ErrorResponse { error: "no snapshot generated yet, call /generate first".into() }),
        )
    })?;

    if req.from >= snapshot.cells.len() || req.to >= snapshot.cells.len() {
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: "site id out of range".into() }),
        ));
    }

    let generator = Generator::new();
    Ok(Json(generator.find_path(snapshot, req.from, req.to)))
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let state: Arc<Mutex<Option<Snapshot>>> = Arc::new(Mutex::new(None));

    let app = Router::new()
        .route("/generate", post(generate_handler))
        .route("/find-path", post(find_path_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    log::info!("islandgen server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
