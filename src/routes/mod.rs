//! Rutas HTTP
//!
//! Cada recurso tiene su router; `create_router` los monta bajo `/api` junto
//! con el health check, CORS, compresión y el trazado de requests.

pub mod reminder_routes;
pub mod seed_routes;
pub mod service_routes;
pub mod stats_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/services", service_routes::create_service_router())
        .nest("/api/reminders", reminder_routes::create_reminder_router())
        .nest("/api/stats", stats_routes::create_stats_router())
        .nest("/api/seed", seed_routes::create_seed_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
