//! HTTP API server for placelore.

pub mod api_error;
mod handlers;
mod response_types;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use placelore_service::{HistoryService, PlacesService};

pub use response_types::{
    HealthResponse, HistoryResponse, MessageResponse, PlaceEntry, PlacesGeneratedResponse,
    PlacesStoredResponse,
};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Get-or-generate flow for place histories.
    pub history_service: Arc<HistoryService>,
    /// Get-or-generate flow for nearby historical sites.
    pub places_service: Arc<PlacesService>,
}

/// Build the router. CORS is permissive: the API is read-only and meant to
/// be called from browser frontends.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/history/{location}", get(handlers::get_history))
        .route("/api/historical_places/{location}", get(handlers::get_places))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
