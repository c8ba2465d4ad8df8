//! Handlers for the two place endpoints.
//!
//! Status mapping: 200 when served from the store, 201 when freshly
//! generated, 404 when extraction succeeds but finds nothing, 500 on
//! failure. The zero-places case carries a `message`, failures carry an
//! `error`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use placelore_core::Source;
use placelore_service::{HistoryOutcome, PlacesOutcome};

use crate::api_error::ApiError;
use crate::response_types::{
    HistoryResponse, MessageResponse, PlaceEntry, PlacesGeneratedResponse, PlacesStoredResponse,
    UNCACHED_NOTE,
};
use crate::AppState;

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(location): Path<String>,
) -> Result<Response, ApiError> {
    let outcome = state.history_service.get_history(&location).await?;
    let response = match outcome {
        HistoryOutcome::Stored { location, history } => (
            StatusCode::OK,
            Json(HistoryResponse { source: Source::Database, location, history, note: None }),
        ),
        HistoryOutcome::Generated { location, history, cached } => (
            StatusCode::CREATED,
            Json(HistoryResponse {
                source: Source::Model,
                location,
                history,
                note: (!cached).then_some(UNCACHED_NOTE),
            }),
        ),
    };
    Ok(response.into_response())
}

pub async fn get_places(
    State(state): State<Arc<AppState>>,
    Path(location): Path<String>,
) -> Result<Response, ApiError> {
    let outcome = state.places_service.get_places(&location).await?;
    let response = match outcome {
        PlacesOutcome::Stored { location, places } => (
            StatusCode::OK,
            Json(PlacesStoredResponse {
                source: Source::Database,
                location,
                historical_places: places.into_iter().map(PlaceEntry::from).collect(),
            }),
        )
            .into_response(),
        PlacesOutcome::Generated { location, names, cached } => (
            StatusCode::CREATED,
            Json(PlacesGeneratedResponse {
                source: Source::Model,
                location,
                historical_places: names,
                note: (!cached).then_some(UNCACHED_NOTE),
            }),
        )
            .into_response(),
        PlacesOutcome::NoneFound => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse { message: "No historical places found." }),
        )
            .into_response(),
    };
    Ok(response)
}
