use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use placelore_llm::GenerationClient;
use placelore_search::SearchClient;
use placelore_service::{HistoryService, PlacesService};
use placelore_storage::RecordStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{handlers, AppState};

struct Harness {
    state: Arc<AppState>,
    store: Arc<RecordStore>,
    search_server: MockServer,
    engine_server: MockServer,
}

async fn harness() -> Harness {
    let search_server = MockServer::start().await;
    let engine_server = MockServer::start().await;
    let store = Arc::new(RecordStore::in_memory().await.expect("in-memory store"));
    let search =
        Arc::new(SearchClient::new("test-key".to_owned(), search_server.uri()).expect("client"));
    let engine = Arc::new(
        GenerationClient::new(engine_server.uri(), "test-model".to_owned()).expect("client"),
    );
    let state = Arc::new(AppState {
        history_service: Arc::new(HistoryService::new(store.clone(), search.clone(), engine.clone())),
        places_service: Arc::new(PlacesService::new(store.clone(), search, engine)),
    });
    Harness { state, store, search_server, engine_server }
}

async fn mount_search(server: &MockServer, results: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": results })),
        )
        .mount(server)
        .await;
}

async fn mount_engine(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": content, "role": "assistant"}}]
        })))
        .mount(server)
        .await;
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_stored_history_maps_to_200() {
    let h = harness().await;
    let record = h.store.create_bare("Paris").await.unwrap();
    h.store.set_history(&record.id, "Paris on the Seine.").await.unwrap();

    let response = handlers::get_history(State(h.state.clone()), Path("paris".to_owned()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "database");
    assert_eq!(body["location"], "Paris");
    assert_eq!(body["history"], "Paris on the Seine.");
    assert!(body.get("note").is_none());
}

#[tokio::test]
async fn test_generated_history_maps_to_201() {
    let h = harness().await;
    mount_search(&h.search_server, serde_json::json!([{"content": "snippet"}])).await;
    mount_engine(&h.engine_server, "Lyon was the capital of Roman Gaul.").await;

    let response = handlers::get_history(State(h.state.clone()), Path("Lyon".to_owned()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["source"], "model");
    assert_eq!(body["history"], "Lyon was the capital of Roman Gaul.");
    // Cached successfully, so no uncached note.
    assert!(body.get("note").is_none());
}

#[tokio::test]
async fn test_zero_extracted_places_maps_to_404_with_message() {
    let h = harness().await;
    mount_search(&h.search_server, serde_json::json!([{"content": "nothing notable"}])).await;
    mount_engine(&h.engine_server, r#"{"locations": []}"#).await;

    let response = handlers::get_places(State(h.state.clone()), Path("Nowhere".to_owned()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "No historical places found.");
}

#[tokio::test]
async fn test_generated_places_maps_to_201() {
    let h = harness().await;
    mount_search(&h.search_server, serde_json::json!([{"content": "near the palace"}])).await;
    mount_engine(&h.engine_server, r#"{"locations": ["Palace of Versailles"]}"#).await;

    let response = handlers::get_places(State(h.state.clone()), Path("Versailles".to_owned()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["source"], "model");
    assert_eq!(body["historical_places"], serde_json::json!(["Palace of Versailles"]));
}

#[tokio::test]
async fn test_blank_location_maps_to_400() {
    let h = harness().await;
    let err = handlers::get_history(State(h.state.clone()), Path("   ".to_owned()))
        .await
        .unwrap_err();
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "location is required");
}
