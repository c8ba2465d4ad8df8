use anyhow::Result;
use placelore_http::{create_router, AppState};
use std::sync::Arc;

use crate::Services;

pub(crate) async fn run(services: Services, host: String, port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        history_service: services.history,
        places_service: services.places,
    });
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
