//! Response types (Serialize)

use placelore_core::{PlaceMention, Source};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub source: Source,
    pub location: String,
    pub history: String,
    /// Present only when freshly generated content could not be cached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct PlaceEntry {
    pub name: String,
    pub description: String,
}

impl From<PlaceMention> for PlaceEntry {
    fn from(mention: PlaceMention) -> Self {
        Self { name: mention.name, description: mention.description }
    }
}

/// Served from the store: full name+description entries.
#[derive(Debug, Serialize)]
pub struct PlacesStoredResponse {
    pub source: Source,
    pub location: String,
    pub historical_places: Vec<PlaceEntry>,
}

/// Freshly generated: bare name list, as extracted.
#[derive(Debug, Serialize)]
pub struct PlacesGeneratedResponse {
    pub source: Source,
    pub location: String,
    pub historical_places: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Best-effort note attached when the store write failed after generation.
pub(crate) const UNCACHED_NOTE: &str = "result could not be cached; it will be regenerated on the next request";
