//! Get-or-generate flow for nearby historical sites.

use std::sync::Arc;

use placelore_core::{mention_description, LocationRecord, PlaceMention};
use placelore_llm::GenerationClient;
use placelore_search::SearchClient;
use placelore_storage::{RecordStore, StorageError};

use crate::error::ServiceError;
use crate::SEARCH_RESULT_COUNT;

/// Result of a places request.
///
/// `NoneFound` is a distinct outcome, observable separately from both
/// success-with-data and failure: extraction succeeded but yielded zero
/// places. Nothing is persisted for it.
#[derive(Debug, Clone)]
pub enum PlacesOutcome {
    /// Served from the record store.
    Stored { location: String, places: Vec<PlaceMention> },
    /// Freshly extracted; `cached` is false if the store write failed.
    Generated { location: String, names: Vec<String>, cached: bool },
    /// Extraction succeeded but found no places.
    NoneFound,
}

/// Orchestrates `GET historical places`: Lookup → Generate → Persist.
pub struct PlacesService {
    store: Arc<RecordStore>,
    search: Arc<SearchClient>,
    engine: Arc<GenerationClient>,
}

impl PlacesService {
    #[must_use]
    pub const fn new(
        store: Arc<RecordStore>,
        search: Arc<SearchClient>,
        engine: Arc<GenerationClient>,
    ) -> Self {
        Self { store, search, engine }
    }

    /// Return the historical sites near `name`, extracting and persisting
    /// them on a cache miss.
    pub async fn get_places(&self, name: &str) -> Result<PlacesOutcome, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("location is required".to_owned()));
        }
        tracing::info!(location = name, "historical places requested");

        let existing = self.store.find_by_name(name).await?;
        if let Some(record) = &existing {
            if record.has_mentions() {
                tracing::info!(location = name, "historical places served from store");
                return Ok(PlacesOutcome::Stored {
                    location: name.to_owned(),
                    places: record.mentions.clone(),
                });
            }
        }

        let response = self
            .search
            .search(&format!("Historical places near to {name} for visit"), SEARCH_RESULT_COUNT)
            .await?;
        if response.results.is_empty() {
            return Err(ServiceError::NoContext);
        }
        let text = response.joined_content();
        if text.trim().is_empty() {
            return Err(ServiceError::NoContent);
        }

        let names = self.engine.extract_places(&text).await?;
        if names.is_empty() {
            tracing::info!(location = name, "extraction found no places");
            return Ok(PlacesOutcome::NoneFound);
        }

        let cached = match self.persist(existing.as_ref(), name, &names).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    location = name,
                    error = %e,
                    "extracted places could not be cached, returning them uncached"
                );
                false
            },
        };
        tracing::info!(location = name, count = names.len(), cached, "places extracted");
        Ok(PlacesOutcome::Generated { location: name.to_owned(), names, cached })
    }

    async fn persist(
        &self,
        existing: Option<&LocationRecord>,
        name: &str,
        names: &[String],
    ) -> Result<(), StorageError> {
        let id = match existing {
            Some(record) => record.id.clone(),
            None => self.store.create_bare(name).await?.id,
        };
        let pairs: Vec<(String, String)> =
            names.iter().map(|n| (n.clone(), mention_description(name))).collect();
        self.store.add_mentions(&id, &pairs).await?;
        Ok(())
    }
}
