//! Get-or-generate flow for place histories.

use std::sync::Arc;

use placelore_core::LocationRecord;
use placelore_llm::GenerationClient;
use placelore_search::SearchClient;
use placelore_storage::{RecordStore, StorageError};

use crate::error::ServiceError;
use crate::SEARCH_RESULT_COUNT;

/// Result of a history request.
///
/// A persistence failure after successful generation does not discard the
/// generated text: it comes back as `Generated { cached: false }`.
#[derive(Debug, Clone)]
pub enum HistoryOutcome {
    /// Served from the record store.
    Stored { location: String, history: String },
    /// Freshly synthesized; `cached` is false if the store write failed.
    Generated { location: String, history: String, cached: bool },
}

/// Orchestrates `GET history`: Lookup → Generate → Persist.
pub struct HistoryService {
    store: Arc<RecordStore>,
    search: Arc<SearchClient>,
    engine: Arc<GenerationClient>,
}

impl HistoryService {
    #[must_use]
    pub const fn new(
        store: Arc<RecordStore>,
        search: Arc<SearchClient>,
        engine: Arc<GenerationClient>,
    ) -> Self {
        Self { store, search, engine }
    }

    /// Return the history for `name`, synthesizing and persisting it on a
    /// cache miss.
    ///
    /// `name` is matched case-insensitively but stored case-preserved as
    /// first submitted.
    pub async fn get_history(&self, name: &str) -> Result<HistoryOutcome, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("location is required".to_owned()));
        }
        tracing::info!(location = name, "history requested");

        let existing = self.store.find_by_name(name).await?;
        if let Some(record) = &existing {
            if record.has_history() {
                tracing::info!(location = name, "history served from store");
                return Ok(HistoryOutcome::Stored {
                    location: record.place_name.clone(),
                    history: record.history.clone().unwrap_or_default(),
                });
            }
        }

        let context = self
            .search
            .search(&format!("Interesting History of {name}"), SEARCH_RESULT_COUNT)
            .await?;
        let history = self.engine.write_history(name, &context.raw_context()).await?;

        let cached = match self.persist(existing.as_ref(), name, &history).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    location = name,
                    error = %e,
                    "generated history could not be cached, returning it uncached"
                );
                false
            },
        };
        tracing::info!(location = name, cached, "history generated");
        Ok(HistoryOutcome::Generated { location: name.to_owned(), history, cached })
    }

    async fn persist(
        &self,
        existing: Option<&LocationRecord>,
        name: &str,
        history: &str,
    ) -> Result<(), StorageError> {
        let id = match existing {
            Some(record) => record.id.clone(),
            None => self.store.create_bare(name).await?.id,
        };
        self.store.set_history(&id, history).await
    }
}
