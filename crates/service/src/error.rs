//! Typed error enum for the service layer.
//!
//! Unifies storage, search, and generation failures into a single type the
//! HTTP layer can map 1:1 to response codes, instead of downcasting opaque
//! `anyhow::Error` boxes.

use placelore_llm::GenerationError;
use placelore_search::SearchError;
use placelore_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage, search, and generation failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, invalid mention, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Search provider call failed.
    #[error("search: {0}")]
    Search(#[from] SearchError),

    /// Generation engine call failed.
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),

    /// Search succeeded but returned no results to ground the prompt in.
    #[error("no context retrieved from search provider")]
    NoContext,

    /// Search results carried no usable text content.
    #[error("no valid content found in search results")]
    NoContent,

    /// Caller provided invalid input (empty place name).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Generation(e) => e.is_transient(),
            _ => false,
        }
    }
}
