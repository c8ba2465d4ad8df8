//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, invalid mention,
//! transient DB errors) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A mention in a batch failed validation; the whole batch is rolled back.
    #[error("invalid mention: {0}")]
    InvalidMention(String),

    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Row data could not be deserialized into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)))
    }
}

/// Custom `From<sqlx::Error>` — NOT blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound` (generic; callers should catch and remap with entity context)
/// - Everything else → `Database`
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            _ => Self::Database(err),
        }
    }
}
