//! Domain types for cached place histories and their nearby sites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached place: the canonical name as first submitted, an optional
/// synthesized history paragraph, and the nearby sites extracted for it.
///
/// `history` and `mentions` are each written at most once; after that the
/// record is served as-is (cache-forever, no refresh).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub place_name: String,
    pub history: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Nearby sites owned by this record. Deleting the record deletes them.
    #[serde(default)]
    pub mentions: Vec<PlaceMention>,
}

impl LocationRecord {
    /// Whether a history paragraph has been synthesized and stored.
    #[must_use]
    pub fn has_history(&self) -> bool {
        self.history.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// Whether at least one nearby site has been extracted and stored.
    #[must_use]
    pub fn has_mentions(&self) -> bool {
        !self.mentions.is_empty()
    }
}

/// A named historical site near a [`LocationRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceMention {
    pub id: String,
    pub location_id: String,
    pub name: String,
    pub description: String,
}

/// Fixed description attached to every freshly extracted site.
#[must_use]
pub fn mention_description(place_name: &str) -> String {
    format!("One of the historical sites near {place_name}.")
}

/// Where a response's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Served from the record store.
    Database,
    /// Freshly synthesized by the generation engine.
    Model,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Model => "model",
        }
    }
}
