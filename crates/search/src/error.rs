//! Typed error enum for the search provider client.

use thiserror::Error;

/// Errors from search provider operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
