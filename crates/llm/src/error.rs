//! Typed error enum for the generation engine client.

use thiserror::Error;

/// Errors from generation engine operations.
///
/// These are data, not control flow: the pipelines return them as tagged
/// results and the orchestrator maps each variant to a response.
#[derive(Debug, Error)]
pub enum GenerationError {
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
    #[error("empty response: no choices returned")]
    EmptyResponse,
    #[error("no history generated")]
    EmptyOutput,
    #[error("engine out of memory during generation")]
    ResourceExhausted,
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted, last error: {0}")]
    RetriesExhausted(Box<GenerationError>),
}

impl GenerationError {
    /// Whether this error is transient and should be retried.
    ///
    /// An engine OOM is deliberately not transient: retrying a request that
    /// just exhausted device memory only thrashes the engine.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 429 | 500 | 502 | 503),
            _ => false,
        }
    }
}
