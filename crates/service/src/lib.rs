//! Service layer for placelore.
//!
//! Each service is a straight-line state machine per request:
//! Lookup → Generate → Persist, terminal on first success or first
//! unrecoverable error. The store is the only cache; generation runs at
//! most once per distinct place name (modulo the documented concurrent
//! first-request race, which produces a tolerated duplicate row rather
//! than an invalid response).

mod error;
mod history_service;
mod places_service;

pub use error::ServiceError;
pub use history_service::{HistoryOutcome, HistoryService};
pub use places_service::{PlacesOutcome, PlacesService};

/// How many snippets each pipeline requests from the search provider.
pub const SEARCH_RESULT_COUNT: u8 = 2;
