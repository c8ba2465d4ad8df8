//! Search provider client for placelore.
//!
//! Thin client for a Tavily-style search API: given a text query it returns
//! a small set of snippets. The generation pipelines ground their prompts in
//! these snippets and nothing else.

mod client;
mod error;

pub use client::{SearchClient, SearchResponse, SearchSnippet, DEFAULT_SEARCH_URL};
pub use error::SearchError;
