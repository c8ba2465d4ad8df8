//! Generation engine client for placelore.
//!
//! Wraps an OpenAI-compatible chat completion endpoint (a locally hosted
//! inference server by default) and layers the two domain pipelines on top:
//! history synthesis and place-name extraction. Whether concurrent
//! generation calls serialize or run in parallel is the engine's own
//! business; this crate holds no lock of its own.

mod ai_types;
mod client;
mod error;
mod history;
mod places;

pub use client::{GenerationClient, GenerationOptions, DEFAULT_MODEL};
pub use error::GenerationError;

#[cfg(test)]
mod retry_tests;
