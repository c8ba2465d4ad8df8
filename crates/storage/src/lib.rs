//! SQLite storage backend for placelore.
//!
//! The record store is the cache: each place name is looked up here before
//! any generation work runs, and generated results are persisted here so the
//! expensive pipeline runs at most once per distinct name.

mod error;
mod migrations;
mod store;

pub use error::StorageError;
pub use store::RecordStore;
