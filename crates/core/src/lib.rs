//! Core types and utilities for placelore
//!
//! This crate contains domain types shared across all other crates.

mod env_config;
pub mod json_utils;
mod record;

pub use env_config::*;
pub use record::*;
