//! Remote perfume catalog integration module.
//!
//! Provides the HTTP client and wire models for the catalog service.

pub mod client;
pub mod models;

pub use client::{CatalogApi, CatalogClient, CatalogError};
pub use models::{Draft, NewPerfume, Perfume};
