//! Perfume catalog service client implementation.
//!
//! Handles the HTTP round-trips to the remote collection resource.

use crate::catalog::models::{NewPerfume, Perfume};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// The sole failure mode of catalog operations.
///
/// Transport faults, undecodable response bodies, and non-success statuses
/// all collapse into this one kind. Callers log it and leave their state
/// unchanged; it is never retried and never fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network failure or undecodable response body
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Server answered with a non-success status
    #[error("request failed: server answered {0}")]
    Status(StatusCode),
}

/// Abstract interface to the remote catalog.
///
/// Seam between the application state and the transport, so the
/// orchestration logic can be exercised against an in-memory double.
#[async_trait]
pub trait CatalogApi {
    /// Read the full collection.
    async fn list(&self) -> Result<Vec<Perfume>, CatalogError>;

    /// Create a new record. Non-success statuses are failures.
    async fn create(&self, perfume: &NewPerfume) -> Result<(), CatalogError>;

    /// Overwrite an existing record's fields. Non-success statuses are failures.
    async fn update(&self, id: i64, perfume: &NewPerfume) -> Result<(), CatalogError>;

    /// Delete a record. The response status is not checked; only transport
    /// failures are reported.
    async fn remove(&self, id: i64) -> Result<(), CatalogError>;

    /// Read the subset of the collection matching `query`.
    async fn search(&self, query: &str) -> Result<Vec<Perfume>, CatalogError>;
}

/// HTTP client for the perfume catalog service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the catalog service
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<CatalogClient>` - New client or error
    ///
    /// # Details
    /// Requires a configured base URL. No request timeout is set; operations
    /// rely on the transport's own failure signaling.
    pub fn new(config: &Config) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Catalog base URL is required. Please set it in config.jsonc"
            ));
        }

        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list(&self) -> Result<Vec<Perfume>, CatalogError> {
        let url = format!("{}/perfumes", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let perfumes = response.json().await?;
        Ok(perfumes)
    }

    async fn create(&self, perfume: &NewPerfume) -> Result<(), CatalogError> {
        let url = format!("{}/perfumes", self.base_url);
        let response = self.client.post(&url).json(perfume).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        // The service wraps the stored record in a message envelope; the
        // body is discarded and the view refreshed by a follow-up list.
        Ok(())
    }

    async fn update(&self, id: i64, perfume: &NewPerfume) -> Result<(), CatalogError> {
        let url = format!("{}/perfumes/{}", self.base_url, id);
        let response = self.client.put(&url).json(perfume).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<(), CatalogError> {
        let url = format!("{}/perfumes/{}", self.base_url, id);
        self.client.delete(&url).send().await?;

        // Status intentionally not checked; the caller refetches either way.
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Perfume>, CatalogError> {
        let url = format!("{}/perfumes/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let perfumes = response.json().await?;
        Ok(perfumes)
    }
}
