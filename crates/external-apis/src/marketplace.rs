// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Marketplace API integration
//!
//! This module provides an implementation of the [`MarketplaceClient`] trait: the
//! listing-aware collectible feed served by the marketplace API, and the
//! marketplace configuration published by the builder API.

use api_client::{
    ApiError, ListCollectiblesRequest, ListCollectiblesResponse, MarketplaceClient,
    MarketplaceConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::rpc::{JsonTransport, RpcError, join_url};

const LIST_COLLECTIBLES_PATH: &str = "rpc/Marketplace/ListCollectibles";

/// Configuration for the marketplace client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceApiConfig {
    /// Base URL of the marketplace API
    pub url: String,
    /// Base URL of the builder API serving marketplace settings
    pub builder_url: String,
    /// Project access key sent as `X-Access-Key`
    pub project_access_key: String,
    /// Builder project id
    pub project_id: u64,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for MarketplaceApiConfig {
    fn default() -> Self {
        Self {
            url: "https://marketplace-api.sequence.app".to_string(),
            builder_url: "https://api.sequence.build".to_string(),
            project_access_key: String::new(),
            project_id: 0,
            timeout_seconds: 30,
        }
    }
}

/// Marketplace API client
#[derive(Debug, Clone)]
pub struct MarketplaceApiClient {
    transport: JsonTransport,
    config: MarketplaceApiConfig,
}

impl MarketplaceApiClient {
    /// Create a new marketplace client
    ///
    /// # Errors
    ///
    /// Returns an error if a URL or the access key is empty, the project id is
    /// zero, or the HTTP client cannot be created
    pub fn new(config: MarketplaceApiConfig) -> Result<Self, RpcError> {
        if config.project_access_key.trim().is_empty() {
            return Err(RpcError::Config(
                "marketplace project access key cannot be empty".to_string(),
            ));
        }

        if config.url.trim().is_empty() || config.builder_url.trim().is_empty() {
            return Err(RpcError::Config(
                "marketplace URLs cannot be empty".to_string(),
            ));
        }

        if config.project_id == 0 {
            return Err(RpcError::Config(
                "marketplace project id must be set".to_string(),
            ));
        }

        let transport = JsonTransport::new("marketplace", config.timeout_seconds)?;
        Ok(Self { transport, config })
    }

    fn settings_url(&self) -> String {
        join_url(
            &self.config.builder_url,
            &format!("marketplace/{}/settings.json", self.config.project_id),
        )
    }
}

impl MarketplaceClient for MarketplaceApiClient {
    async fn list_collectibles(
        &self,
        request: &ListCollectiblesRequest,
    ) -> Result<ListCollectiblesResponse, ApiError> {
        let url = join_url(&self.config.url, LIST_COLLECTIBLES_PATH);
        debug!(
            url,
            chain_id = %request.chain_id,
            contract = request.contract_address,
            page = request.page.page,
            page_size = request.page.page_size,
            "listing collectibles from marketplace"
        );

        let response: ListCollectiblesResponse = self
            .transport
            .send(
                self.transport
                    .post(&url, request)
                    .header("X-Access-Key", &self.config.project_access_key),
            )
            .await?;

        debug!(
            count = response.collectibles.len(),
            more = response.has_more(),
            "marketplace page received"
        );
        Ok(response)
    }

    async fn get_marketplace_config(&self) -> Result<MarketplaceConfig, ApiError> {
        let url = self.settings_url();
        debug!(url, "fetching marketplace configuration");

        let config: MarketplaceConfig = self
            .transport
            .send(
                self.transport
                    .get(&url)
                    .header("X-Access-Key", &self.config.project_access_key),
            )
            .await?;

        info!(
            project_id = config.project_id,
            collections = config.collections.len(),
            "loaded marketplace configuration"
        );
        Ok(config)
    }

    fn name(&self) -> &'static str {
        "sequence-marketplace"
    }
}
