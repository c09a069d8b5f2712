// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Sequence indexer integration
//!
//! This module provides an implementation of the [`IndexerClient`] trait for the
//! Sequence indexer, which serves paginated token balances per chain through a
//! JSON-RPC style HTTP endpoint.

use api_client::{ApiError, GetTokenBalancesRequest, GetTokenBalancesResponse, IndexerClient};
use serde::{Deserialize, Serialize};
use shared_types::ChainId;
use tracing::{debug, error};

use crate::rpc::{JsonTransport, RpcError, join_url};

/// Placeholder replaced by the chain's network name in [`IndexerConfig::url`]
pub const NETWORK_PLACEHOLDER: &str = "{network}";

const GET_TOKEN_BALANCES_PATH: &str = "rpc/Indexer/GetTokenBalances";

/// Configuration for the indexer client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Base URL; may contain `{network}`, e.g. `https://{network}-indexer.sequence.app`
    pub url: String,
    /// Project access key sent as `X-Access-Key`
    pub access_key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: "https://{network}-indexer.sequence.app".to_string(),
            access_key: String::new(),
            timeout_seconds: 30,
        }
    }
}

/// Sequence indexer client
#[derive(Debug, Clone)]
pub struct SequenceIndexerClient {
    transport: JsonTransport,
    config: IndexerConfig,
}

impl SequenceIndexerClient {
    /// Create a new indexer client
    ///
    /// # Errors
    ///
    /// Returns an error if the access key or URL is empty or the HTTP client
    /// cannot be created
    pub fn new(config: IndexerConfig) -> Result<Self, RpcError> {
        if config.access_key.trim().is_empty() {
            return Err(RpcError::Config(
                "indexer access key cannot be empty".to_string(),
            ));
        }

        if config.url.trim().is_empty() {
            return Err(RpcError::Config("indexer URL cannot be empty".to_string()));
        }

        let transport = JsonTransport::new("indexer", config.timeout_seconds)?;
        Ok(Self { transport, config })
    }

    /// Resolve the balance endpoint for a chain
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is templated and the chain has no known
    /// network name
    pub fn endpoint(&self, chain_id: ChainId) -> Result<String, RpcError> {
        let base = if self.config.url.contains(NETWORK_PLACEHOLDER) {
            let network = chain_id.network_name().ok_or_else(|| {
                RpcError::Config(format!("no indexer network known for chain {chain_id}"))
            })?;
            self.config.url.replace(NETWORK_PLACEHOLDER, network)
        } else {
            self.config.url.clone()
        };

        Ok(join_url(&base, GET_TOKEN_BALANCES_PATH))
    }
}

impl IndexerClient for SequenceIndexerClient {
    async fn get_token_balances(
        &self,
        chain_id: ChainId,
        request: &GetTokenBalancesRequest,
    ) -> Result<GetTokenBalancesResponse, ApiError> {
        let url = self.endpoint(chain_id)?;

        debug!(
            url,
            chain_id = %chain_id,
            contract = request.contract_address,
            page = request.page.page,
            page_size = request.page.page_size,
            "fetching token balances from indexer"
        );

        let response: GetTokenBalancesResponse = self
            .transport
            .send(
                self.transport
                    .post(&url, request)
                    .header("X-Access-Key", &self.config.access_key),
            )
            .await
            .map_err(|e| {
                error!(chain_id = %chain_id, "indexer balance request failed: {e}");
                e
            })?;

        Ok(response)
    }
}
