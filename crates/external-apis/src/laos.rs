// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! LAOS extensions API integration
//!
//! Collections bridged through LAOS are not covered by the standard indexer.
//! The LAOS extensions API returns every balance of an account in one call and
//! can also list the account's collectibles with their lowest listing.

use api_client::{
    AlternateIndexerClient, AlternateTokenBalancesRequest, AlternateTokenBalancesResponse,
    ApiError, ListCollectiblesRequest, ListCollectiblesResponse,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rpc::{JsonTransport, RpcError, join_url};

/// Configuration for the LAOS client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaosConfig {
    /// Base URL of the LAOS extensions API
    pub url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for LaosConfig {
    fn default() -> Self {
        Self {
            url: "https://extensions.api.laosnetwork.io".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// LAOS extensions API client
#[derive(Debug, Clone)]
pub struct LaosClient {
    transport: JsonTransport,
    config: LaosConfig,
}

impl LaosClient {
    /// Create a new LAOS client
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or the HTTP client cannot be created
    pub fn new(config: LaosConfig) -> Result<Self, RpcError> {
        if config.url.trim().is_empty() {
            return Err(RpcError::Config("LAOS URL cannot be empty".to_string()));
        }

        let transport = JsonTransport::new("laos", config.timeout_seconds)?;
        Ok(Self { transport, config })
    }
}

impl AlternateIndexerClient for LaosClient {
    async fn get_token_balances(
        &self,
        request: &AlternateTokenBalancesRequest,
    ) -> Result<AlternateTokenBalancesResponse, ApiError> {
        let url = join_url(&self.config.url, "token/GetTokenBalances");
        debug!(
            url,
            chain_id = %request.chain_id,
            contract = request.contract_address,
            "fetching token balances from LAOS"
        );

        Ok(self.transport.send(self.transport.post(&url, request)).await?)
    }

    async fn list_collectibles(
        &self,
        request: &ListCollectiblesRequest,
    ) -> Result<ListCollectiblesResponse, ApiError> {
        let url = join_url(&self.config.url, "token/ListCollectibles");
        debug!(
            url,
            chain_id = %request.chain_id,
            page = request.page.page,
            "listing collectibles from LAOS"
        );

        Ok(self.transport.send(self.transport.post(&url, request)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laos_client_creation() {
        assert!(LaosClient::new(LaosConfig::default()).is_ok());

        let config = LaosConfig {
            url: String::new(),
            ..LaosConfig::default()
        };
        assert!(matches!(
            LaosClient::new(config).unwrap_err(),
            RpcError::Config(_)
        ));
    }
}
