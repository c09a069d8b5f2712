// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client traits and wire types for the services behind an NFT inventory
//!
//! The inventory engine talks to three remote services, all treated as opaque
//! request/response capabilities:
//!
//! - **Indexer** ([`IndexerClient`]): paginated token-balance listing per chain
//! - **Alternate indexer** ([`AlternateIndexerClient`]): single-shot,
//!   creation-sorted balance listing and collectible listing for LAOS-bridged
//!   collections
//! - **Marketplace** ([`MarketplaceClient`]): listing-aware collectible feed and
//!   marketplace configuration
//!
//! Every operation returns `impl Future + Send` so implementations can be
//! plain `async fn`s, and fails with the shared [`ApiError`].

use shared_types::ChainId;
use thiserror::Error;

pub mod types;

pub use types::*;

/// Paginated token-balance listing
pub trait IndexerClient: Send + Sync {
    /// Fetch one page of the balances an account holds in a contract
    ///
    /// # Errors
    ///
    /// Returns an error if the chain has no indexer endpoint, the request
    /// fails or the response cannot be parsed
    fn get_token_balances(
        &self,
        chain_id: ChainId,
        request: &GetTokenBalancesRequest,
    ) -> impl Future<Output = Result<GetTokenBalancesResponse, ApiError>> + Send;
}

/// Alternate metadata provider for LAOS-bridged collections
pub trait AlternateIndexerClient: Send + Sync {
    /// Fetch every balance an account holds in a contract in one call
    fn get_token_balances(
        &self,
        request: &AlternateTokenBalancesRequest,
    ) -> impl Future<Output = Result<AlternateTokenBalancesResponse, ApiError>> + Send;

    /// Fetch one page of collectibles from the alternate provider
    fn list_collectibles(
        &self,
        request: &ListCollectiblesRequest,
    ) -> impl Future<Output = Result<ListCollectiblesResponse, ApiError>> + Send;
}

/// Marketplace API
pub trait MarketplaceClient: Send + Sync {
    /// Fetch one page of listing-aware collectibles
    fn list_collectibles(
        &self,
        request: &ListCollectiblesRequest,
    ) -> impl Future<Output = Result<ListCollectiblesResponse, ApiError>> + Send;

    /// Fetch the marketplace configuration (collections and listing rules)
    fn get_marketplace_config(
        &self,
    ) -> impl Future<Output = Result<MarketplaceConfig, ApiError>> + Send;

    /// Get the name/identifier of this client
    fn name(&self) -> &'static str {
        "marketplace"
    }
}

/// Common errors that can occur when working with API clients
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// HTTP request failed or returned an unexpected status
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Invalid response format
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    /// Client independent error
    #[error(transparent)]
    Custom { error: anyhow::Error },
}

impl ApiError {
    /// Wrap an arbitrary error, e.g. from a test double
    pub fn custom(error: impl Into<anyhow::Error>) -> Self {
        Self::Custom {
            error: error.into(),
        }
    }
}
