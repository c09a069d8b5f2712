// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for inventory reconciliation

use api_client::ApiError;
use external_apis::RpcError;
use shared_types::PageError;
use thiserror::Error;

/// Result type alias for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors surfaced by a page request
///
/// Every variant is fatal to the page request that raised it. State is only
/// written after the corresponding upstream call succeeded, so a failed request
/// never leaves partial progress behind.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Indexer, alternate indexer or marketplace failure, passed through as-is
    #[error(transparent)]
    Upstream(#[from] ApiError),

    /// The alternate indexer returned a balance without token metadata
    #[error("alternate indexer returned token {token_id} without metadata")]
    MissingMetadata {
        /// Offending token id
        token_id: String,
    },

    /// Page cursor rejected before any request was made
    #[error("invalid page request: {0}")]
    InvalidPage(#[from] PageError),
}

impl InventoryError {
    /// Whether the error came from a remote service
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

/// Errors raised while loading or applying [`crate::InventoryConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A loaded value is out of range
    #[error("invalid configuration: {message}")]
    Invalid {
        /// What is wrong
        message: String,
    },

    /// An HTTP client rejected its settings
    #[error("failed to build {service} client: {source}")]
    Client {
        /// Client being built
        service: &'static str,
        /// Underlying error
        #[source]
        source: RpcError,
    },
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
