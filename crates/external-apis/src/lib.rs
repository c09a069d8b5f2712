// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP integrations for the services behind an NFT inventory
//!
//! This crate provides implementations of the `api-client` traits for the
//! remote services the inventory engine reconciles:
//!
//! - [`indexer::SequenceIndexerClient`]: paginated token balances per chain
//! - [`laos::LaosClient`]: single-shot balances and listings for LAOS-bridged
//!   collections
//! - [`marketplace::MarketplaceApiClient`]: listing-aware collectible feed and
//!   marketplace configuration
//!
//! All clients share a JSON transport that enforces a per-request deadline and
//! maps HTTP statuses onto [`api_client::ApiError`]. Errors are never retried
//! here; retry policy belongs to the caller.

pub mod indexer;
pub mod laos;
pub mod marketplace;
mod rpc;

pub use indexer::*;
pub use laos::*;
pub use marketplace::*;
pub use rpc::RpcError;
