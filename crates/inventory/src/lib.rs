// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFT inventory reconciliation
//!
//! Pages through every token an account holds in a collection. Tokens with an
//! active marketplace listing come first, in marketplace order and enriched
//! with indexer balances; tokens the marketplace never returns follow. Each
//! token is returned exactly once per stream.
//!
//! # Module Structure
//!
//! - [`fetcher`]: the page orchestrator, [`InventoryFetcher`]
//! - [`state`]: per-collection progress shared across requests
//! - [`source`]: full-inventory sweeps over the indexer or the LAOS indexer
//! - [`page`]: one enriched marketplace page
//! - [`listing`]: listing requests and the alternate-listing fallback policy
//! - [`key`]: request arguments and the collection cache key
//! - [`config`]: hierarchical configuration and HTTP wiring
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod fetcher;
pub mod key;
pub mod listing;
pub mod page;
pub mod source;
pub mod state;

pub use config::{HttpInventoryFetcher, InventoryConfig};
pub use error::{ConfigError, InventoryError, InventoryResult};
pub use fetcher::{FetcherSettings, InventoryFetcher, InventoryPage};
pub use key::{CollectionKey, InventoryArgs, collection_key};
pub use listing::ListingFallback;
pub use page::MarketplacePage;
pub use source::{AlternateSweep, IndexerSweep, TokenMap, TokenSource};
pub use state::{InventoryProgress, InventoryState, InventoryStore};
