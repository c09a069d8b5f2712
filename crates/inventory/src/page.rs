// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! One page of the marketplace feed, enriched with indexer data

use api_client::{
    AlternateIndexerClient, CollectibleOrder, CollectibleWithBalance, MarketplaceClient,
    MarketplaceConfig,
};
use indexmap::IndexMap;
use serde::Serialize;
use shared_types::PageRequest;
use tracing::debug;

use crate::{
    error::InventoryResult,
    key::InventoryArgs,
    listing::{ListingFallback, list_collectibles, list_request},
    state::{InventoryProgress, InventoryState},
};

/// Result of fetching one marketplace page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplacePage {
    /// Marketplace collectibles in feed order, merged with indexer data
    pub enriched_collectibles: Vec<CollectibleWithBalance>,
    /// Up to one page of indexer tokens the feed has not returned yet
    pub missing_tokens: Vec<CollectibleWithBalance>,
    /// The feed has further pages
    pub more: bool,
}

/// Fetch one marketplace page and record its token ids as seen
///
/// Nothing is written to `state` unless the listing call succeeded.
pub(crate) async fn fetch_marketplace_page<A, M>(
    alternate: &A,
    marketplace: &M,
    fallback: ListingFallback,
    args: &InventoryArgs,
    config: &MarketplaceConfig,
    state: &InventoryState,
    page: PageRequest,
) -> InventoryResult<MarketplacePage>
where
    A: AlternateIndexerClient,
    M: MarketplaceClient,
{
    let request = list_request(args, config, page);
    let response = list_collectibles(alternate, marketplace, fallback, args, &request).await?;
    let more = response.has_more();

    let mut progress = state.write();
    let enriched_collectibles = enrich(response.collectibles, &progress.indexer_token_balances);
    progress.mark_seen(enriched_collectibles.iter().map(CollectibleWithBalance::token_id));
    let missing_tokens = missing_tokens(&progress, page_len(page));
    drop(progress);

    debug!(
        page = page.page,
        listed = enriched_collectibles.len(),
        missing = missing_tokens.len(),
        more,
        "fetched marketplace page"
    );

    Ok(MarketplacePage {
        enriched_collectibles,
        missing_tokens,
        more,
    })
}

/// Merge marketplace collectibles with the indexer's view of the same tokens
///
/// Listed tokens keep their marketplace metadata and listing. Balance and
/// contract fields come from the indexer record when one exists.
pub fn enrich(
    collectibles: Vec<CollectibleOrder>,
    indexer_tokens: &IndexMap<String, CollectibleWithBalance>,
) -> Vec<CollectibleWithBalance> {
    collectibles
        .into_iter()
        .map(|collectible| {
            let indexed = indexer_tokens.get(&collectible.metadata.token_id);
            CollectibleWithBalance {
                contract_info: indexed.and_then(|token| token.contract_info.clone()),
                contract_type: indexed.and_then(|token| token.contract_type),
                balance: indexed.and_then(|token| token.balance.clone()),
                metadata: collectible.metadata,
                listing: collectible.listing,
            }
        })
        .collect()
}

/// First `limit` indexer tokens not yet returned, in discovery order
pub fn missing_tokens(progress: &InventoryProgress, limit: usize) -> Vec<CollectibleWithBalance> {
    progress.unseen_tokens().take(limit).cloned().collect()
}

pub(crate) fn page_len(page: PageRequest) -> usize {
    usize::try_from(page.page_size).unwrap_or(usize::MAX)
}
