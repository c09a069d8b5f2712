// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Listing-aware collectible pages
//!
//! LAOS collections try the alternate indexer's listing endpoint first; every
//! other collection goes straight to the marketplace.

use std::{fmt, str::FromStr};

use api_client::{
    AlternateIndexerClient, ApiError, CollectiblesFilter, ListCollectiblesRequest,
    ListCollectiblesResponse, MarketplaceClient, MarketplaceConfig, OrderSide,
};
use serde::{Deserialize, Serialize};
use shared_types::PageRequest;
use tracing::warn;

use crate::key::InventoryArgs;

/// What to do when the alternate listing endpoint fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingFallback {
    /// Log the failure and serve the page from the marketplace
    #[default]
    Marketplace,
    /// Fail the page request with the alternate indexer's error
    Propagate,
}

impl fmt::Display for ListingFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marketplace => f.write_str("marketplace"),
            Self::Propagate => f.write_str("propagate"),
        }
    }
}

impl FromStr for ListingFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "marketplace" => Ok(Self::Marketplace),
            "propagate" => Ok(Self::Propagate),
            other => Err(format!(
                "unknown listing fallback '{other}', expected 'marketplace' or 'propagate'"
            )),
        }
    }
}

/// Build the listing request for one page of an account's holdings
///
/// Property exclusions come from the marketplace configuration of the
/// collection; an unconfigured collection has none.
pub fn list_request(
    args: &InventoryArgs,
    config: &MarketplaceConfig,
    page: PageRequest,
) -> ListCollectiblesRequest {
    let contract_address = args.collection_hex();
    let exclude_properties = config
        .collection(args.chain_id, &contract_address)
        .and_then(|collection| collection.filter_settings.as_ref())
        .map(|settings| settings.exclusions.clone())
        .unwrap_or_default();

    ListCollectiblesRequest {
        chain_id: args.chain_id,
        contract_address,
        side: OrderSide::Listing,
        filter: CollectiblesFilter {
            include_empty: true,
            in_accounts: vec![args.account_hex()],
            exclude_properties,
        },
        page,
    }
}

/// Fetch one listing page from the source matching the collection kind
pub(crate) async fn list_collectibles<A, M>(
    alternate: &A,
    marketplace: &M,
    fallback: ListingFallback,
    args: &InventoryArgs,
    request: &ListCollectiblesRequest,
) -> Result<ListCollectiblesResponse, ApiError>
where
    A: AlternateIndexerClient,
    M: MarketplaceClient,
{
    if args.is_laos721 {
        match alternate.list_collectibles(request).await {
            Ok(response) => return Ok(response),
            Err(error) if fallback == ListingFallback::Propagate => return Err(error),
            Err(error) => {
                warn!(
                    chain_id = %args.chain_id,
                    page = request.page.page,
                    marketplace = marketplace.name(),
                    error = %error,
                    "alternate listing failed, falling back to marketplace"
                );
            }
        }
    }
    marketplace.list_collectibles(request).await
}
