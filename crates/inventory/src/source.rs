// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Full-inventory token sources
//!
//! A [`TokenSource`] returns every token an account holds in one collection.
//! The standard source walks the paginated indexer to exhaustion; the
//! alternate source issues a single sorted call to the LAOS indexer.

use api_client::{
    AlternateIndexerClient, AlternateTokenBalancesRequest, CollectibleWithBalance, ContractInfo,
    ContractType, GetTokenBalancesRequest, IndexerClient, SortBy, SortedPage, TokenBalance,
    TokenMetadata,
};
use indexmap::IndexMap;
use shared_types::{DEFAULT_PAGE_SIZE, PageRequest};
use tracing::{debug, warn};

use crate::{
    error::{InventoryError, InventoryResult},
    key::InventoryArgs,
};

/// Tokens keyed by token id, in discovery order
pub type TokenMap = IndexMap<String, CollectibleWithBalance>;

/// Provider of an account's complete token holdings in a collection
pub trait TokenSource: Send + Sync {
    /// Fetch every token; a failure anywhere fails the whole sweep
    fn fetch_all(
        &self,
        args: &InventoryArgs,
    ) -> impl Future<Output = InventoryResult<TokenMap>> + Send;

    /// Source name for logs
    fn name(&self) -> &'static str;
}

/// Paginated sweep over the standard indexer
#[derive(Debug)]
pub struct IndexerSweep<'a, C> {
    client: &'a C,
    page_size: u32,
}

impl<'a, C: IndexerClient> IndexerSweep<'a, C> {
    /// Sweep with the given page size; zero falls back to the default
    pub fn new(client: &'a C, page_size: u32) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self { client, page_size }
    }
}

impl<C: IndexerClient> TokenSource for IndexerSweep<'_, C> {
    async fn fetch_all(&self, args: &InventoryArgs) -> InventoryResult<TokenMap> {
        let mut tokens = TokenMap::new();
        let mut page = PageRequest::first(self.page_size);
        let account_address = args.account_hex();
        let contract_address = args.collection_hex();

        loop {
            let request = GetTokenBalancesRequest {
                account_address: account_address.clone(),
                contract_address: contract_address.clone(),
                include_metadata: true,
                page,
            };
            let response = self
                .client
                .get_token_balances(args.chain_id, &request)
                .await?;

            let received = response.balances.len();
            tokens.extend(response.balances.into_iter().filter_map(indexer_record));

            if !response.page.more {
                break;
            }
            if received == 0 {
                warn!(
                    chain_id = %args.chain_id,
                    page = page.page,
                    "indexer reported more pages after an empty page, stopping sweep"
                );
                break;
            }
            let Some(next) = page.next() else {
                warn!(
                    chain_id = %args.chain_id,
                    page = page.page,
                    "indexer reported more pages past the last page number, stopping sweep"
                );
                break;
            };
            page = next;
        }

        debug!(
            chain_id = %args.chain_id,
            pages = page.page,
            tokens = tokens.len(),
            "indexer sweep complete"
        );
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "indexer"
    }
}

/// Single-call listing from the LAOS indexer, newest first
#[derive(Debug)]
pub struct AlternateSweep<'a, C> {
    client: &'a C,
}

impl<'a, C: AlternateIndexerClient> AlternateSweep<'a, C> {
    /// Wrap an alternate indexer client
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

impl<C: AlternateIndexerClient> TokenSource for AlternateSweep<'_, C> {
    async fn fetch_all(&self, args: &InventoryArgs) -> InventoryResult<TokenMap> {
        let request = AlternateTokenBalancesRequest {
            chain_id: args.chain_id,
            account_address: args.account_hex(),
            contract_address: args.collection_hex(),
            include_metadata: true,
            page: SortedPage {
                sort: vec![SortBy::newest_first()],
            },
        };
        let response = self.client.get_token_balances(&request).await?;

        let mut tokens = TokenMap::new();
        for balance in response.balances {
            if let Some((token_id, record)) = alternate_record(balance)? {
                tokens.insert(token_id, record);
            }
        }

        debug!(chain_id = %args.chain_id, tokens = tokens.len(), "alternate sweep complete");
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "alternate-indexer"
    }
}

/// Source picked once per request from the collection kind
#[derive(Debug)]
pub(crate) enum SelectedSource<'a, I, A> {
    Indexer(IndexerSweep<'a, I>),
    Alternate(AlternateSweep<'a, A>),
}

impl<I: IndexerClient, A: AlternateIndexerClient> TokenSource for SelectedSource<'_, I, A> {
    async fn fetch_all(&self, args: &InventoryArgs) -> InventoryResult<TokenMap> {
        match self {
            Self::Indexer(source) => source.fetch_all(args).await,
            Self::Alternate(source) => source.fetch_all(args).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Indexer(source) => source.name(),
            Self::Alternate(source) => source.name(),
        }
    }
}

/// Normalize an indexer balance; balances without a token id are skipped
pub(crate) fn indexer_record(balance: TokenBalance) -> Option<(String, CollectibleWithBalance)> {
    let token_id = balance.token_id()?.to_owned();
    let metadata = balance.token_metadata.unwrap_or_default();
    Some(normalize(
        token_id,
        metadata,
        balance.contract_type,
        balance.contract_info,
        balance.balance,
    ))
}

/// Normalize an alternate-indexer balance; metadata is mandatory there
pub(crate) fn alternate_record(
    balance: TokenBalance,
) -> InventoryResult<Option<(String, CollectibleWithBalance)>> {
    let Some(token_id) = balance.token_id().map(ToOwned::to_owned) else {
        return Ok(None);
    };
    let Some(metadata) = balance.token_metadata else {
        return Err(InventoryError::MissingMetadata { token_id });
    };
    Ok(Some(normalize(
        token_id,
        metadata,
        balance.contract_type,
        balance.contract_info,
        balance.balance,
    )))
}

fn normalize(
    token_id: String,
    metadata: TokenMetadata,
    contract_type: ContractType,
    contract_info: Option<ContractInfo>,
    balance: String,
) -> (String, CollectibleWithBalance) {
    let record = CollectibleWithBalance {
        metadata: TokenMetadata {
            token_id: token_id.clone(),
            ..metadata
        },
        listing: None,
        contract_info,
        contract_type: Some(contract_type),
        balance: Some(balance),
    };
    (token_id, record)
}
