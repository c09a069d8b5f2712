// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory upstream clients for reconciliation tests
#![allow(missing_docs, dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use alloy_primitives::Address;
use api_client::{
    AlternateIndexerClient, AlternateTokenBalancesRequest, AlternateTokenBalancesResponse,
    ApiError, CollectibleOrder, ContractType, GetTokenBalancesRequest, GetTokenBalancesResponse,
    IndexerClient, ListCollectiblesRequest, ListCollectiblesResponse, MarketplaceClient,
    MarketplaceConfig, Order, TokenBalance, TokenMetadata,
};
use inventory::{InventoryArgs, InventoryFetcher, InventoryPage, InventoryStore};
use parking_lot::Mutex;
use shared_types::{ChainId, PageInfo, PageRequest};

pub const COLLECTION: Address = Address::new([0xc0; 20]);
pub const ACCOUNT: Address = Address::new([0xa1; 20]);

pub fn args() -> InventoryArgs {
    InventoryArgs::new(ChainId::POLYGON, COLLECTION, ACCOUNT)
}

pub fn laos_args() -> InventoryArgs {
    InventoryArgs::new(ChainId::LAOS, COLLECTION, ACCOUNT).laos721()
}

pub fn balance(token_id: &str, amount: &str) -> TokenBalance {
    TokenBalance {
        contract_type: ContractType::Erc1155,
        contract_address: format!("{COLLECTION:#x}"),
        account_address: format!("{ACCOUNT:#x}"),
        token_id: Some(token_id.to_string()),
        balance: amount.to_string(),
        block_number: Some(1),
        chain_id: None,
        contract_info: None,
        token_metadata: Some(TokenMetadata {
            token_id: token_id.to_string(),
            name: format!("indexed {token_id}"),
            ..TokenMetadata::default()
        }),
    }
}

pub fn balances(ids: &[&str]) -> Vec<TokenBalance> {
    ids.iter().map(|id| balance(id, "1")).collect()
}

pub fn upstream_error(message: &str) -> ApiError {
    ApiError::Http {
        message: message.to_string(),
    }
}

pub fn ids(page: &InventoryPage) -> Vec<String> {
    page.collectibles
        .iter()
        .map(|collectible| collectible.token_id().to_string())
        .collect()
}

/// Paginated indexer serving a fixed token list
#[derive(Debug, Clone, Default)]
pub struct FakeIndexer {
    balances: Arc<Mutex<Vec<TokenBalance>>>,
    failing: Arc<Mutex<bool>>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl FakeIndexer {
    pub fn new(balances: Vec<TokenBalance>) -> Self {
        Self {
            balances: Arc::new(Mutex::new(balances)),
            ..Self::default()
        }
    }

    pub fn with_ids(ids: &[&str]) -> Self {
        Self::new(balances(ids))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IndexerClient for FakeIndexer {
    async fn get_token_balances(
        &self,
        _chain_id: ChainId,
        request: &GetTokenBalancesRequest,
    ) -> Result<GetTokenBalancesResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if *self.failing.lock() {
            return Err(upstream_error("500: indexer unavailable"));
        }

        let all = self.balances.lock().clone();
        let size = request.page.page_size as usize;
        let start = (request.page.page as usize - 1) * size;
        let end = (start + size).min(all.len());
        let balances = all.get(start..end).map(<[_]>::to_vec).unwrap_or_default();

        Ok(GetTokenBalancesResponse {
            balances,
            page: PageInfo::for_request(request.page, end < all.len()),
        })
    }
}

fn listed(token_id: &str) -> CollectibleOrder {
    CollectibleOrder {
        metadata: TokenMetadata {
            token_id: token_id.to_string(),
            name: format!("listed {token_id}"),
            ..TokenMetadata::default()
        },
        listing: Some(Order {
            order_id: format!("order-{token_id}"),
            price_amount: "1000".to_string(),
            ..Order::default()
        }),
    }
}

fn listing_page(pages: &[Vec<String>], request: &PageRequest) -> ListCollectiblesResponse {
    let index = request.page as usize - 1;
    let collectibles = pages
        .get(index)
        .map(|ids| ids.iter().map(|id| listed(id)).collect())
        .unwrap_or_default();
    ListCollectiblesResponse {
        collectibles,
        page: Some(PageInfo::for_request(*request, index + 1 < pages.len())),
    }
}

fn to_pages(pages: &[&[&str]]) -> Vec<Vec<String>> {
    pages
        .iter()
        .map(|page| page.iter().map(ToString::to_string).collect())
        .collect()
}

/// Marketplace serving fixed listing pages, page `n` being `pages[n - 1]`
#[derive(Debug, Clone, Default)]
pub struct FakeMarketplace {
    pages: Arc<Vec<Vec<String>>>,
    config: Arc<MarketplaceConfig>,
    failing: Arc<Mutex<bool>>,
    list_calls: Arc<AtomicUsize>,
    config_calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<ListCollectiblesRequest>>>,
}

impl FakeMarketplace {
    pub fn with_pages(pages: &[&[&str]]) -> Self {
        Self {
            pages: Arc::new(to_pages(pages)),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn config_calls(&self) -> usize {
        self.config_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ListCollectiblesRequest> {
        self.requests.lock().clone()
    }
}

impl MarketplaceClient for FakeMarketplace {
    async fn list_collectibles(
        &self,
        request: &ListCollectiblesRequest,
    ) -> Result<ListCollectiblesResponse, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        if *self.failing.lock() {
            return Err(upstream_error("503: marketplace unavailable"));
        }
        Ok(listing_page(&self.pages, &request.page))
    }

    async fn get_marketplace_config(&self) -> Result<MarketplaceConfig, ApiError> {
        self.config_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.config.as_ref().clone())
    }

    fn name(&self) -> &'static str {
        "fake-marketplace"
    }
}

/// LAOS indexer returning a fixed balance list and listing pages
#[derive(Debug, Clone, Default)]
pub struct FakeLaos {
    balances: Arc<Vec<TokenBalance>>,
    pages: Arc<Vec<Vec<String>>>,
    listing_fails: bool,
    balance_calls: Arc<AtomicUsize>,
    list_calls: Arc<AtomicUsize>,
}

impl FakeLaos {
    pub fn new(balances: Vec<TokenBalance>, pages: &[&[&str]]) -> Self {
        Self {
            balances: Arc::new(balances),
            pages: Arc::new(to_pages(pages)),
            ..Self::default()
        }
    }

    pub fn with_failing_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl AlternateIndexerClient for FakeLaos {
    async fn get_token_balances(
        &self,
        _request: &AlternateTokenBalancesRequest,
    ) -> Result<AlternateTokenBalancesResponse, ApiError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AlternateTokenBalancesResponse {
            balances: self.balances.as_ref().clone(),
        })
    }

    async fn list_collectibles(
        &self,
        request: &ListCollectiblesRequest,
    ) -> Result<ListCollectiblesResponse, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.listing_fails {
            return Err(upstream_error("502: laos listing unavailable"));
        }
        Ok(listing_page(&self.pages, &request.page))
    }
}

pub type FakeFetcher = InventoryFetcher<FakeIndexer, FakeLaos, FakeMarketplace>;

pub fn fetcher(indexer: &FakeIndexer, laos: &FakeLaos, marketplace: &FakeMarketplace) -> FakeFetcher {
    InventoryFetcher::new(
        indexer.clone(),
        laos.clone(),
        marketplace.clone(),
        Arc::new(InventoryStore::new()),
    )
}

/// Request pages 1.. until the stream reports no more, capped at `max_pages`
pub async fn drain(
    fetcher: &FakeFetcher,
    args: &InventoryArgs,
    page_size: u32,
    max_pages: u32,
) -> Vec<InventoryPage> {
    let mut pages = Vec::new();
    for page in 1..=max_pages {
        let result = fetcher
            .fetch_inventory(args, PageRequest { page, page_size })
            .await
            .unwrap();
        let more = result.page.more;
        pages.push(result);
        if !more {
            break;
        }
    }
    pages
}
