// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Paginated inventory reconciliation
//!
//! [`InventoryFetcher::fetch_inventory`] merges two views of an account's
//! holdings into one page stream:
//!
//! 1. The first request for a key sweeps the indexer for every token held.
//! 2. While the marketplace feed has pages, each request returns one
//!    marketplace page enriched with indexer balances.
//! 3. The request that reaches the last marketplace page appends up to one
//!    page of tokens the marketplace never returned.
//! 4. Later requests page through the remaining indexer tokens.
//!
//! Across the stream every indexer token is returned exactly once.

use std::sync::Arc;

use api_client::{
    AlternateIndexerClient, CollectibleWithBalance, IndexerClient, MarketplaceClient,
};
use serde::Serialize;
use shared_types::{DEFAULT_PAGE_SIZE, PageInfo, PageRequest};
use tracing::{debug, info, instrument};

use crate::{
    error::InventoryResult,
    key::{CollectionKey, InventoryArgs},
    listing::ListingFallback,
    page::{MarketplacePage, fetch_marketplace_page, page_len},
    source::{AlternateSweep, IndexerSweep, SelectedSource, TokenSource},
    state::{InventoryState, InventoryStore},
};

/// Tunables of an [`InventoryFetcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetcherSettings {
    /// Page size of the indexer sweep
    pub sweep_page_size: u32,
    /// Serialize concurrent first-time sweeps of the same key
    pub dedupe_sweeps: bool,
    /// Behaviour when the alternate listing endpoint fails
    pub listing_fallback: ListingFallback,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            sweep_page_size: DEFAULT_PAGE_SIZE,
            dedupe_sweeps: false,
            listing_fallback: ListingFallback::default(),
        }
    }
}

/// One page of an account's inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryPage {
    /// Collectibles of this page
    pub collectibles: Vec<CollectibleWithBalance>,
    /// Cursor echo and continuation flag
    pub page: PageInfo,
}

impl InventoryPage {
    fn new(collectibles: Vec<CollectibleWithBalance>, request: PageRequest, more: bool) -> Self {
        Self {
            collectibles,
            page: PageInfo::for_request(request, more),
        }
    }
}

/// Reconciles indexer holdings with the marketplace feed
#[derive(Debug)]
pub struct InventoryFetcher<I, A, M> {
    indexer: I,
    alternate: A,
    marketplace: M,
    store: Arc<InventoryStore>,
    settings: FetcherSettings,
}

impl<I, A, M> InventoryFetcher<I, A, M>
where
    I: IndexerClient,
    A: AlternateIndexerClient,
    M: MarketplaceClient,
{
    /// Create a fetcher over the given clients and shared store
    pub fn new(indexer: I, alternate: A, marketplace: M, store: Arc<InventoryStore>) -> Self {
        Self {
            indexer,
            alternate,
            marketplace,
            store,
            settings: FetcherSettings::default(),
        }
    }

    /// Replace the default settings
    #[must_use]
    pub fn with_settings(mut self, settings: FetcherSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Shared progress store
    pub fn store(&self) -> &Arc<InventoryStore> {
        &self.store
    }

    /// Active settings
    pub fn settings(&self) -> FetcherSettings {
        self.settings
    }

    /// Fetch one page of the account's inventory
    ///
    /// Pages must be requested in order starting at 1 with a constant page
    /// size; the stream is driven by per-key progress, not by the page number.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InventoryError::InvalidPage`] for a zero page or page
    /// size, and any upstream or data-shape error unchanged. Progress is not
    /// advanced by a failed request.
    #[instrument(
        skip(self, args, page),
        fields(
            key = %args.key(),
            laos = args.is_laos721,
            page = page.page,
            page_size = page.page_size
        )
    )]
    pub async fn fetch_inventory(
        &self,
        args: &InventoryArgs,
        page: PageRequest,
    ) -> InventoryResult<InventoryPage> {
        page.validate()?;
        let key = args.key();
        let state = self.store.get_or_init(&key);

        if !state.indexer_tokens_fetched() {
            self.sweep(args, &key, &state).await?;
        }

        if state.marketplace_finished() {
            return Ok(leftover_page(&state, page));
        }

        let config = self.marketplace.get_marketplace_config().await?;
        let MarketplacePage {
            mut enriched_collectibles,
            missing_tokens,
            more,
        } = fetch_marketplace_page(
            &self.alternate,
            &self.marketplace,
            self.settings.listing_fallback,
            args,
            &config,
            &state,
            page,
        )
        .await?;

        if more {
            return Ok(InventoryPage::new(enriched_collectibles, page, true));
        }

        {
            let mut progress = state.write();
            progress.marketplace_finished = true;
            progress.mark_seen(missing_tokens.iter().map(CollectibleWithBalance::token_id));
        }
        info!(
            listed = enriched_collectibles.len(),
            missing = missing_tokens.len(),
            "marketplace feed exhausted"
        );

        let more = !missing_tokens.is_empty();
        enriched_collectibles.extend(missing_tokens);
        Ok(InventoryPage::new(enriched_collectibles, page, more))
    }

    /// Forget progress for one key, or for every key when `key` is `None`
    pub fn clear_inventory_state(&self, key: Option<&CollectionKey>) {
        match key {
            Some(key) => self.store.clear(key),
            None => self.store.clear_all(),
        }
    }

    async fn sweep(
        &self,
        args: &InventoryArgs,
        key: &CollectionKey,
        state: &InventoryState,
    ) -> InventoryResult<()> {
        let _guard = if self.settings.dedupe_sweeps {
            Some(self.store.sweep_guard(key).lock_owned().await)
        } else {
            None
        };
        if state.indexer_tokens_fetched() {
            debug!("indexer sweep already completed by a concurrent request");
            return Ok(());
        }

        let source = self.source_for(args);
        let tokens = source.fetch_all(args).await?;
        let count = tokens.len();
        state.record_sweep(tokens);
        info!(source = source.name(), tokens = count, "primed indexer tokens");
        Ok(())
    }

    fn source_for(&self, args: &InventoryArgs) -> SelectedSource<'_, I, A> {
        if args.is_laos721 {
            SelectedSource::Alternate(AlternateSweep::new(&self.alternate))
        } else {
            SelectedSource::Indexer(IndexerSweep::new(
                &self.indexer,
                self.settings.sweep_page_size,
            ))
        }
    }
}

/// Next page of indexer tokens the stream has not returned yet
fn leftover_page(state: &InventoryState, page: PageRequest) -> InventoryPage {
    let limit = page_len(page);
    let mut guard = state.write();
    let progress = &mut *guard;

    let (batch, more) = {
        let mut unseen = progress.unseen_tokens();
        let batch: Vec<CollectibleWithBalance> = unseen.by_ref().take(limit).cloned().collect();
        (batch, unseen.next().is_some())
    };
    progress.mark_seen(batch.iter().map(CollectibleWithBalance::token_id));
    drop(guard);

    debug!(returned = batch.len(), more, "served leftover indexer tokens");
    InventoryPage::new(batch, page, more)
}
