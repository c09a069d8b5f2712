// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Per-collection inventory progress
//!
//! One [`InventoryStore`] is created per application (or per query cache) and
//! shared by every caller. It maps a [`CollectionKey`] to the progress of that
//! inventory stream: which tokens were already returned, whether the indexer
//! sweep ran, and whether the marketplace feed is exhausted.
//!
//! # Concurrency
//!
//! No lock is held across upstream calls. Two concurrent first requests for
//! the same key can both run the indexer sweep; the second write overwrites
//! the first with identical data. [`InventoryStore::sweep_guard`] lets the
//! fetcher serialize sweeps per key when that duplicate work matters.
//!
//! Clearing a key detaches its state: requests already holding the old
//! `Arc<InventoryState>` finish against it and their writes are dropped with it.

use std::{collections::HashSet, sync::Arc};

use api_client::CollectibleWithBalance;
use dashmap::DashMap;
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::key::CollectionKey;

/// Progress of one inventory stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryProgress {
    /// Token ids already returned to the caller; only ever grows
    pub seen_token_ids: HashSet<String>,
    /// The marketplace feed reported its last page; never reset
    pub marketplace_finished: bool,
    /// The indexer sweep completed; never reset
    pub indexer_tokens_fetched: bool,
    /// Every token the indexer reported, in discovery order
    pub indexer_token_balances: IndexMap<String, CollectibleWithBalance>,
}

impl InventoryProgress {
    /// Indexer tokens not yet returned, in discovery order
    pub fn unseen_tokens(&self) -> impl Iterator<Item = &CollectibleWithBalance> {
        self.indexer_token_balances
            .values()
            .filter(|token| !self.seen_token_ids.contains(token.token_id()))
    }

    /// Record token ids as returned
    pub(crate) fn mark_seen<'a>(&mut self, token_ids: impl IntoIterator<Item = &'a str>) {
        self.seen_token_ids
            .extend(token_ids.into_iter().map(ToOwned::to_owned));
    }
}

/// Shared, interior-mutable progress for one key
#[derive(Debug, Default)]
pub struct InventoryState {
    progress: RwLock<InventoryProgress>,
}

impl InventoryState {
    /// Whether the indexer sweep has completed
    pub fn indexer_tokens_fetched(&self) -> bool {
        self.progress.read().indexer_tokens_fetched
    }

    /// Whether the marketplace feed is exhausted
    pub fn marketplace_finished(&self) -> bool {
        self.progress.read().marketplace_finished
    }

    /// Number of token ids returned so far
    pub fn seen_count(&self) -> usize {
        self.progress.read().seen_token_ids.len()
    }

    /// Number of tokens known from the indexer
    pub fn indexer_token_count(&self) -> usize {
        self.progress.read().indexer_token_balances.len()
    }

    /// Copy of the current progress
    pub fn snapshot(&self) -> InventoryProgress {
        self.progress.read().clone()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, InventoryProgress> {
        self.progress.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, InventoryProgress> {
        self.progress.write()
    }

    /// Store a completed sweep; existing entries are overwritten in place
    pub(crate) fn record_sweep(&self, tokens: IndexMap<String, CollectibleWithBalance>) {
        let mut progress = self.progress.write();
        progress.indexer_token_balances.extend(tokens);
        progress.indexer_tokens_fetched = true;
    }
}

/// Keyed store of inventory progress
#[derive(Debug, Default)]
pub struct InventoryStore {
    states: DashMap<CollectionKey, Arc<InventoryState>>,
    sweep_guards: DashMap<CollectionKey, Arc<Mutex<()>>>,
}

impl InventoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the state for `key`, creating an empty one on first access
    pub fn get_or_init(&self, key: &CollectionKey) -> Arc<InventoryState> {
        let entry = self.states.entry(*key).or_insert_with(|| {
            debug!(key = %key, "initialized inventory state");
            Arc::default()
        });
        Arc::clone(entry.value())
    }

    /// Return the state for `key` without creating it
    pub fn get(&self, key: &CollectionKey) -> Option<Arc<InventoryState>> {
        self.states.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Discard the state for `key`; the next access starts from empty
    pub fn clear(&self, key: &CollectionKey) {
        let removed = self.states.remove(key).is_some();
        self.sweep_guards.remove(key);
        debug!(key = %key, removed, "cleared inventory state");
    }

    /// Discard every key
    pub fn clear_all(&self) {
        let count = self.states.len();
        self.states.clear();
        self.sweep_guards.clear();
        info!(count, "cleared all inventory state");
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no key is tracked
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Per-key async mutex used to serialize indexer sweeps
    pub(crate) fn sweep_guard(&self, key: &CollectionKey) -> Arc<Mutex<()>> {
        Arc::clone(self.sweep_guards.entry(*key).or_default().value())
    }
}
