// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Inventory request arguments and the per-collection cache key

use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use shared_types::ChainId;

/// Identifies whose inventory to page through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryArgs {
    /// Holder
    pub account_address: Address,
    /// Collection contract
    pub collection_address: Address,
    /// Chain of the collection
    pub chain_id: ChainId,
    /// Collection is LAOS-bridged and served by the alternate indexer
    #[serde(default)]
    pub is_laos721: bool,
}

impl InventoryArgs {
    /// Arguments for a standard (non-LAOS) collection
    pub fn new(chain_id: ChainId, collection_address: Address, account_address: Address) -> Self {
        Self {
            account_address,
            collection_address,
            chain_id,
            is_laos721: false,
        }
    }

    /// Mark the collection as LAOS-bridged
    #[must_use]
    pub fn laos721(mut self) -> Self {
        self.is_laos721 = true;
        self
    }

    /// Cache key of this inventory stream
    pub fn key(&self) -> CollectionKey {
        CollectionKey {
            chain_id: self.chain_id,
            collection: self.collection_address,
            account: self.account_address,
        }
    }

    /// Collection address as lowercase `0x` hex, the form upstream APIs expect
    pub fn collection_hex(&self) -> String {
        hex_address(&self.collection_address)
    }

    /// Account address as lowercase `0x` hex
    pub fn account_hex(&self) -> String {
        hex_address(&self.account_address)
    }
}

/// Composite key of one inventory stream: (chain, collection, account)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionKey {
    /// Chain
    pub chain_id: ChainId,
    /// Collection contract
    pub collection: Address,
    /// Holder
    pub account: Address,
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.chain_id,
            hex_address(&self.collection),
            hex_address(&self.account)
        )
    }
}

/// String form of the cache key, `chainId:collection:account`
pub fn collection_key(args: &InventoryArgs) -> String {
    args.key().to_string()
}

pub(crate) fn hex_address(address: &Address) -> String {
    format!("{address:#x}")
}
