// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Wire data types shared by the indexer, the alternate indexer and the
//! marketplace API
//!
//! All bodies are camelCase JSON. Optional fields default so that partial
//! upstream payloads still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{ChainId, PageInfo, PageRequest};

/// Token standard of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContractType {
    /// Native chain currency
    #[serde(rename = "NATIVE")]
    Native,
    /// ERC-20 fungible token
    #[serde(rename = "ERC20")]
    Erc20,
    /// ERC-721 non-fungible token
    #[serde(rename = "ERC721")]
    Erc721,
    /// ERC-1155 multi-token
    #[serde(rename = "ERC1155")]
    Erc1155,
    /// ERC-721 collection bridged through LAOS; served by the alternate indexer
    #[serde(rename = "LAOS-ERC-721", alias = "LAOS-ERC721")]
    LaosErc721,
    /// Unknown/unidentified contract type
    #[default]
    #[serde(rename = "UNKNOWN", other)]
    Unknown,
}

impl ContractType {
    /// Whether this contract holds non-fungible collectibles
    pub fn is_collectible(self) -> bool {
        matches!(self, Self::Erc721 | Self::Erc1155 | Self::LaosErc721)
    }
}

/// Token-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    /// Token id as a decimal string
    #[serde(default)]
    pub token_id: String,
    /// Token name
    #[serde(default)]
    pub name: String,
    /// Description, if any
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Video URL
    #[serde(default)]
    pub video: Option<String>,
    /// Audio URL
    #[serde(default)]
    pub audio: Option<String>,
    /// Trait list as provided by the collection
    #[serde(default)]
    pub attributes: Vec<Value>,
}

/// Contract-level information attached to a balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    /// Chain the contract is deployed on
    #[serde(default)]
    pub chain_id: Option<ChainId>,
    /// Contract address
    #[serde(default)]
    pub address: String,
    /// Contract name
    #[serde(default)]
    pub name: String,
    /// Contract type as reported by the indexer
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Token symbol
    #[serde(default)]
    pub symbol: Option<String>,
    /// Decimals (fungible and 1155 contracts)
    #[serde(default)]
    pub decimals: Option<u32>,
    /// Collection logo
    #[serde(default, rename = "logoURI")]
    pub logo_uri: Option<String>,
    /// Free-form extension data (description, link, verification flags)
    #[serde(default)]
    pub extensions: Value,
}

/// One token balance as returned by an indexer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Contract standard
    #[serde(default)]
    pub contract_type: ContractType,
    /// Collection contract address
    #[serde(default)]
    pub contract_address: String,
    /// Holder address
    #[serde(default)]
    pub account_address: String,
    /// Token id; absent for fungible balances
    #[serde(default, rename = "tokenID")]
    pub token_id: Option<String>,
    /// Balance as a decimal string
    #[serde(default)]
    pub balance: String,
    /// Block number of the last balance change
    #[serde(default)]
    pub block_number: Option<u64>,
    /// Chain of the balance
    #[serde(default)]
    pub chain_id: Option<ChainId>,
    /// Contract info, when requested with metadata
    #[serde(default)]
    pub contract_info: Option<ContractInfo>,
    /// Token metadata, when requested with metadata
    #[serde(default)]
    pub token_metadata: Option<TokenMetadata>,
}

impl TokenBalance {
    /// Token id, if present and non-empty
    pub fn token_id(&self) -> Option<&str> {
        self.token_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Request body for the standard indexer balance listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenBalancesRequest {
    /// Holder address
    pub account_address: String,
    /// Collection contract address
    pub contract_address: String,
    /// Whether to include token metadata and contract info
    pub include_metadata: bool,
    /// Page cursor
    pub page: PageRequest,
}

/// Response of the standard indexer balance listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenBalancesResponse {
    /// Balances on this page
    #[serde(default)]
    pub balances: Vec<TokenBalance>,
    /// Page metadata
    #[serde(default)]
    pub page: PageInfo,
}

/// Sort direction for the alternate indexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// One sort key for the alternate indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    /// Column name, e.g. `CREATED_AT`
    pub column: String,
    /// Direction
    pub order: SortOrder,
}

impl SortBy {
    /// Newest tokens first
    pub fn newest_first() -> Self {
        Self {
            column: "CREATED_AT".to_string(),
            order: SortOrder::Desc,
        }
    }
}

/// Sort-only page cursor accepted by the alternate indexer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortedPage {
    /// Sort keys, applied in order
    pub sort: Vec<SortBy>,
}

/// Request body for the alternate indexer's single-shot balance listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateTokenBalancesRequest {
    /// Chain id, sent as a string
    #[serde(serialize_with = "chain_id_as_string")]
    pub chain_id: ChainId,
    /// Holder address
    pub account_address: String,
    /// Collection contract address
    pub contract_address: String,
    /// Whether to include token metadata
    pub include_metadata: bool,
    /// Sorting
    pub page: SortedPage,
}

/// Response of the alternate indexer balance listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateTokenBalancesResponse {
    /// Every balance the account holds in the collection
    #[serde(default)]
    pub balances: Vec<TokenBalance>,
}

/// Side of the order book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Sell orders
    Listing,
    /// Buy orders
    Offer,
}

/// Property filter used for collection-level exclusions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    /// Trait name
    pub name: String,
    /// Trait values to match
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Filter applied to a collectible listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectiblesFilter {
    /// Include collectibles without orders
    pub include_empty: bool,
    /// Restrict to collectibles held by these accounts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub in_accounts: Vec<String>,
    /// Exclude collectibles matching these properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_properties: Vec<PropertyFilter>,
}

/// Request body for a listing-aware collectible page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCollectiblesRequest {
    /// Chain id, sent as a string
    #[serde(serialize_with = "chain_id_as_string")]
    pub chain_id: ChainId,
    /// Collection contract address
    pub contract_address: String,
    /// Order book side
    pub side: OrderSide,
    /// Filters
    pub filter: CollectiblesFilter,
    /// Page cursor
    pub page: PageRequest,
}

/// A marketplace order attached to a collectible
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    #[serde(default)]
    pub order_id: String,
    /// Marketplace that holds the order
    #[serde(default)]
    pub marketplace: String,
    /// Order status
    #[serde(default)]
    pub status: Option<String>,
    /// Maker
    #[serde(default)]
    pub created_by: Option<String>,
    /// Raw price amount
    #[serde(default)]
    pub price_amount: String,
    /// Human-formatted price
    #[serde(default)]
    pub price_amount_formatted: Option<String>,
    /// Currency contract address
    #[serde(default)]
    pub price_currency_address: String,
    /// Quantity still available
    #[serde(default)]
    pub quantity_remaining: Option<String>,
    /// Expiry
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A collectible as listed by the marketplace API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleOrder {
    /// Token metadata
    pub metadata: TokenMetadata,
    /// Lowest listing, if any
    #[serde(default, alias = "order")]
    pub listing: Option<Order>,
}

/// Response of a collectible listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCollectiblesResponse {
    /// Collectibles on this page, in marketplace order
    #[serde(default)]
    pub collectibles: Vec<CollectibleOrder>,
    /// Page metadata; absent when the feed is exhausted
    #[serde(default)]
    pub page: Option<PageInfo>,
}

impl ListCollectiblesResponse {
    /// Whether the marketplace reports another page
    pub fn has_more(&self) -> bool {
        self.page.is_some_and(|page| page.more)
    }
}

/// Collection-level filter settings from the marketplace configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSettings {
    /// Properties whose collectibles are hidden from listings
    #[serde(default)]
    pub exclusions: Vec<PropertyFilter>,
}

/// One collection configured in a marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceCollection {
    /// Chain of the collection
    pub chain_id: ChainId,
    /// Collection contract address
    pub items_address: String,
    /// Contract standard
    #[serde(default)]
    pub contract_type: ContractType,
    /// Listing filter rules
    #[serde(default)]
    pub filter_settings: Option<FilterSettings>,
}

/// Marketplace configuration as served by the builder API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceConfig {
    /// Builder project id
    #[serde(default)]
    pub project_id: u64,
    /// Configured collections
    #[serde(default)]
    pub collections: Vec<MarketplaceCollection>,
}

impl MarketplaceConfig {
    /// Find a configured collection; addresses compare case-insensitively
    pub fn collection(
        &self,
        chain_id: ChainId,
        items_address: &str,
    ) -> Option<&MarketplaceCollection> {
        self.collections.iter().find(|collection| {
            collection.chain_id == chain_id
                && collection.items_address.eq_ignore_ascii_case(items_address)
        })
    }
}

/// Normalized collectible record shared by indexer- and marketplace-sourced
/// entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleWithBalance {
    /// Token metadata
    pub metadata: TokenMetadata,
    /// Marketplace listing; always `None` for indexer-only tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing: Option<Order>,
    /// Contract info from the indexer
    #[serde(default)]
    pub contract_info: Option<ContractInfo>,
    /// Contract standard from the indexer
    #[serde(default)]
    pub contract_type: Option<ContractType>,
    /// Balance held by the account, when known from the indexer
    #[serde(default)]
    pub balance: Option<String>,
}

impl CollectibleWithBalance {
    /// Token id of this record
    pub fn token_id(&self) -> &str {
        &self.metadata.token_id
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn chain_id_as_string<S>(chain_id: &ChainId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&chain_id.to_string())
}
