// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFT inventory CLI
//!
//! Streams an account's inventory in one collection as JSON lines, one line
//! per page.

use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::Parser;
use inventory::{InventoryArgs, InventoryConfig, InventoryStore};
use shared_types::{ChainId, DEFAULT_PAGE_SIZE, PageRequest};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nft-inventory", version, about)]
struct Args {
    /// Chain id or network name, e.g. `137` or `polygon`
    #[arg(long)]
    chain: ChainId,

    /// Collection contract address
    #[arg(long)]
    collection: Address,

    /// Holder address
    #[arg(long)]
    account: Address,

    /// Collection is LAOS-bridged
    #[arg(long, default_value_t = false)]
    laos: bool,

    /// Collectibles per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Stop after this many pages
    #[arg(long, default_value_t = 100)]
    max_pages: u32,

    /// Configuration file, replacing `inventory.json` lookup
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn inventory_args(&self) -> InventoryArgs {
        InventoryArgs {
            account_address: self.account,
            collection_address: self.collection,
            chain_id: self.chain,
            is_laos721: self.laos,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = InventoryConfig::load_from(args.config.as_deref())
        .context("failed to load inventory configuration")?;
    let fetcher = config.build_fetcher(Arc::new(InventoryStore::new()))?;
    let inventory_args = args.inventory_args();

    info!(
        key = %inventory_args.key(),
        laos = inventory_args.is_laos721,
        page_size = args.page_size,
        "streaming inventory"
    );

    let mut stdout = io::stdout().lock();
    let mut request = PageRequest::new(1, args.page_size)?;
    let mut pages = 0;
    let mut total = 0;
    let mut complete = false;

    while request.page <= args.max_pages {
        let page = fetcher.fetch_inventory(&inventory_args, request).await?;
        pages += 1;
        total += page.collectibles.len();
        serde_json::to_writer(&mut stdout, &page)?;
        writeln!(stdout)?;

        if !page.page.more {
            complete = true;
            break;
        }
        let Some(next) = request.next() else {
            break;
        };
        request = next;
    }

    if !complete {
        warn!(
            max_pages = args.max_pages,
            "stopped at page limit before the end of the inventory"
        );
    }
    info!(pages, collectibles = total, complete, "inventory streamed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_network_names_and_defaults() {
        let args = Args::try_parse_from([
            "nft-inventory",
            "--chain",
            "polygon",
            "--collection",
            "0x0202020202020202020202020202020202020202",
            "--account",
            "0x0101010101010101010101010101010101010101",
        ])
        .unwrap();

        assert_eq!(args.chain, ChainId::POLYGON);
        assert_eq!(args.page_size, DEFAULT_PAGE_SIZE);
        assert!(!args.inventory_args().is_laos721);
        assert!(args.config.is_none());
    }

    #[test]
    fn laos_flag_sets_alternate_source() {
        let args = Args::try_parse_from([
            "nft-inventory",
            "--chain",
            "6283",
            "--collection",
            "0x0202020202020202020202020202020202020202",
            "--account",
            "0x0101010101010101010101010101010101010101",
            "--laos",
            "--page-size",
            "10",
        ])
        .unwrap();

        let inventory_args = args.inventory_args();
        assert!(inventory_args.is_laos721);
        assert_eq!(inventory_args.chain_id, ChainId::LAOS);
        assert_eq!(args.page_size, 10);
    }

    #[test]
    fn rejects_malformed_address() {
        let result = Args::try_parse_from([
            "nft-inventory",
            "--chain",
            "1",
            "--collection",
            "not-an-address",
            "--account",
            "0x0101010101010101010101010101010101010101",
        ]);
        assert!(result.is_err());
    }
}
