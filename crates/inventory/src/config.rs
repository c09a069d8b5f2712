// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Inventory configuration
//!
//! Settings for the upstream HTTP clients and the reconciliation fetcher,
//! loaded with the `config` crate from optional JSON files and environment
//! variables.

use std::{path::Path, sync::Arc};

use config::{Config, Environment, File};
use external_apis::{
    IndexerConfig, LaosClient, LaosConfig, MarketplaceApiClient, MarketplaceApiConfig,
    SequenceIndexerClient,
};
use serde::{Deserialize, Serialize};
use shared_types::DEFAULT_PAGE_SIZE;
use tracing::debug;

use crate::{
    error::ConfigError,
    fetcher::{FetcherSettings, InventoryFetcher},
    listing::ListingFallback,
    state::InventoryStore,
};

/// Prefix of environment variable overrides, e.g. `INVENTORY__INDEXER__ACCESS_KEY`
pub const ENV_PREFIX: &str = "INVENTORY";

/// Largest accepted indexer sweep page size
pub const MAX_SWEEP_PAGE_SIZE: u32 = 1000;

/// Largest accepted upstream timeout
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Fetcher wired to the HTTP clients
pub type HttpInventoryFetcher =
    InventoryFetcher<SequenceIndexerClient, LaosClient, MarketplaceApiClient>;

/// Complete inventory configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Standard indexer
    pub indexer: IndexerConfig,
    /// LAOS alternate indexer
    pub laos: LaosConfig,
    /// Marketplace and builder APIs
    pub marketplace: MarketplaceApiConfig,
    /// Page size of the indexer sweep (1-1000)
    pub sweep_page_size: u32,
    /// Serialize concurrent first-time sweeps of the same key
    pub dedupe_sweeps: bool,
    /// Behaviour when the alternate listing endpoint fails
    pub listing_fallback: ListingFallback,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            indexer: IndexerConfig::default(),
            laos: LaosConfig::default(),
            marketplace: MarketplaceApiConfig::default(),
            sweep_page_size: DEFAULT_PAGE_SIZE,
            dedupe_sweeps: false,
            listing_fallback: ListingFallback::default(),
        }
    }
}

impl InventoryConfig {
    /// Load configuration from the default sources
    ///
    /// Sources, later overriding earlier:
    /// 1. Default values
    /// 2. `inventory.json`, if present
    /// 3. `inventory.{ENVIRONMENT}.json`, if present (`development` by default)
    /// 4. Environment variables prefixed with `INVENTORY__`, `__` separating
    ///    nested keys
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default files
    ///
    /// An explicit file must exist. Environment variables still override it.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder();
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => {
                let environment = std::env::var("ENVIRONMENT")
                    .unwrap_or_else(|_| "development".to_string())
                    .to_lowercase();
                builder
                    .add_source(File::with_name("inventory.json").required(false))
                    .add_source(
                        File::with_name(&format!("inventory.{environment}.json")).required(false),
                    )
            }
        };

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        debug!(
            sweep_page_size = config.sweep_page_size,
            dedupe_sweeps = config.dedupe_sweeps,
            listing_fallback = %config.listing_fallback,
            "loaded inventory configuration"
        );
        Ok(config)
    }

    /// Check value ranges
    ///
    /// Credentials are checked when the clients are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SWEEP_PAGE_SIZE).contains(&self.sweep_page_size) {
            return Err(ConfigError::invalid(format!(
                "sweep_page_size must be between 1 and {MAX_SWEEP_PAGE_SIZE}, got {}",
                self.sweep_page_size
            )));
        }
        check_timeout("indexer", self.indexer.timeout_seconds)?;
        check_timeout("laos", self.laos.timeout_seconds)?;
        check_timeout("marketplace", self.marketplace.timeout_seconds)?;
        Ok(())
    }

    /// Fetcher tunables from this configuration
    pub fn fetcher_settings(&self) -> FetcherSettings {
        FetcherSettings {
            sweep_page_size: self.sweep_page_size,
            dedupe_sweeps: self.dedupe_sweeps,
            listing_fallback: self.listing_fallback,
        }
    }

    /// Build the HTTP clients and a fetcher sharing `store`
    pub fn build_fetcher(
        &self,
        store: Arc<InventoryStore>,
    ) -> Result<HttpInventoryFetcher, ConfigError> {
        self.validate()?;
        let indexer = SequenceIndexerClient::new(self.indexer.clone())
            .map_err(|source| ConfigError::Client {
                service: "indexer",
                source,
            })?;
        let laos = LaosClient::new(self.laos.clone()).map_err(|source| ConfigError::Client {
            service: "laos",
            source,
        })?;
        let marketplace = MarketplaceApiClient::new(self.marketplace.clone()).map_err(|source| {
            ConfigError::Client {
                service: "marketplace",
                source,
            }
        })?;

        Ok(InventoryFetcher::new(indexer, laos, marketplace, store)
            .with_settings(self.fetcher_settings()))
    }
}

fn check_timeout(service: &str, seconds: u64) -> Result<(), ConfigError> {
    if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
        return Err(ConfigError::invalid(format!(
            "{service}.timeout_seconds must be between 1 and {MAX_TIMEOUT_SECONDS}, got {seconds}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(contents: &serde_json::Value) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    fn complete() -> InventoryConfig {
        let mut config = InventoryConfig::default();
        config.indexer.access_key = "indexer-key".to_string();
        config.marketplace.project_access_key = "market-key".to_string();
        config.marketplace.project_id = 7;
        config
    }

    #[test]
    fn defaults_are_valid() {
        let config = InventoryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sweep_page_size, 50);
        assert!(!config.dedupe_sweeps);
        assert_eq!(config.listing_fallback, ListingFallback::Marketplace);
    }

    #[test]
    fn sweep_page_size_bounds() {
        let mut config = InventoryConfig {
            sweep_page_size: 0,
            ..InventoryConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        config.sweep_page_size = MAX_SWEEP_PAGE_SIZE + 1;
        assert!(config.validate().is_err());

        config.sweep_page_size = MAX_SWEEP_PAGE_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn timeout_bounds() {
        let mut config = InventoryConfig::default();
        config.laos.timeout_seconds = 0;
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("laos.timeout_seconds"));

        config.laos.timeout_seconds = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let file = config_file(&json!({
            "indexer": { "access_key": "abc", "url": "http://localhost:9000" },
            "marketplace": { "project_id": 12, "timeout_seconds": 10 },
            "sweep_page_size": 200,
            "dedupe_sweeps": true,
            "listing_fallback": "propagate"
        }));

        let config = InventoryConfig::load_from(Some(file.path())).unwrap();

        assert_eq!(config.indexer.access_key, "abc");
        assert_eq!(config.indexer.url, "http://localhost:9000");
        assert_eq!(config.indexer.timeout_seconds, 30);
        assert_eq!(config.marketplace.project_id, 12);
        assert_eq!(config.marketplace.timeout_seconds, 10);
        assert_eq!(config.laos, LaosConfig::default());
        assert_eq!(config.sweep_page_size, 200);
        assert!(config.dedupe_sweeps);
        assert_eq!(config.listing_fallback, ListingFallback::Propagate);
    }

    #[test]
    fn load_from_rejects_out_of_range_values() {
        let file = config_file(&json!({ "sweep_page_size": 5000 }));
        let error = InventoryConfig::load_from(Some(file.path())).unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { .. }));
    }

    #[test]
    fn load_from_missing_file_fails() {
        let error = InventoryConfig::load_from(Some(Path::new("/nonexistent/inventory.json")))
            .unwrap_err();
        assert!(matches!(error, ConfigError::Load(_)));
    }

    #[test]
    fn fetcher_settings_follow_config() {
        let config = InventoryConfig {
            sweep_page_size: 10,
            dedupe_sweeps: true,
            listing_fallback: ListingFallback::Propagate,
            ..InventoryConfig::default()
        };
        assert_eq!(
            config.fetcher_settings(),
            FetcherSettings {
                sweep_page_size: 10,
                dedupe_sweeps: true,
                listing_fallback: ListingFallback::Propagate,
            }
        );
    }

    #[test]
    fn build_fetcher_requires_credentials() {
        let store = Arc::new(InventoryStore::new());
        let error = InventoryConfig::default()
            .build_fetcher(Arc::clone(&store))
            .unwrap_err();
        assert!(matches!(
            error,
            ConfigError::Client {
                service: "indexer",
                ..
            }
        ));

        let fetcher = complete().build_fetcher(store).unwrap();
        assert_eq!(fetcher.settings(), FetcherSettings::default());
    }
}
