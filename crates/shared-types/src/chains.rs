// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain chain identifiers
//!
//! Marketplace collections can live on any EVM chain the indexer covers, so
//! [`ChainId`] is an open numeric identifier. Well-known chains carry a
//! network name, which the indexer uses to build per-chain endpoints.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric EVM chain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(u64);

/// Well-known chains: (id, indexer network name, display name)
const KNOWN_CHAINS: &[(u64, &str, &str)] = &[
    (1, "mainnet", "Ethereum"),
    (10, "optimism", "Optimism"),
    (56, "bsc", "BNB Smart Chain"),
    (137, "polygon", "Polygon"),
    (8453, "base", "Base"),
    (42161, "arbitrum", "Arbitrum"),
    (42170, "arbitrum-nova", "Arbitrum Nova"),
    (43114, "avalanche", "Avalanche"),
    (6283, "laos", "LAOS"),
    (62850, "laos-sigma-testnet", "LAOS Sigma Testnet"),
    (80002, "amoy", "Polygon Amoy"),
    (11_155_111, "sepolia", "Sepolia"),
];

impl ChainId {
    /// Ethereum mainnet
    pub const ETHEREUM: Self = Self(1);
    /// Polygon PoS
    pub const POLYGON: Self = Self(137);
    /// Base
    pub const BASE: Self = Self(8453);
    /// Arbitrum One
    pub const ARBITRUM: Self = Self(42161);
    /// LAOS mainnet
    pub const LAOS: Self = Self(6283);

    /// Wrap a raw chain id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric chain ID
    pub const fn id(self) -> u64 {
        self.0
    }

    fn lookup(self) -> Option<&'static (u64, &'static str, &'static str)> {
        KNOWN_CHAINS.iter().find(|(id, _, _)| *id == self.0)
    }

    /// Network name used by indexer endpoints, if the chain is known
    pub fn network_name(self) -> Option<&'static str> {
        self.lookup().map(|(_, network, _)| *network)
    }

    /// Human-readable chain name, if the chain is known
    pub fn display_name(self) -> Option<&'static str> {
        self.lookup().map(|(_, _, name)| *name)
    }

    /// Whether the chain is in the built-in table
    pub fn is_known(self) -> bool {
        self.lookup().is_some()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u64>() {
            return Ok(Self(id));
        }

        KNOWN_CHAINS
            .iter()
            .find(|(_, network, name)| {
                network.eq_ignore_ascii_case(s) || name.eq_ignore_ascii_case(s)
            })
            .map(|(id, _, _)| Self(*id))
            .ok_or_else(|| ChainIdParseError::UnknownName(s.to_string()))
    }
}

impl Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ChainIdVisitor;

        impl serde::de::Visitor<'_> for ChainIdVisitor {
            type Value = ChainId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a numeric chain id, a numeric string (\"137\") or a known network name"
                )
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ChainId(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(value).map(ChainId).map_err(|_| {
                    E::invalid_value(serde::de::Unexpected::Signed(value), &"a positive chain id")
                })
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ChainId::from_str(value).map_err(|_| {
                    E::invalid_value(serde::de::Unexpected::Str(value), &"a known chain")
                })
            }
        }

        deserializer.deserialize_any(ChainIdVisitor)
    }
}

/// Error type for chain ID parsing
#[derive(Debug, thiserror::Error)]
pub enum ChainIdParseError {
    /// Neither a number nor a known network name
    #[error("unknown chain name: {0}")]
    UnknownName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_and_names() {
        assert_eq!("137".parse::<ChainId>().unwrap(), ChainId::POLYGON);
        assert_eq!("polygon".parse::<ChainId>().unwrap(), ChainId::POLYGON);
        assert_eq!("Ethereum".parse::<ChainId>().unwrap(), ChainId::ETHEREUM);
        assert_eq!("mainnet".parse::<ChainId>().unwrap(), ChainId::ETHEREUM);
        assert_eq!("999999".parse::<ChainId>().unwrap().id(), 999_999);
        assert!("not-a-chain".parse::<ChainId>().is_err());
    }

    #[test]
    fn unknown_chain_has_no_network() {
        let chain = ChainId::new(424_242);
        assert!(!chain.is_known());
        assert!(chain.network_name().is_none());
        assert_eq!(ChainId::LAOS.network_name(), Some("laos"));
    }

    #[test]
    fn serde_accepts_numbers_and_strings() {
        let from_number: ChainId = serde_json::from_str("8453").unwrap();
        let from_string: ChainId = serde_json::from_str("\"8453\"").unwrap();
        assert_eq!(from_number, ChainId::BASE);
        assert_eq!(from_string, ChainId::BASE);
        assert_eq!(serde_json::to_string(&ChainId::BASE).unwrap(), "8453");
    }

    #[test]
    fn display_is_numeric() {
        assert_eq!(ChainId::ARBITRUM.to_string(), "42161");
    }
}
