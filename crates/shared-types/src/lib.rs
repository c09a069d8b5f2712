// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the NFT inventory workspace
//!
//! This crate provides the chain identifier and pagination cursor types used
//! by the client traits, the HTTP adapters and the inventory engine, avoiding
//! circular dependencies between them.

pub mod chains;
pub mod page;

pub use chains::{ChainId, ChainIdParseError};
pub use page::{DEFAULT_PAGE_SIZE, PageError, PageInfo, PageRequest};
