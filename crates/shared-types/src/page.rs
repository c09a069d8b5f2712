// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Page-number pagination shared by the indexer, the marketplace API and the
//! inventory stream

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// A 1-based page cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: u32,
    /// Items per page
    pub page_size: u32,
}

impl PageRequest {
    /// Create a page cursor, rejecting zero page numbers and sizes
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageError> {
        let request = Self { page, page_size };
        request.validate()?;
        Ok(request)
    }

    /// The first page with the given size
    pub const fn first(page_size: u32) -> Self {
        Self { page: 1, page_size }
    }

    /// Cursor for the following page, `None` past the last page number
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.page.checked_add(1).map(|page| Self { page, ..self })
    }

    /// Check the cursor invariants
    pub fn validate(&self) -> Result<(), PageError> {
        if self.page == 0 {
            return Err(PageError::ZeroPage);
        }
        if self.page_size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Page metadata returned alongside a page of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Page number this result belongs to
    #[serde(default)]
    pub page: u32,
    /// Items per page
    #[serde(default)]
    pub page_size: u32,
    /// Whether another page is available
    #[serde(default)]
    pub more: bool,
}

impl PageInfo {
    /// Page info echoing a request
    pub const fn for_request(request: PageRequest, more: bool) -> Self {
        Self {
            page: request.page,
            page_size: request.page_size,
            more,
        }
    }
}

/// Invalid page cursor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// Pages are 1-based
    #[error("page numbers start at 1")]
    ZeroPage,
    /// A page must hold at least one item
    #[error("page size must be greater than 0")]
    ZeroPageSize,
}
