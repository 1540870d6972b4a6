//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let d = Self::default();
        Self { page: page.unwrap_or(d.page), limit: limit.unwrap_or(d.limit) }
    }

    /// Clamp to sane defaults and convert to `u64` (zero-based page index, page size)
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let limit = self.limit.clamp(1, 100);
        ((page - 1) as u64, limit as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, limit: 10 } }
}

/// Pagination block returned next to a page of rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(opts: Pagination, total: u64) -> Self {
        let (idx, limit) = opts.normalize();
        Self { page: idx + 1, limit, total, total_pages: total.div_ceil(limit) }
    }
}
