//! Offset pagination for list endpoints.
//!
//! `skip`/`limit` mirror the query parameters; the total count is always
//! computed separately from the page window.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 100;
/// Upper bound applied to `limit` so one request cannot pull the whole table.
pub const MAX_LIMIT: u64 = 1000;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// rows to skip from the start
    #[serde(default)]
    pub skip: u64,
    /// maximum rows to return
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 { DEFAULT_LIMIT }

impl Pagination {
    pub fn new(skip: u64, limit: u64) -> Self { Self { skip, limit } }

    /// Clamp `limit` to `MAX_LIMIT`; `limit = 0` stays an empty page.
    pub fn normalize(self) -> (u64, u64) {
        (self.skip, self.limit.min(MAX_LIMIT))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { skip: 0, limit: DEFAULT_LIMIT } }
}

/// One page of results plus the total independent of the window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub count: u64,
}
