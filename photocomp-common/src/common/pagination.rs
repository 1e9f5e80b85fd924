use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 1000;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { limit, offset }
    }

    /// Exclusive end index of the requested window.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Page metadata returned alongside every listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandardPagination {
    pub offset: u64,
    pub returned: u64,
    pub limit: u64,
    pub total: u64,
}

impl StandardPagination {
    pub fn new(pagination: &Pagination, returned: usize, total: u64) -> Self {
        Self {
            offset: pagination.offset,
            returned: returned as u64,
            limit: pagination.limit,
            total,
        }
    }
}
