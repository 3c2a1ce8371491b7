use serde::Deserialize;

use crate::utils::constant::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Query parameters accepted by `GET /api/status`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Normalized offset/limit pair handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl From<ListQuery> for Page {
    fn from(query: ListQuery) -> Self {
        Self {
            skip: query.skip.unwrap_or(0).max(0),
            limit: query
                .limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        ListQuery::default().into()
    }
}
