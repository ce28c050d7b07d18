//! Shared query parameter types for API handlers.

use serde::Deserialize;
use workshop_db::Page;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped when converted into a [`Page`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<PaginationParams> for Page {
    fn from(params: PaginationParams) -> Self {
        Page::new(params.limit, params.offset)
    }
}
