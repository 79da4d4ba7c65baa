pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod shopping_cart;
pub mod subscription;
pub mod tag;
pub mod user;
pub mod viewer;

use serde::Deserialize;

use foodgram_domain::pagination::PageRequest;

/// `?page=&limit=` shared by paginated list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page_request(&self, default_limit: u32) -> PageRequest {
        PageRequest {
            limit: self.limit.unwrap_or(default_limit),
            page: self.page.unwrap_or(1),
        }
        .clamped()
    }
}

/// Boolean query flags arrive as `1`/`0` or `true`/`false`.
pub(crate) fn query_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true"))
}
