pub mod admin_orders;
pub mod conversations;
pub mod designs;
pub mod messages;
pub mod notifications;
pub mod orders;
pub mod tokens;
pub mod users;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(50).min(100)
    }
}
