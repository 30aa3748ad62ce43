//! API endpoints.

mod auth;
mod buzzes;
mod comments;
mod posts;
mod search;
mod tags;

use axum::Router;
use serde::Deserialize;

use crate::middleware::AppState;

/// Default page size for list endpoints.
const fn default_limit() -> u64 {
    10
}

const fn default_page() -> u64 {
    1
}

const MAX_LIMIT: u64 = 100;

/// Common pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PageQuery {
    /// Clamped page size.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Row offset for the requested page (pages are 1-based).
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1) * self.limit()
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/posts", posts::router())
        .nest("/tags", tags::router())
        .nest("/comments", comments::router())
        .nest("/buzzes", buzzes::router())
        .nest("/search", search::router())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_offsets() {
        let q = PageQuery { page: 1, limit: 10 };
        assert_eq!(q.offset(), 0);

        let q = PageQuery { page: 3, limit: 10 };
        assert_eq!(q.offset(), 20);

        // Page 0 is treated as page 1
        let q = PageQuery { page: 0, limit: 10 };
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_page_query_limit_clamped() {
        let q = PageQuery { page: 1, limit: 5000 };
        assert_eq!(q.limit(), MAX_LIMIT);

        let q = PageQuery { page: 1, limit: 0 };
        assert_eq!(q.limit(), 1);
    }
}
