//! Search endpoints.

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use buzzblog_common::AppResult;
use serde::Deserialize;

use crate::{
    endpoints::posts::{post_responses, PostResponse},
    middleware::AppState,
    response::ApiResponse,
};

const fn default_page() -> u64 {
    1
}

const fn default_limit() -> u64 {
    10
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// The keyword to match against titles and content.
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Keyword search over posts.
///
/// An empty or missing `q` yields an empty result set.
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let limit = query.limit.clamp(1, 100);
    let offset = (query.page.max(1) - 1) * limit;

    let posts = state
        .search_service
        .search_posts(&query.q, limit, offset)
        .await?;
    Ok(ApiResponse::ok(post_responses(&state, posts).await?))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}
