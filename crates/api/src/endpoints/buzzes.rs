//! Buzz (notification) endpoints.
//!
//! Buzzes have no create or delete routes: they exist only as a side
//! effect of comment creation and are restricted to their recipient.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Router,
};
use buzzblog_common::AppResult;
use buzzblog_db::entities::buzz;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Buzz response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuzzResponse {
    pub id: String,
    pub user_id: String,
    pub trigger_id: String,
    pub post_id: String,
    pub comment_id: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<buzz::Model> for BuzzResponse {
    fn from(buzz: buzz::Model) -> Self {
        Self {
            id: buzz.id,
            user_id: buzz.user_id,
            trigger_id: buzz.trigger_id,
            post_id: buzz.post_id,
            comment_id: buzz.comment_id,
            is_read: buzz.is_read,
            created_at: buzz.created_at.to_rfc3339(),
        }
    }
}

const fn default_page() -> u64 {
    1
}

const fn default_limit() -> u64 {
    10
}

/// List buzzes query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBuzzesQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Only unread buzzes.
    #[serde(default)]
    pub unread_only: bool,
}

/// List the caller's buzzes (newest first).
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListBuzzesQuery>,
) -> AppResult<ApiResponse<Vec<BuzzResponse>>> {
    let limit = query.limit.clamp(1, 100);
    let offset = (query.page.max(1) - 1) * limit;

    let buzzes = state
        .buzz_service
        .list(&user.id, limit, offset, query.unread_only)
        .await?;
    Ok(ApiResponse::ok(
        buzzes.into_iter().map(Into::into).collect(),
    ))
}

/// Get a buzz as its recipient; marks it read on first access.
async fn get_one(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BuzzResponse>> {
    let buzz = state.buzz_service.get_for_recipient(&user.id, &id).await?;
    Ok(ApiResponse::ok(buzz.into()))
}

/// Mark a buzz as read without viewing it (idempotent).
async fn mark_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BuzzResponse>> {
    let buzz = state.buzz_service.mark_read(&user.id, &id).await?;
    Ok(ApiResponse::ok(buzz.into()))
}

/// Mark all as read response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub count: u64,
}

/// Mark all of the caller's buzzes as read.
async fn mark_all_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<MarkAllReadResponse>> {
    let count = state.buzz_service.mark_all_read(&user.id).await?;
    Ok(ApiResponse::ok(MarkAllReadResponse { count }))
}

/// Unread count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// Get the caller's unread buzz count.
async fn unread_count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UnreadCountResponse>> {
    let count = state.buzz_service.unread_count(&user.id).await?;
    Ok(ApiResponse::ok(UnreadCountResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/unread-count", get(unread_count))
        .route("/mark-all-read", post(mark_all_read))
        .route("/{id}", get(get_one))
        .route("/{id}/mark-read", post(mark_read))
}
