//! Tag endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use buzzblog_common::AppResult;
use buzzblog_db::entities::tag;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::posts::{post_responses, PostResponse},
    endpoints::PageQuery,
    extractors::AuthUser,
    middleware::AppState,
    response::ApiResponse,
};

/// Tag response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: String,
    pub name: String,
}

impl From<tag::Model> for TagResponse {
    fn from(tag: tag::Model) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// List tags alphabetically.
async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<ApiResponse<Vec<TagResponse>>> {
    let tags = state.tag_service.list(page.limit(), page.offset()).await?;
    Ok(ApiResponse::ok(tags.into_iter().map(Into::into).collect()))
}

/// Create tag request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    pub name: String,
}

/// Create a tag (idempotent on an existing name).
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateTagRequest>,
) -> AppResult<ApiResponse<TagResponse>> {
    let tag = state.tag_service.create(&req.name).await?;
    Ok(ApiResponse::ok(tag.into()))
}

/// Get a single tag.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TagResponse>> {
    let tag = state.tag_service.get(&id).await?;
    Ok(ApiResponse::ok(tag.into()))
}

/// List published posts carrying a tag (the tag detail view).
async fn posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state
        .post_service
        .list_by_tag(&id, page.limit(), page.offset())
        .await?;
    Ok(ApiResponse::ok(post_responses(&state, posts).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one))
        .route("/{id}/posts", get(posts))
}
