//! Comment endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use buzzblog_common::AppResult;
use buzzblog_core::{CreateCommentInput, UpdateCommentInput};
use buzzblog_db::entities::comment;
use serde::Serialize;

use crate::{
    endpoints::PageQuery, extractors::AuthUser, middleware::AppState, response::ApiResponse,
};

/// Comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Derived: true iff the comment has a parent.
    pub is_reply: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<comment::Model> for CommentResponse {
    fn from(comment: comment::Model) -> Self {
        let is_reply = comment.is_reply();
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            content: comment.content,
            parent_id: comment.parent_id,
            is_reply,
            created_at: comment.created_at.to_rfc3339(),
            updated_at: comment.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Create a comment or reply.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.create(&user.id, input).await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Get a single comment.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.get(&id).await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Update a comment (author only).
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.update(&user.id, &id, input).await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Delete a comment and its reply subtree (author only).
async fn delete_one(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.comment_service.delete(&user.id, &id).await?;
    Ok(ApiResponse::ok(()))
}

/// List direct replies to a comment (oldest first).
async fn replies(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let replies = state
        .comment_service
        .list_replies(&id, page.limit(), page.offset())
        .await?;
    Ok(ApiResponse::ok(
        replies.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", get(get_one).put(update).delete(delete_one))
        .route("/{id}/replies", get(replies))
}
