//! Post endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use buzzblog_common::AppResult;
use buzzblog_core::{CreatePostInput, UpdatePostInput};
use buzzblog_db::entities::post::{self, PostStatus};

use serde::Serialize;

use crate::{
    endpoints::{comments::CommentResponse, PageQuery},
    extractors::AuthUser,
    middleware::AppState,
    response::ApiResponse,
};

/// Post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

const fn status_str(status: &PostStatus) -> &'static str {
    match status {
        PostStatus::Draft => "draft",
        PostStatus::Published => "published",
    }
}

impl PostResponse {
    fn new(post: post::Model, tags: Vec<String>) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            status: status_str(&post.status).to_string(),
            tags,
            published_at: post.published_at.map(|dt| dt.to_rfc3339()),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Build a response for one post, tag names included.
pub(crate) async fn post_response(
    state: &AppState,
    post: post::Model,
) -> AppResult<PostResponse> {
    let tags = state
        .post_service
        .tags(&post.id)
        .await?
        .into_iter()
        .map(|t| t.name)
        .collect();
    Ok(PostResponse::new(post, tags))
}

/// Build responses for a page of posts.
pub(crate) async fn post_responses(
    state: &AppState,
    posts: Vec<post::Model>,
) -> AppResult<Vec<PostResponse>> {
    let mut responses = Vec::with_capacity(posts.len());
    for post in posts {
        responses.push(post_response(state, post).await?);
    }
    Ok(responses)
}

/// List published posts (newest first).
async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state
        .post_service
        .list_published(page.limit(), page.offset())
        .await?;
    Ok(ApiResponse::ok(post_responses(&state, posts).await?))
}

/// List the caller's own posts, drafts included.
async fn mine(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state
        .post_service
        .list_by_author(&user.id, page.limit(), page.offset())
        .await?;
    Ok(ApiResponse::ok(post_responses(&state, posts).await?))
}

/// Create a new post.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePostInput>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.create(&user.id, input).await?;
    Ok(ApiResponse::ok(post_response(&state, post).await?))
}

/// Get a single post.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.get(&id).await?;
    Ok(ApiResponse::ok(post_response(&state, post).await?))
}

/// Update a post (author only).
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePostInput>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.update(&user.id, &id, input).await?;
    Ok(ApiResponse::ok(post_response(&state, post).await?))
}

/// Delete a post (author only).
async fn delete_one(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.post_service.delete(&user.id, &id).await?;
    Ok(ApiResponse::ok(()))
}

/// Publish a draft post (author only, idempotent).
async fn publish(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.publish(&user.id, &id).await?;
    Ok(ApiResponse::ok(post_response(&state, post).await?))
}

/// List top-level comments on a post (newest first).
async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let comments = state
        .comment_service
        .list_top_level(&id, page.limit(), page.offset())
        .await?;
    Ok(ApiResponse::ok(
        comments.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/mine", get(mine))
        .route("/{id}", get(get_one).put(update).delete(delete_one))
        .route("/{id}/publish", axum::routing::post(publish))
        .route("/{id}/comments", get(list_comments))
}
