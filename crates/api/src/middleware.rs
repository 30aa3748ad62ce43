//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use buzzblog_core::{
    BuzzService, CommentService, PostService, SearchService, TagService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub post_service: PostService,
    pub tag_service: TagService,
    pub comment_service: CommentService,
    pub buzz_service: BuzzService,
    pub search_service: SearchService,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token into the current user and stashes it in the
/// request extensions for [`crate::extractors::AuthUser`]. Requests
/// without a valid token pass through anonymously; handlers that need an
/// identity reject them.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // Authenticate user by token
        if let Ok(user) = state.user_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
