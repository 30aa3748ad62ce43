//! Post keyword search.
//!
//! A stateless substring filter over the post table: no ranking, no
//! stemming, no index beyond what the database provides.

use buzzblog_common::AppResult;
use buzzblog_db::{entities::post, repositories::PostRepository};

/// Search service for keyword queries over posts.
#[derive(Clone)]
pub struct SearchService {
    post_repo: PostRepository,
}

impl SearchService {
    /// Create a new search service.
    #[must_use]
    pub const fn new(post_repo: PostRepository) -> Self {
        Self { post_repo }
    }

    /// Find posts whose title or content contains `query`
    /// (case-insensitive).
    ///
    /// An empty query yields an empty result set, not all posts.
    pub async fn search_posts(
        &self,
        query: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<post::Model>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(vec![]);
        }

        self.post_repo.search(query, limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_post(id: &str, title: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            author_id: "u1".to_string(),
            title: title.to_string(),
            content: "content".to_string(),
            status: post::PostStatus::Published,
            published_at: Some(Utc::now().into()),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_empty_query_returns_nothing() {
        // No query results queued: touching the database would fail the mock
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = SearchService::new(PostRepository::new(db));
        let result = service.search_posts("   ", 10, 0).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_query_is_trimmed_before_matching() {
        let post = create_test_post("p1", "Testing in Rust");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );

        let service = SearchService::new(PostRepository::new(db));
        let result = service.search_posts("  test  ", 10, 0).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Testing in Rust");
    }
}
