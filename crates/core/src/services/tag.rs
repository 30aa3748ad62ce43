//! Tag service.

use buzzblog_common::{AppError, AppResult};
use buzzblog_db::{entities::tag, repositories::TagRepository};

/// Tag service for business logic.
#[derive(Clone)]
pub struct TagService {
    tag_repo: TagRepository,
}

impl TagService {
    /// Create a new tag service.
    #[must_use]
    pub const fn new(tag_repo: TagRepository) -> Self {
        Self { tag_repo }
    }

    /// Get or create a tag by name.
    ///
    /// Names are trimmed and stored lowercase; uniqueness makes this
    /// idempotent.
    pub async fn create(&self, name: &str) -> AppResult<tag::Model> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Tag name cannot be empty".to_string()));
        }

        self.tag_repo.get_or_create(name).await
    }

    /// Get a tag by ID.
    pub async fn get(&self, id: &str) -> AppResult<tag::Model> {
        self.tag_repo.get_by_id(id).await
    }

    /// List tags alphabetically.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<tag::Model>> {
        self.tag_repo.find_all(limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_tag(id: &str, name: &str) -> tag::Model {
        tag::Model {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = TagService::new(TagRepository::new(db));
        let result = service.create("   ").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_reuses_existing_tag() {
        let tag = create_test_tag("t1", "rust");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[tag]])
                .into_connection(),
        );

        let service = TagService::new(TagRepository::new(db));
        let result = service.create("  Rust ").await.unwrap();

        assert_eq!(result.id, "t1");
        assert_eq!(result.name, "rust");
    }

    #[tokio::test]
    async fn test_get_missing_tag() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<tag::Model>::new()])
                .into_connection(),
        );

        let service = TagService::new(TagRepository::new(db));
        let result = service.get("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
