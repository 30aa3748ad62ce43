//! Tag repository.

use std::sync::Arc;

use crate::entities::{PostTag, Tag, post_tag, tag};
use buzzblog_common::{AppError, AppResult, IdGenerator};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// Tag repository for database operations.
#[derive(Clone)]
pub struct TagRepository {
    db: Arc<DatabaseConnection>,
    id_gen: IdGenerator,
}

impl TagRepository {
    /// Create a new tag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            id_gen: IdGenerator::new(),
        }
    }

    /// Find a tag by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<tag::Model>> {
        Tag::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a tag by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<tag::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("tag {id}")))
    }

    /// Find a tag by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<tag::Model>> {
        let name_lower = name.to_lowercase();
        Tag::find()
            .filter(tag::Column::Name.eq(&name_lower))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get or create a tag.
    pub async fn get_or_create(&self, name: &str) -> AppResult<tag::Model> {
        let name_lower = name.to_lowercase();

        // Try to find existing
        if let Some(tag) = self.find_by_name(&name_lower).await? {
            return Ok(tag);
        }

        // Create new
        let model = tag::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(name_lower),
            created_at: Set(Utc::now().into()),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List tags alphabetically (paginated).
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<tag::Model>> {
        Tag::find()
            .order_by_asc(tag::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the tags attached to a post.
    pub async fn find_for_post(&self, post_id: &str) -> AppResult<Vec<tag::Model>> {
        let links = PostTag::find()
            .filter(post_tag::Column::PostId.eq(post_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let tag_ids: Vec<String> = links.into_iter().map(|l| l.tag_id).collect();
        if tag_ids.is_empty() {
            return Ok(vec![]);
        }

        Tag::find()
            .filter(tag::Column::Id.is_in(tag_ids))
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_tag(id: &str, name: &str) -> tag::Model {
        tag::Model {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let tag = create_test_tag("t1", "rust");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[tag.clone()]])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let result = repo.find_by_name("Rust").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().name, "rust");
    }

    #[tokio::test]
    async fn test_get_or_create_existing() {
        let tag = create_test_tag("t1", "rust");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[tag.clone()]])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let result = repo.get_or_create("rust").await.unwrap();

        assert_eq!(result.id, "t1");
    }

    #[tokio::test]
    async fn test_find_for_post_empty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post_tag::Model>::new()])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let result = repo.find_for_post("p1").await.unwrap();

        assert!(result.is_empty());
    }
}
