//! Comment repository.

use std::sync::Arc;

use crate::entities::{Comment, buzz, comment};
use buzzblog_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a comment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<comment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::CommentNotFound(id.to_string()))
    }

    /// Insert a comment together with its buzz, if one is owed.
    ///
    /// Both rows are written in a single transaction so the notification
    /// cannot outlive a failed comment insert or vice versa.
    pub async fn create_with_buzz(
        &self,
        comment: comment::ActiveModel,
        buzz: Option<buzz::ActiveModel>,
    ) -> AppResult<comment::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let comment = comment
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Some(buzz) = buzz {
            buzz.insert(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(comment)
    }

    /// Update a comment.
    pub async fn update(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a comment.
    ///
    /// The reply subtree and referencing buzzes are removed by FK cascades.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Comment::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get top-level comments for a post (paginated, newest first).
    ///
    /// Replies are reached through [`find_replies`](Self::find_replies).
    pub async fn find_top_level_by_post(
        &self,
        post_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::ParentId.is_null())
            .order_by_desc(comment::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get direct replies to a comment (paginated, oldest first).
    pub async fn find_replies(
        &self,
        parent_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::ParentId.eq(parent_id))
            .order_by_asc(comment::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_comment(id: &str, post_id: &str, parent_id: Option<&str>) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            post_id: post_id.to_string(),
            author_id: "u1".to_string(),
            content: "hello".to_string(),
            parent_id: parent_id.map(ToString::to_string),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_top_level_by_post() {
        let c1 = create_test_comment("c2", "p1", None);
        let c2 = create_test_comment("c1", "p1", None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_top_level_by_post("p1", 10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| !c.is_reply()));
    }

    #[tokio::test]
    async fn test_create_with_buzz_inserts_both() {
        let comment = create_test_comment("c1", "p1", None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[comment.clone()]])
                .append_query_results([[buzz_model("b1", "c1")]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let buzz = buzz::ActiveModel {
            id: sea_orm::Set("b1".to_string()),
            user_id: sea_orm::Set("author".to_string()),
            trigger_id: sea_orm::Set("u1".to_string()),
            post_id: sea_orm::Set("p1".to_string()),
            comment_id: sea_orm::Set("c1".to_string()),
            is_read: sea_orm::Set(false),
            created_at: sea_orm::Set(Utc::now().into()),
        };
        let model = comment::ActiveModel {
            id: sea_orm::Set("c1".to_string()),
            post_id: sea_orm::Set("p1".to_string()),
            author_id: sea_orm::Set("u1".to_string()),
            content: sea_orm::Set("hello".to_string()),
            parent_id: sea_orm::Set(None),
            created_at: sea_orm::Set(Utc::now().into()),
            updated_at: sea_orm::Set(None),
        };

        let created = repo.create_with_buzz(model, Some(buzz)).await.unwrap();
        assert_eq!(created.id, "c1");
    }

    fn buzz_model(id: &str, comment_id: &str) -> buzz::Model {
        buzz::Model {
            id: id.to_string(),
            user_id: "author".to_string(),
            trigger_id: "u1".to_string(),
            post_id: "p1".to_string(),
            comment_id: comment_id.to_string(),
            is_read: false,
            created_at: Utc::now().into(),
        }
    }
}
