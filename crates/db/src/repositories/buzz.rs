//! Buzz repository.

use std::sync::Arc;

use crate::entities::{Buzz, buzz};
use buzzblog_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Buzz repository for database operations.
#[derive(Clone)]
pub struct BuzzRepository {
    db: Arc<DatabaseConnection>,
}

impl BuzzRepository {
    /// Create a new buzz repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a buzz by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<buzz::Model>> {
        Buzz::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a buzz by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<buzz::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BuzzNotFound(id.to_string()))
    }

    /// Get buzzes for a user (paginated, newest first).
    pub async fn find_by_user(
        &self,
        user_id: &str,
        limit: u64,
        offset: u64,
        unread_only: bool,
    ) -> AppResult<Vec<buzz::Model>> {
        let mut query = Buzz::find()
            .filter(buzz::Column::UserId.eq(user_id))
            .order_by_desc(buzz::Column::Id);

        if unread_only {
            query = query.filter(buzz::Column::IsRead.eq(false));
        }

        query
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark a buzz as read.
    ///
    /// Idempotent: marking an already-read buzz leaves it read.
    pub async fn mark_as_read(&self, model: buzz::Model) -> AppResult<buzz::Model> {
        if model.is_read {
            return Ok(model);
        }

        let mut active: buzz::ActiveModel = model.into();
        active.is_read = Set(true);
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark all of a user's unread buzzes as read, returning the count.
    pub async fn mark_all_as_read(&self, user_id: &str) -> AppResult<u64> {
        use sea_orm::UpdateResult;

        let result: UpdateResult = Buzz::update_many()
            .filter(buzz::Column::UserId.eq(user_id))
            .filter(buzz::Column::IsRead.eq(false))
            .col_expr(buzz::Column::IsRead, true.into())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Count unread buzzes for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        Buzz::find()
            .filter(buzz::Column::UserId.eq(user_id))
            .filter(buzz::Column::IsRead.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
