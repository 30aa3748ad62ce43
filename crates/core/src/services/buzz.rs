//! Buzz (notification) service.
//!
//! Buzzes are never created or deleted through this service by a user:
//! they come into existence as a side effect of comment creation
//! ([`buzz_for_comment`]) and are mutated only by the read-marking
//! operations below.

use buzzblog_common::{AppError, AppResult, IdGenerator};
use buzzblog_db::{
    entities::{buzz, post},
    repositories::BuzzRepository,
};
use chrono::Utc;
use sea_orm::Set;

/// Build the buzz owed for a freshly created comment, if any.
///
/// Self-comments are silent: commenting on your own post produces no
/// buzz. Everything else produces exactly one, addressed to the post's
/// author. Called synchronously from comment creation so both rows land
/// in the same transaction.
#[must_use]
pub fn buzz_for_comment(
    post: &post::Model,
    commenter_id: &str,
    comment_id: &str,
    id_gen: &IdGenerator,
) -> Option<buzz::ActiveModel> {
    if post.author_id == commenter_id {
        return None;
    }

    Some(buzz::ActiveModel {
        id: Set(id_gen.generate()),
        user_id: Set(post.author_id.clone()),
        trigger_id: Set(commenter_id.to_string()),
        post_id: Set(post.id.clone()),
        comment_id: Set(comment_id.to_string()),
        is_read: Set(false),
        created_at: Set(Utc::now().into()),
    })
}

/// Buzz service for business logic.
#[derive(Clone)]
pub struct BuzzService {
    buzz_repo: BuzzRepository,
}

impl BuzzService {
    /// Create a new buzz service.
    #[must_use]
    pub const fn new(buzz_repo: BuzzRepository) -> Self {
        Self { buzz_repo }
    }

    /// List buzzes for their recipient (newest first).
    pub async fn list(
        &self,
        user_id: &str,
        limit: u64,
        offset: u64,
        unread_only: bool,
    ) -> AppResult<Vec<buzz::Model>> {
        self.buzz_repo
            .find_by_user(user_id, limit, offset, unread_only)
            .await
    }

    /// Get a buzz as its recipient, marking it read on first access.
    ///
    /// Any other requester is denied outright; there is no read-only
    /// fallback view for non-recipients.
    pub async fn get_for_recipient(&self, user_id: &str, buzz_id: &str) -> AppResult<buzz::Model> {
        let buzz = self.buzz_repo.get_by_id(buzz_id).await?;
        if buzz.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the recipient can view this buzz".to_string(),
            ));
        }

        self.buzz_repo.mark_as_read(buzz).await
    }

    /// Mark a buzz as read without viewing it.
    ///
    /// Idempotent: re-marking an already-read buzz succeeds and leaves it
    /// read.
    pub async fn mark_read(&self, user_id: &str, buzz_id: &str) -> AppResult<buzz::Model> {
        let buzz = self.buzz_repo.get_by_id(buzz_id).await?;
        if buzz.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the recipient can mark this buzz as read".to_string(),
            ));
        }

        self.buzz_repo.mark_as_read(buzz).await
    }

    /// Mark all of the caller's unread buzzes as read, returning the count.
    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<u64> {
        self.buzz_repo.mark_all_as_read(user_id).await
    }

    /// Count the caller's unread buzzes.
    pub async fn unread_count(&self, user_id: &str) -> AppResult<u64> {
        self.buzz_repo.count_unread(user_id).await
    }
}
