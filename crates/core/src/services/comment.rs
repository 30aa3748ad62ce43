//! Comment service.

use buzzblog_common::{AppError, AppResult, IdGenerator};
use buzzblog_db::{
    entities::comment,
    repositories::{CommentRepository, PostRepository},
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;

use crate::services::buzz::buzz_for_comment;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    post_repo: PostRepository,
    id_gen: IdGenerator,
}

/// Input for creating a comment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    pub post_id: String,
    pub content: String,
    /// Parent comment ID when replying; must belong to the same post.
    pub parent_id: Option<String>,
}

/// Input for updating a comment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentInput {
    pub content: String,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(comment_repo: CommentRepository, post_repo: PostRepository) -> Self {
        Self {
            comment_repo,
            post_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a comment (or reply) authored by `author_id`.
    ///
    /// When the commenter is not the post's author, the buzz for the post
    /// author is written in the same transaction as the comment.
    pub async fn create(
        &self,
        author_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<comment::Model> {
        let content = input.content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        let post = self.post_repo.get_by_id(&input.post_id).await?;

        // A reply must target a comment on the same post
        if let Some(ref parent_id) = input.parent_id {
            let parent = self.comment_repo.get_by_id(parent_id).await?;
            if parent.post_id != post.id {
                return Err(AppError::BadRequest(
                    "Parent comment belongs to a different post".to_string(),
                ));
            }
        }

        let comment_id = self.id_gen.generate();
        let model = comment::ActiveModel {
            id: Set(comment_id.clone()),
            post_id: Set(post.id.clone()),
            author_id: Set(author_id.to_string()),
            content: Set(content),
            parent_id: Set(input.parent_id),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        // Replies still notify the post author, not the parent's author
        let buzz = buzz_for_comment(&post, author_id, &comment_id, &self.id_gen);

        let comment = self.comment_repo.create_with_buzz(model, buzz).await?;

        tracing::debug!(
            comment_id = %comment.id,
            post_id = %comment.post_id,
            is_reply = comment.is_reply(),
            "Created comment"
        );
        Ok(comment)
    }

    /// Update a comment. Only the author may do so.
    pub async fn update(
        &self,
        user_id: &str,
        comment_id: &str,
        input: UpdateCommentInput,
    ) -> AppResult<comment::Model> {
        let content = input.content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        let comment = self.comment_repo.get_by_id(comment_id).await?;
        if comment.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can modify this comment".to_string(),
            ));
        }

        let mut active: comment::ActiveModel = comment.into();
        active.content = Set(content);
        active.updated_at = Set(Some(Utc::now().into()));

        self.comment_repo.update(active).await
    }

    /// Delete a comment and its reply subtree. Only the author may do so.
    pub async fn delete(&self, user_id: &str, comment_id: &str) -> AppResult<()> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        if comment.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can delete this comment".to_string(),
            ));
        }

        self.comment_repo.delete(comment_id).await?;
        tracing::debug!(comment_id = %comment_id, "Deleted comment");
        Ok(())
    }

    /// Get a comment by ID. Read access is open to all.
    pub async fn get(&self, comment_id: &str) -> AppResult<comment::Model> {
        self.comment_repo.get_by_id(comment_id).await
    }

    /// List top-level comments on a post (newest first).
    pub async fn list_top_level(
        &self,
        post_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<comment::Model>> {
        self.post_repo.get_by_id(post_id).await?;
        self.comment_repo
            .find_top_level_by_post(post_id, limit, offset)
            .await
    }

    /// List direct replies to a comment (oldest first).
    pub async fn list_replies(
        &self,
        comment_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.get_by_id(comment_id).await?;
        self.comment_repo.find_replies(comment_id, limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use buzzblog_db::entities::{buzz, post};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_post(id: &str, author_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            author_id: author_id.to_string(),
            title: "Title".to_string(),
            content: "Content".to_string(),
            status: post::PostStatus::Published,
            published_at: Some(Utc::now().into()),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_comment(
        id: &str,
        post_id: &str,
        author_id: &str,
        parent_id: Option<&str>,
    ) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            content: "hi".to_string(),
            parent_id: parent_id.map(ToString::to_string),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_buzz(id: &str) -> buzz::Model {
        buzz::Model {
            id: id.to_string(),
            user_id: "ua".to_string(),
            trigger_id: "ub".to_string(),
            post_id: "p1".to_string(),
            comment_id: "c1".to_string(),
            is_read: false,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> CommentService {
        CommentService::new(
            CommentRepository::new(Arc::clone(&db)),
            PostRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_whitespace_content() {
        // Validation runs before any query; an empty mock proves it
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(db)
            .create(
                "ub",
                CreateCommentInput {
                    post_id: "p1".to_string(),
                    content: "   \n\t ".to_string(),
                    parent_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_cross_post_parent() {
        let post = create_test_post("p1", "ua");
        let parent = create_test_comment("c9", "other-post", "ua", None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_query_results([[parent]])
                .into_connection(),
        );

        let result = service(db)
            .create(
                "ub",
                CreateCommentInput {
                    post_id: "p1".to_string(),
                    content: "hi".to_string(),
                    parent_id: Some("c9".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_on_missing_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let result = service(db)
            .create(
                "ub",
                CreateCommentInput {
                    post_id: "missing".to_string(),
                    content: "hi".to_string(),
                    parent_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_by_other_user_writes_buzz() {
        let post = create_test_post("p1", "ua");
        let comment = create_test_comment("c1", "p1", "ub", None);
        let buzz = create_test_buzz("b1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_query_results([[comment]])
                .append_query_results([[buzz]])
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

        let created = service(db)
            .create(
                "ub",
                CreateCommentInput {
                    post_id: "p1".to_string(),
                    content: "hi".to_string(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.post_id, "p1");
        assert!(!created.is_reply());
    }

    #[tokio::test]
    async fn test_self_comment_writes_no_buzz() {
        let post = create_test_post("p1", "ua");
        let comment = create_test_comment("c1", "p1", "ua", None);

        // Nothing queued beyond the comment row: a buzz insert would
        // exhaust the mock and fail the test
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_query_results([[comment]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let created = service(db)
            .create(
                "ua",
                CreateCommentInput {
                    post_id: "p1".to_string(),
                    content: "hi".to_string(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.author_id, "ua");
    }

    #[tokio::test]
    async fn test_update_by_non_author_is_forbidden() {
        let comment = create_test_comment("c1", "p1", "ua", None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[comment.clone()]])
                .into_connection(),
        );

        let result = service(db)
            .update(
                "ub",
                "c1",
                UpdateCommentInput {
                    content: "edited".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_by_non_author_is_forbidden() {
        let comment = create_test_comment("c1", "p1", "ua", None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[comment]])
                .into_connection(),
        );

        let result = service(db).delete("ub", "c1").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_is_reply_derivation() {
        let top = create_test_comment("c1", "p1", "ua", None);
        let reply = create_test_comment("c2", "p1", "ua", Some("c1"));

        assert!(!top.is_reply());
        assert!(reply.is_reply());
    }
}
