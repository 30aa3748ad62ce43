//! Post service.

use buzzblog_common::{AppError, AppResult, IdGenerator};
use buzzblog_db::{
    entities::{
        post::{self, PostStatus},
        tag,
    },
    repositories::{PostRepository, TagRepository},
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    tag_repo: TagRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    #[validate(length(max = 200))]
    pub title: String,

    pub content: String,

    #[serde(default = "default_status")]
    pub status: PostStatus,

    #[serde(default)]
    pub tags: Vec<String>,
}

const fn default_status() -> PostStatus {
    PostStatus::Draft
}

/// Input for updating a post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostInput {
    #[validate(length(max = 200))]
    pub title: Option<String>,

    pub content: Option<String>,

    pub status: Option<PostStatus>,

    /// New tag set; replaces the existing links when present.
    pub tags: Option<Vec<String>>,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, tag_repo: TagRepository) -> Self {
        Self {
            post_repo,
            tag_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new post authored by `author_id`.
    pub async fn create(&self, author_id: &str, input: CreatePostInput) -> AppResult<post::Model> {
        input.validate()?;

        let title = input.title.trim().to_string();
        let content = input.content.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }
        if content.is_empty() {
            return Err(AppError::Validation("Content cannot be empty".to_string()));
        }

        let tag_ids = self.resolve_tags(&input.tags).await?;

        let published_at = if input.status == PostStatus::Published {
            Some(Utc::now().into())
        } else {
            None
        };

        let post_id = self.id_gen.generate();
        let model = post::ActiveModel {
            id: Set(post_id.clone()),
            author_id: Set(author_id.to_string()),
            title: Set(title),
            content: Set(content),
            status: Set(input.status),
            published_at: Set(published_at),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let post = self.post_repo.create(model).await?;

        if !tag_ids.is_empty() {
            self.post_repo.set_tags(&post.id, &tag_ids).await?;
        }

        tracing::debug!(post_id = %post.id, author_id = %author_id, "Created post");
        Ok(post)
    }

    /// Update a post. Only the author may do so.
    pub async fn update(
        &self,
        user_id: &str,
        post_id: &str,
        input: UpdatePostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;

        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can modify this post".to_string(),
            ));
        }

        let was_published = post.is_published();
        let mut active: post::ActiveModel = post.into();

        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::Validation("Title cannot be empty".to_string()));
            }
            active.title = Set(title);
        }

        if let Some(content) = input.content {
            let content = content.trim().to_string();
            if content.is_empty() {
                return Err(AppError::Validation("Content cannot be empty".to_string()));
            }
            active.content = Set(content);
        }

        if let Some(status) = input.status {
            if status == PostStatus::Published && !was_published {
                active.published_at = Set(Some(Utc::now().into()));
            }
            active.status = Set(status);
        }

        active.updated_at = Set(Some(Utc::now().into()));

        let post = self.post_repo.update(active).await?;

        if let Some(tags) = input.tags {
            let tag_ids = self.resolve_tags(&tags).await?;
            self.post_repo.set_tags(&post.id, &tag_ids).await?;
        }

        Ok(post)
    }

    /// Delete a post. Only the author may do so.
    ///
    /// Comments, buzzes and tag links go with it (FK cascades).
    pub async fn delete(&self, user_id: &str, post_id: &str) -> AppResult<()> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can delete this post".to_string(),
            ));
        }

        self.post_repo.delete(post_id).await?;
        tracing::debug!(post_id = %post_id, "Deleted post");
        Ok(())
    }

    /// Publish a draft post. Only the author may do so.
    ///
    /// Idempotent on an already-published post.
    pub async fn publish(&self, user_id: &str, post_id: &str) -> AppResult<post::Model> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can publish this post".to_string(),
            ));
        }

        if post.is_published() {
            return Ok(post);
        }

        let mut active: post::ActiveModel = post.into();
        active.status = Set(PostStatus::Published);
        active.published_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Some(Utc::now().into()));

        self.post_repo.update(active).await
    }

    /// Get a post by ID. Read access is open to all.
    pub async fn get(&self, post_id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(post_id).await
    }

    /// List published posts (newest first).
    pub async fn list_published(&self, limit: u64, offset: u64) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_published(limit, offset).await
    }

    /// List a user's own posts, drafts included.
    pub async fn list_by_author(
        &self,
        author_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_by_author(author_id, limit, offset).await
    }

    /// List published posts carrying a tag.
    pub async fn list_by_tag(
        &self,
        tag_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<post::Model>> {
        // Surface NotFound for a bogus tag id rather than an empty list
        self.tag_repo.get_by_id(tag_id).await?;
        self.post_repo.find_published_by_tag(tag_id, limit, offset).await
    }

    /// Get the tags attached to a post.
    pub async fn tags(&self, post_id: &str) -> AppResult<Vec<tag::Model>> {
        self.tag_repo.find_for_post(post_id).await
    }

    /// Resolve tag names to IDs, creating missing tags ad hoc.
    async fn resolve_tags(&self, names: &[String]) -> AppResult<Vec<String>> {
        let mut tag_ids = Vec::with_capacity(names.len());
        for name in names {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::Validation("Tag name cannot be empty".to_string()));
            }
            let tag = self.tag_repo.get_or_create(name).await?;
            if !tag_ids.contains(&tag.id) {
                tag_ids.push(tag.id);
            }
        }
        Ok(tag_ids)
    }
}
