//! End-to-end notification flow tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test notification_flow -- --ignored`

#![allow(clippy::unwrap_used)]

use buzzblog_core::{
    BuzzService, CommentService, CreateCommentInput, CreatePostInput, CreateUserInput,
    PostService, UserService,
};
use buzzblog_db::entities::post::PostStatus;
use buzzblog_db::repositories::{
    BuzzRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};
use buzzblog_db::test_utils::TestDatabase;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

struct Services {
    users: UserService,
    posts: PostService,
    comments: CommentService,
    buzzes: BuzzService,
}

fn wire(conn: Arc<DatabaseConnection>) -> Services {
    let post_repo = PostRepository::new(Arc::clone(&conn));
    Services {
        users: UserService::new(UserRepository::new(Arc::clone(&conn))),
        posts: PostService::new(post_repo.clone(), TagRepository::new(Arc::clone(&conn))),
        comments: CommentService::new(CommentRepository::new(Arc::clone(&conn)), post_repo),
        buzzes: BuzzService::new(BuzzRepository::new(conn)),
    }
}

fn signup(username: &str) -> CreateUserInput {
    CreateUserInput {
        username: username.to_string(),
        password: "correct-horse-battery".to_string(),
        name: None,
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_comment_buzz_read_cycle() {
    let db = TestDatabase::create_unique().await.unwrap();
    buzzblog_db::migrate(db.connection()).await.unwrap();
    let conn = Arc::new(Database::connect(db.config.database_url()).await.unwrap());
    let svc = wire(conn);

    // User A writes a post; user B comments on it
    let alice = svc.users.create(signup("alice")).await.unwrap();
    let bob = svc.users.create(signup("bob")).await.unwrap();

    let post = svc
        .posts
        .create(
            &alice.id,
            CreatePostInput {
                title: "Hello".to_string(),
                content: "First post".to_string(),
                status: PostStatus::Published,
                tags: vec!["intro".to_string()],
            },
        )
        .await
        .unwrap();

    let comment = svc
        .comments
        .create(
            &bob.id,
            CreateCommentInput {
                post_id: post.id.clone(),
                content: "hi".to_string(),
                parent_id: None,
            },
        )
        .await
        .unwrap();

    // Exactly one unread buzz for A, referencing (post, comment)
    let buzzes = svc.buzzes.list(&alice.id, 10, 0, false).await.unwrap();
    assert_eq!(buzzes.len(), 1);
    assert_eq!(buzzes[0].trigger_id, bob.id);
    assert_eq!(buzzes[0].post_id, post.id);
    assert_eq!(buzzes[0].comment_id, comment.id);
    assert!(!buzzes[0].is_read);

    // A opens the buzz: it becomes read; reopening keeps it read and
    // creates no duplicate
    let buzz_id = buzzes[0].id.clone();
    let opened = svc.buzzes.get_for_recipient(&alice.id, &buzz_id).await.unwrap();
    assert!(opened.is_read);
    let reopened = svc.buzzes.get_for_recipient(&alice.id, &buzz_id).await.unwrap();
    assert!(reopened.is_read);
    assert_eq!(svc.buzzes.list(&alice.id, 10, 0, false).await.unwrap().len(), 1);
    assert_eq!(svc.buzzes.unread_count(&alice.id).await.unwrap(), 0);

    // B replies to B's own comment: still a second buzz for A, because
    // replies notify the post author, not the parent comment's author
    svc.comments
        .create(
            &bob.id,
            CreateCommentInput {
                post_id: post.id.clone(),
                content: "replying to myself".to_string(),
                parent_id: Some(comment.id.clone()),
            },
        )
        .await
        .unwrap();
    assert_eq!(svc.buzzes.unread_count(&alice.id).await.unwrap(), 1);

    // A comments on A's own post: silent
    svc.comments
        .create(
            &alice.id,
            CreateCommentInput {
                post_id: post.id.clone(),
                content: "thanks all".to_string(),
                parent_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(svc.buzzes.unread_count(&alice.id).await.unwrap(), 1);
    assert_eq!(svc.buzzes.unread_count(&bob.id).await.unwrap(), 0);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_reply_threading() {
    let db = TestDatabase::create_unique().await.unwrap();
    buzzblog_db::migrate(db.connection()).await.unwrap();
    let conn = Arc::new(Database::connect(db.config.database_url()).await.unwrap());
    let svc = wire(conn);

    let alice = svc.users.create(signup("alice")).await.unwrap();
    let post = svc
        .posts
        .create(
            &alice.id,
            CreatePostInput {
                title: "Threads".to_string(),
                content: "Body".to_string(),
                status: PostStatus::Published,
                tags: vec![],
            },
        )
        .await
        .unwrap();

    let top = svc
        .comments
        .create(
            &alice.id,
            CreateCommentInput {
                post_id: post.id.clone(),
                content: "top".to_string(),
                parent_id: None,
            },
        )
        .await
        .unwrap();
    let reply = svc
        .comments
        .create(
            &alice.id,
            CreateCommentInput {
                post_id: post.id.clone(),
                content: "reply".to_string(),
                parent_id: Some(top.id.clone()),
            },
        )
        .await
        .unwrap();
    // Replies may themselves be replied to
    let nested = svc
        .comments
        .create(
            &alice.id,
            CreateCommentInput {
                post_id: post.id.clone(),
                content: "nested".to_string(),
                parent_id: Some(reply.id.clone()),
            },
        )
        .await
        .unwrap();
    assert!(nested.is_reply());

    // Top-level listing excludes replies
    let top_level = svc.comments.list_top_level(&post.id, 10, 0).await.unwrap();
    assert_eq!(top_level.len(), 1);
    assert_eq!(top_level[0].id, top.id);

    // Replies are reached through their parent
    let replies = svc.comments.list_replies(&top.id, 10, 0).await.unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].id, reply.id);

    db.drop_database().await.unwrap();
}
