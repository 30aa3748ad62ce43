//! Create buzz table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Buzz::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Buzz::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Buzz::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Buzz::TriggerId).string_len(32).not_null())
                    .col(ColumnDef::new(Buzz::PostId).string_len(32).not_null())
                    .col(ColumnDef::new(Buzz::CommentId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Buzz::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Buzz::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buzz_recipient")
                            .from(Buzz::Table, Buzz::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buzz_trigger")
                            .from(Buzz::Table, Buzz::TriggerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buzz_post")
                            .from(Buzz::Table, Buzz::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buzz_comment")
                            .from(Buzz::Table, Buzz::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's buzzes)
        manager
            .create_index(
                Index::create()
                    .name("idx_buzz_user_id")
                    .table(Buzz::Table)
                    .col(Buzz::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, is_read) (for unread count)
        manager
            .create_index(
                Index::create()
                    .name("idx_buzz_user_is_read")
                    .table(Buzz::Table)
                    .col(Buzz::UserId)
                    .col(Buzz::IsRead)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for pagination)
        manager
            .create_index(
                Index::create()
                    .name("idx_buzz_created_at")
                    .table(Buzz::Table)
                    .col(Buzz::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Buzz::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Buzz {
    Table,
    Id,
    UserId,
    TriggerId,
    PostId,
    CommentId,
    IsRead,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
}

#[derive(Iden)]
enum Comment {
    Table,
    Id,
}
