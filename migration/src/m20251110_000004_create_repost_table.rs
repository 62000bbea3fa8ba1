use sea_orm_migration::prelude::*;

use super::m20251110_000001_create_user_table::User;
use super::m20251110_000002_create_post_table::Post;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repost::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repost::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Repost::UserId).integer().not_null())
                    .col(ColumnDef::new(Repost::PostId).integer().not_null())
                    .col(
                        ColumnDef::new(Repost::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repost_user_id")
                            .from(Repost::Table, Repost::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repost_post_id")
                            .from(Repost::Table, Repost::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_repost_user_id_post_id")
                    .table(Repost::Table)
                    .col(Repost::UserId)
                    .col(Repost::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Repost feed entries are scanned per user, newest first.
        manager
            .create_index(
                Index::create()
                    .name("idx_repost_user_id_created_at")
                    .table(Repost::Table)
                    .col(Repost::UserId)
                    .col(Repost::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Repost::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Repost {
    Table,
    Id,
    UserId,
    PostId,
    CreatedAt,
}
