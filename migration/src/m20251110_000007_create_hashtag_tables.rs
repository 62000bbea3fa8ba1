use sea_orm_migration::prelude::*;

use super::m20251110_000002_create_post_table::Post;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hashtag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hashtag::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Hashtag::Name)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Hashtag::UsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Hashtag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Hashtag::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostHashtag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostHashtag::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostHashtag::PostId).integer().not_null())
                    .col(ColumnDef::new(PostHashtag::HashtagId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_hashtag_post_id")
                            .from(PostHashtag::Table, PostHashtag::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_hashtag_hashtag_id")
                            .from(PostHashtag::Table, PostHashtag::HashtagId)
                            .to(Hashtag::Table, Hashtag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_post_hashtag_post_id_hashtag_id")
                    .table(PostHashtag::Table)
                    .col(PostHashtag::PostId)
                    .col(PostHashtag::HashtagId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostHashtag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hashtag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Hashtag {
    Table,
    Id,
    Name,
    UsageCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum PostHashtag {
    Table,
    Id,
    PostId,
    HashtagId,
}
