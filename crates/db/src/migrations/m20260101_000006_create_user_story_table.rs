//! Create user story table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserStory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserStory::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserStory::SiteId).string_len(32).not_null())
                    .col(ColumnDef::new(UserStory::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(UserStory::Content).text().not_null())
                    .col(ColumnDef::new(UserStory::StoryType).string_len(16).not_null())
                    .col(
                        ColumnDef::new(UserStory::AuthorName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserStory::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserStory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (site_id, is_approved) - public story reads
        manager
            .create_index(
                Index::create()
                    .name("idx_user_story_site_id_is_approved")
                    .table(UserStory::Table)
                    .col(UserStory::SiteId)
                    .col(UserStory::IsApproved)
                    .to_owned(),
            )
            .await?;

        // Index: user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_user_story_user_id")
                    .table(UserStory::Table)
                    .col(UserStory::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserStory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserStory {
    Table,
    Id,
    SiteId,
    UserId,
    Content,
    StoryType,
    AuthorName,
    IsApproved,
    CreatedAt,
}
