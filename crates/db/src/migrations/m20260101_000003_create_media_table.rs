//! Create media table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Media::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Media::SiteId).string_len(32).not_null())
                    .col(ColumnDef::new(Media::MediaType).string_len(16).not_null())
                    .col(ColumnDef::new(Media::StorageKey).string_len(512))
                    .col(ColumnDef::new(Media::Url).string_len(2048).not_null())
                    .col(ColumnDef::new(Media::Caption).string_len(512))
                    .col(
                        ColumnDef::new(Media::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Media::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: site_id (site -> media lookup)
        manager
            .create_index(
                Index::create()
                    .name("idx_media_site_id")
                    .table(Media::Table)
                    .col(Media::SiteId)
                    .to_owned(),
            )
            .await?;

        // Index: (site_id, url) - dedup probe for photo import
        manager
            .create_index(
                Index::create()
                    .name("idx_media_site_id_url")
                    .table(Media::Table)
                    .col(Media::SiteId)
                    .col(Media::Url)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Media {
    Table,
    Id,
    SiteId,
    MediaType,
    StorageKey,
    Url,
    Caption,
    IsPrimary,
    CreatedAt,
}
