//! Create audio summary table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AudioSummary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AudioSummary::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AudioSummary::SiteId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(AudioSummary::StorageKey)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AudioSummary::Url).string_len(2048).not_null())
                    .col(ColumnDef::new(AudioSummary::Duration).double())
                    .col(ColumnDef::new(AudioSummary::Language).string_len(64).not_null())
                    .col(
                        ColumnDef::new(AudioSummary::PlayCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AudioSummary::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: site_id (site -> audio lookup)
        manager
            .create_index(
                Index::create()
                    .name("idx_audio_summary_site_id")
                    .table(AudioSummary::Table)
                    .col(AudioSummary::SiteId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AudioSummary::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AudioSummary {
    Table,
    Id,
    SiteId,
    StorageKey,
    Url,
    Duration,
    Language,
    PlayCount,
    CreatedAt,
}
