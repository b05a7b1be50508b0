//! Create heritage site table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HeritageSite::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HeritageSite::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HeritageSite::Name).string_len(256).not_null())
                    .col(ColumnDef::new(HeritageSite::Description).text().not_null())
                    .col(
                        ColumnDef::new(HeritageSite::HistoricalSignificance)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeritageSite::Category)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(HeritageSite::State).string_len(128).not_null())
                    .col(ColumnDef::new(HeritageSite::City).string_len(128).not_null())
                    .col(ColumnDef::new(HeritageSite::Latitude).double())
                    .col(ColumnDef::new(HeritageSite::Longitude).double())
                    .col(
                        ColumnDef::new(HeritageSite::IsUnesco)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(HeritageSite::TimePeriod).string_len(256))
                    .col(ColumnDef::new(HeritageSite::VisitorGuidelines).text())
                    .col(
                        ColumnDef::new(HeritageSite::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(HeritageSite::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(HeritageSite::CreatedBy)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(HeritageSite::FolkTales).text())
                    .col(ColumnDef::new(HeritageSite::CulturalHeritage).text())
                    .col(ColumnDef::new(HeritageSite::Cuisine).text())
                    .col(ColumnDef::new(HeritageSite::Stories).text())
                    .col(ColumnDef::new(HeritageSite::Community).text())
                    .col(ColumnDef::new(HeritageSite::TicketPrice).string_len(128))
                    .col(ColumnDef::new(HeritageSite::OpeningHours).string_len(256))
                    .col(ColumnDef::new(HeritageSite::BestTimeToVisit).string_len(256))
                    .col(ColumnDef::new(HeritageSite::Timezone).string_len(64))
                    .col(ColumnDef::new(HeritageSite::View360Url).string_len(1024))
                    .col(ColumnDef::new(HeritageSite::View3dUrl).string_len(1024))
                    .col(
                        ColumnDef::new(HeritageSite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(HeritageSite::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: publish flag (public listing base set)
        manager
            .create_index(
                Index::create()
                    .name("idx_heritage_site_is_published")
                    .table(HeritageSite::Table)
                    .col(HeritageSite::IsPublished)
                    .to_owned(),
            )
            .await?;

        // Index: state
        manager
            .create_index(
                Index::create()
                    .name("idx_heritage_site_state")
                    .table(HeritageSite::Table)
                    .col(HeritageSite::State)
                    .to_owned(),
            )
            .await?;

        // Index: category
        manager
            .create_index(
                Index::create()
                    .name("idx_heritage_site_category")
                    .table(HeritageSite::Table)
                    .col(HeritageSite::Category)
                    .to_owned(),
            )
            .await?;

        // Index: UNESCO flag
        manager
            .create_index(
                Index::create()
                    .name("idx_heritage_site_is_unesco")
                    .table(HeritageSite::Table)
                    .col(HeritageSite::IsUnesco)
                    .to_owned(),
            )
            .await?;

        // Index: view_count (popularity ordering)
        manager
            .create_index(
                Index::create()
                    .name("idx_heritage_site_view_count")
                    .table(HeritageSite::Table)
                    .col(HeritageSite::ViewCount)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HeritageSite::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HeritageSite {
    Table,
    Id,
    Name,
    Description,
    HistoricalSignificance,
    Category,
    State,
    City,
    Latitude,
    Longitude,
    IsUnesco,
    TimePeriod,
    VisitorGuidelines,
    ViewCount,
    IsPublished,
    CreatedBy,
    FolkTales,
    CulturalHeritage,
    Cuisine,
    Stories,
    Community,
    TicketPrice,
    OpeningHours,
    BestTimeToVisit,
    Timezone,
    View360Url,
    View3dUrl,
    CreatedAt,
    UpdatedAt,
}
