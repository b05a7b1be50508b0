//! Media repository.

use std::sync::Arc;

use crate::entities::{media, Media};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use virasat_common::{AppError, AppResult};

/// Media repository for database operations.
#[derive(Clone)]
pub struct MediaRepository {
    db: Arc<DatabaseConnection>,
}

impl MediaRepository {
    /// Create a new media repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a media row by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<media::Model>> {
        Media::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a media row by ID, or fail with `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<media::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("media {id}")))
    }

    /// All media for a site, in creation order.
    pub async fn find_by_site(&self, site_id: &str) -> AppResult<Vec<media::Model>> {
        Media::find()
            .filter(media::Column::SiteId.eq(site_id))
            .order_by_asc(media::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All media for a batch of sites, in creation order.
    ///
    /// One query for the whole listing instead of one per site.
    pub async fn find_by_sites(&self, site_ids: &[String]) -> AppResult<Vec<media::Model>> {
        if site_ids.is_empty() {
            return Ok(Vec::new());
        }

        Media::find()
            .filter(media::Column::SiteId.is_in(site_ids.iter().cloned()))
            .order_by_asc(media::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Indexed dedup probe: does this exact URL already exist for the site?
    pub async fn exists_by_site_and_url(&self, site_id: &str, url: &str) -> AppResult<bool> {
        let found = Media::find()
            .filter(media::Column::SiteId.eq(site_id))
            .filter(media::Column::Url.eq(url))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Count image-type rows for a site.
    pub async fn count_images_by_site(&self, site_id: &str) -> AppResult<u64> {
        Media::find()
            .filter(media::Column::SiteId.eq(site_id))
            .filter(media::Column::MediaType.eq(media::MediaType::Image))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new media row.
    pub async fn create(&self, model: media::ActiveModel) -> AppResult<media::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a media row by ID.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Media::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all media for a site (cascade on site deletion).
    pub async fn delete_by_site(&self, site_id: &str) -> AppResult<u64> {
        let result = Media::delete_many()
            .filter(media::Column::SiteId.eq(site_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Make exactly one row the site's primary, in a single statement.
    ///
    /// `is_primary = (id = $media_id)` over the site's rows: the target ends
    /// up set, every sibling ends up unset, and no reader can observe a
    /// zero-primary intermediate state. Idempotent.
    pub async fn set_primary_exclusive(&self, site_id: &str, media_id: &str) -> AppResult<u64> {
        let result = Media::update_many()
            .col_expr(
                media::Column::IsPrimary,
                Expr::col(media::Column::Id).eq(media_id),
            )
            .filter(media::Column::SiteId.eq(site_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
