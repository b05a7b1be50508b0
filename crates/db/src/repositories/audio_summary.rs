//! Audio summary repository.

use std::sync::Arc;

use crate::entities::{audio_summary, AudioSummary};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use virasat_common::{AppError, AppResult};

/// Audio summary repository for database operations.
#[derive(Clone)]
pub struct AudioSummaryRepository {
    db: Arc<DatabaseConnection>,
}

impl AudioSummaryRepository {
    /// Create a new audio summary repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an audio summary by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<audio_summary::Model>> {
        AudioSummary::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an audio summary by ID, or fail with `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<audio_summary::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("audio {id}")))
    }

    /// All audio summaries for a site, in creation order.
    pub async fn find_by_site(&self, site_id: &str) -> AppResult<Vec<audio_summary::Model>> {
        AudioSummary::find()
            .filter(audio_summary::Column::SiteId.eq(site_id))
            .order_by_asc(audio_summary::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All audio summaries (admin statistics).
    pub async fn find_all(&self) -> AppResult<Vec<audio_summary::Model>> {
        AudioSummary::find()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new audio summary.
    pub async fn create(
        &self,
        model: audio_summary::ActiveModel,
    ) -> AppResult<audio_summary::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an audio summary by ID.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        AudioSummary::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all audio for a site (cascade on site deletion).
    pub async fn delete_by_site(&self, site_id: &str) -> AppResult<u64> {
        let result = AudioSummary::delete_many()
            .filter(audio_summary::Column::SiteId.eq(site_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Atomically add one to an audio summary's play counter.
    ///
    /// Returns the number of rows touched; zero means the row is missing.
    pub async fn increment_play_count(&self, id: &str) -> AppResult<u64> {
        let result = AudioSummary::update_many()
            .col_expr(
                audio_summary::Column::PlayCount,
                Expr::col(audio_summary::Column::PlayCount).add(1),
            )
            .filter(audio_summary::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
