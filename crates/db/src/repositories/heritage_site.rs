//! Heritage site repository.

use std::sync::Arc;

use crate::entities::{heritage_site, HeritageSite};
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use virasat_common::{AppError, AppResult};

/// Escape LIKE wildcards in a user-supplied search term.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Heritage site repository for database operations.
#[derive(Clone)]
pub struct HeritageSiteRepository {
    db: Arc<DatabaseConnection>,
}

impl HeritageSiteRepository {
    /// Create a new heritage site repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a site by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<heritage_site::Model>> {
        HeritageSite::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a site by ID, or fail with `SiteNotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<heritage_site::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::SiteNotFound(id.to_string()))
    }

    /// Find published sites, optionally filtered, most viewed first.
    ///
    /// Ties on the view counter break by id ascending; ids are ULIDs, so
    /// that is creation order.
    pub async fn find_published(
        &self,
        category: Option<heritage_site::Category>,
        state: Option<&str>,
        unesco_only: bool,
    ) -> AppResult<Vec<heritage_site::Model>> {
        let mut query =
            HeritageSite::find().filter(heritage_site::Column::IsPublished.eq(true));

        if let Some(category) = category {
            query = query.filter(heritage_site::Column::Category.eq(category));
        }

        if let Some(state) = state {
            query = query.filter(heritage_site::Column::State.eq(state));
        }

        if unesco_only {
            query = query.filter(heritage_site::Column::IsUnesco.eq(true));
        }

        query
            .order_by_desc(heritage_site::Column::ViewCount)
            .order_by_asc(heritage_site::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find published sites whose name, state, city, or description
    /// contains the term (case-insensitive), most viewed first.
    pub async fn find_published_matching(
        &self,
        term: &str,
    ) -> AppResult<Vec<heritage_site::Model>> {
        let pattern = format!("%{}%", escape_like(term));

        HeritageSite::find()
            .filter(heritage_site::Column::IsPublished.eq(true))
            .filter(
                Condition::any()
                    .add(Expr::col(heritage_site::Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(heritage_site::Column::State).ilike(pattern.clone()))
                    .add(Expr::col(heritage_site::Column::City).ilike(pattern.clone()))
                    .add(Expr::col(heritage_site::Column::Description).ilike(pattern)),
            )
            .order_by_desc(heritage_site::Column::ViewCount)
            .order_by_asc(heritage_site::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All sites, including unpublished (admin listing), in creation order.
    pub async fn find_all(&self) -> AppResult<Vec<heritage_site::Model>> {
        HeritageSite::find()
            .order_by_asc(heritage_site::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new site.
    pub async fn create(
        &self,
        model: heritage_site::ActiveModel,
    ) -> AppResult<heritage_site::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply a partial update.
    pub async fn update(
        &self,
        model: heritage_site::ActiveModel,
    ) -> AppResult<heritage_site::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a site by ID.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        HeritageSite::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Atomically add one to a site's view counter.
    ///
    /// Returns the number of rows touched; zero means the site is missing.
    pub async fn increment_view_count(&self, id: &str) -> AppResult<u64> {
        let result = HeritageSite::update_many()
            .col_expr(
                heritage_site::Column::ViewCount,
                Expr::col(heritage_site::Column::ViewCount).add(1),
            )
            .filter(heritage_site::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
