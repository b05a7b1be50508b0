//! Favorite repository.

use std::sync::Arc;

use crate::entities::{favorite, Favorite};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use virasat_common::{AppError, AppResult};

/// Favorite repository for database operations.
#[derive(Clone)]
pub struct FavoriteRepository {
    db: Arc<DatabaseConnection>,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a favorite by user and site.
    pub async fn find_by_user_and_site(
        &self,
        user_id: &str,
        site_id: &str,
    ) -> AppResult<Option<favorite::Model>> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::SiteId.eq(site_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a site is favorited by user.
    pub async fn is_favorited(&self, user_id: &str, site_id: &str) -> AppResult<bool> {
        Ok(self.find_by_user_and_site(user_id, site_id).await?.is_some())
    }

    /// Create a new favorite.
    pub async fn create(&self, model: favorite::ActiveModel) -> AppResult<favorite::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a favorite by user and site.
    pub async fn delete_by_user_and_site(&self, user_id: &str, site_id: &str) -> AppResult<()> {
        Favorite::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::SiteId.eq(site_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all favorites of a site (cascade on site deletion).
    pub async fn delete_by_site(&self, site_id: &str) -> AppResult<u64> {
        let result = Favorite::delete_many()
            .filter(favorite::Column::SiteId.eq(site_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Get a user's favorites, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<favorite::Model>> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_favorite(id: &str, user_id: &str, site_id: &str) -> favorite::Model {
        favorite::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            site_id: site_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_is_favorited() {
        let fav = create_test_favorite("fav1", "user1", "site1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[fav]])
                .into_connection(),
        );

        let repo = FavoriteRepository::new(db);
        let result = repo.is_favorited("user1", "site1").await.unwrap();

        assert!(result);
    }

    #[tokio::test]
    async fn test_is_not_favorited() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<favorite::Model>::new()])
                .into_connection(),
        );

        let repo = FavoriteRepository::new(db);
        let result = repo.is_favorited("user1", "site1").await.unwrap();

        assert!(!result);
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let fav1 = create_test_favorite("fav1", "user1", "site1");
        let fav2 = create_test_favorite("fav2", "user1", "site2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[fav1, fav2]])
                .into_connection(),
        );

        let repo = FavoriteRepository::new(db);
        let result = repo.find_by_user("user1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
