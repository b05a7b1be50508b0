//! User story repository.

use std::sync::Arc;

use crate::entities::{user_story, UserStory};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use virasat_common::{AppError, AppResult};

/// User story repository for database operations.
#[derive(Clone)]
pub struct UserStoryRepository {
    db: Arc<DatabaseConnection>,
}

impl UserStoryRepository {
    /// Create a new user story repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a story by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user_story::Model>> {
        UserStory::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a story by ID, or fail with `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user_story::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("story {id}")))
    }

    /// Approved stories for a site, in submission order.
    ///
    /// Hits the (site, approved) index; callers filter by type afterwards.
    pub async fn find_approved_by_site(
        &self,
        site_id: &str,
    ) -> AppResult<Vec<user_story::Model>> {
        UserStory::find()
            .filter(user_story::Column::SiteId.eq(site_id))
            .filter(user_story::Column::IsApproved.eq(true))
            .order_by_asc(user_story::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All stories (admin moderation queue), in submission order.
    pub async fn find_all(&self) -> AppResult<Vec<user_story::Model>> {
        UserStory::find()
            .order_by_asc(user_story::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new story.
    pub async fn create(&self, model: user_story::ActiveModel) -> AppResult<user_story::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Flip a story's approval flag to true.
    pub async fn set_approved(&self, id: &str) -> AppResult<user_story::Model> {
        let story = self.get_by_id(id).await?;
        let mut active: user_story::ActiveModel = story.into();
        active.is_approved = Set(true);
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a story by ID (rejection is a hard delete).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        UserStory::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all stories of a site (cascade on site deletion).
    pub async fn delete_by_site(&self, site_id: &str) -> AppResult<u64> {
        let result = UserStory::delete_many()
            .filter(user_story::Column::SiteId.eq(site_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user_story::StoryType;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_story(id: &str, site_id: &str, approved: bool) -> user_story::Model {
        user_story::Model {
            id: id.to_string(),
            site_id: site_id.to_string(),
            user_id: "user1".to_string(),
            content: "A local legend about the fort...".to_string(),
            story_type: StoryType::Story,
            author_name: "Asha".to_string(),
            is_approved: approved,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_approved_by_site() {
        let s1 = create_test_story("s1", "site1", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[s1]])
                .into_connection(),
        );

        let repo = UserStoryRepository::new(db);
        let result = repo.find_approved_by_site("site1").await.unwrap();

        assert_eq!(result.len(), 1);
        assert!(result[0].is_approved);
    }

    #[tokio::test]
    async fn test_set_approved() {
        let pending = create_test_story("s1", "site1", false);
        let mut approved = pending.clone();
        approved.is_approved = true;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .append_query_results([[approved]])
                .into_connection(),
        );

        let repo = UserStoryRepository::new(db);
        let result = repo.set_approved("s1").await.unwrap();

        assert!(result.is_approved);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user_story::Model>::new()])
                .into_connection(),
        );

        let repo = UserStoryRepository::new(db);
        let result = repo.get_by_id("nope").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
