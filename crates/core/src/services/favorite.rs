//! Favorite service for per-user site bookmarks.

use serde::Serialize;
use virasat_common::{AppResult, IdGenerator};
use virasat_db::entities::heritage_site;
use virasat_db::repositories::{FavoriteRepository, HeritageSiteRepository};
use sea_orm::Set;

/// Outcome of a toggle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleResult {
    pub favorited: bool,
}

/// Favorite service for managing bookmarks.
#[derive(Clone)]
pub struct FavoriteService {
    favorite_repo: FavoriteRepository,
    site_repo: HeritageSiteRepository,
    id_gen: IdGenerator,
}

impl FavoriteService {
    /// Create a new favorite service.
    #[must_use]
    pub const fn new(favorite_repo: FavoriteRepository, site_repo: HeritageSiteRepository) -> Self {
        Self {
            favorite_repo,
            site_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle a favorite: delete it if present, create it otherwise.
    pub async fn toggle(&self, user_id: &str, site_id: &str) -> AppResult<ToggleResult> {
        if self.favorite_repo.is_favorited(user_id, site_id).await? {
            self.favorite_repo
                .delete_by_user_and_site(user_id, site_id)
                .await?;
            return Ok(ToggleResult { favorited: false });
        }

        let id = self.id_gen.generate();
        self.favorite_repo
            .create(virasat_db::entities::favorite::ActiveModel {
                id: Set(id),
                user_id: Set(user_id.to_string()),
                site_id: Set(site_id.to_string()),
                created_at: Set(chrono::Utc::now().into()),
            })
            .await?;

        Ok(ToggleResult { favorited: true })
    }

    /// Whether the user has favorited the site.
    pub async fn is_favorited(&self, user_id: &str, site_id: &str) -> AppResult<bool> {
        self.favorite_repo.is_favorited(user_id, site_id).await
    }

    /// The user's favorited sites, newest favorite first.
    ///
    /// Favorites whose target site no longer exists are dropped silently,
    /// never surfaced as an error.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<heritage_site::Model>> {
        let favorites = self.favorite_repo.find_by_user(user_id).await?;

        let mut sites = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            if let Some(site) = self.site_repo.find_by_id(&favorite.site_id).await? {
                sites.push(site);
            }
        }

        Ok(sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use virasat_db::entities::favorite;
    use virasat_db::entities::heritage_site::Category;

    fn create_test_favorite(id: &str, user_id: &str, site_id: &str) -> favorite::Model {
        favorite::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            site_id: site_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_site(id: &str) -> heritage_site::Model {
        heritage_site::Model {
            id: id.to_string(),
            name: "Hawa Mahal".to_string(),
            description: "Palace of winds".to_string(),
            historical_significance: "Rajput architecture".to_string(),
            category: Category::Palace,
            state: "Rajasthan".to_string(),
            city: "Jaipur".to_string(),
            latitude: None,
            longitude: None,
            is_unesco: false,
            time_period: None,
            visitor_guidelines: None,
            view_count: 0,
            is_published: true,
            created_by: "admin1".to_string(),
            folk_tales: None,
            cultural_heritage: None,
            cuisine: None,
            stories: None,
            community: None,
            ticket_price: None,
            opening_hours: None,
            best_time_to_visit: None,
            timezone: None,
            view360_url: None,
            view3d_url: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_toggle_creates_when_absent() {
        let created = create_test_favorite("fav1", "user1", "site1");

        let fav_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<favorite::Model>::new()])
                .append_query_results([[created]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let site_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = FavoriteService::new(
            FavoriteRepository::new(fav_db),
            HeritageSiteRepository::new(site_db),
        );

        let result = service.toggle("user1", "site1").await.unwrap();
        assert_eq!(result, ToggleResult { favorited: true });
    }

    #[tokio::test]
    async fn test_toggle_deletes_when_present() {
        let existing = create_test_favorite("fav1", "user1", "site1");

        let fav_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let site_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = FavoriteService::new(
            FavoriteRepository::new(fav_db),
            HeritageSiteRepository::new(site_db),
        );

        let result = service.toggle("user1", "site1").await.unwrap();
        assert_eq!(result, ToggleResult { favorited: false });
    }

    #[tokio::test]
    async fn test_list_drops_dangling_targets() {
        let fav1 = create_test_favorite("fav1", "user1", "site1");
        let fav2 = create_test_favorite("fav2", "user1", "gone");

        let fav_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[fav1, fav2]])
                .into_connection(),
        );
        let site_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_site("site1")]])
                .append_query_results([Vec::<heritage_site::Model>::new()])
                .into_connection(),
        );

        let service = FavoriteService::new(
            FavoriteRepository::new(fav_db),
            HeritageSiteRepository::new(site_db),
        );

        let sites = service.list("user1").await.unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].id, "site1");
    }
}
