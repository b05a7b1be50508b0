//! Media service: uploads, primary-image policy, and bulk photo import.

use std::sync::Arc;

use serde::Deserialize;
use virasat_common::{AppError, AppResult, IdGenerator, StorageBackend};
use virasat_db::entities::media::{self, MediaType};
use virasat_db::repositories::{HeritageSiteRepository, MediaRepository};
use sea_orm::Set;

/// Input for attaching an uploaded file to a site.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMediaInput {
    pub site_id: String,
    pub media_type: MediaType,
    pub storage_key: String,
    pub caption: Option<String>,
    pub is_primary: bool,
}

/// The one canonical primary-image rule, applied by every surface.
///
/// Over the site's image rows: an uploaded image flagged primary wins, then
/// the first uploaded image, then any image flagged primary, then the first
/// image of any source.
#[must_use]
pub fn primary_image(media: &[media::Model]) -> Option<&media::Model> {
    let images: Vec<&media::Model> = media
        .iter()
        .filter(|m| m.media_type == MediaType::Image)
        .collect();

    images
        .iter()
        .find(|m| m.is_uploaded() && m.is_primary)
        .or_else(|| images.iter().find(|m| m.is_uploaded()))
        .or_else(|| images.iter().find(|m| m.is_primary))
        .or_else(|| images.first())
        .copied()
}

/// Media service for site media management.
#[derive(Clone)]
pub struct MediaService {
    media_repo: MediaRepository,
    site_repo: HeritageSiteRepository,
    storage: Arc<dyn StorageBackend>,
    id_gen: IdGenerator,
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub fn new(
        media_repo: MediaRepository,
        site_repo: HeritageSiteRepository,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            media_repo,
            site_repo,
            storage,
            id_gen: IdGenerator::new(),
        }
    }

    /// Attach an uploaded file to a site (admin).
    ///
    /// The storage object must exist; a key that resolves to nothing is an
    /// error, never a partial record.
    pub async fn add(&self, input: AddMediaInput) -> AppResult<media::Model> {
        self.site_repo.get_by_id(&input.site_id).await?;

        if !self.storage.exists(&input.storage_key).await? {
            return Err(AppError::ExternalService(format!(
                "No stored object for key {}",
                input.storage_key
            )));
        }
        let url = self.storage.public_url(&input.storage_key);

        let id = self.id_gen.generate();
        let model = media::ActiveModel {
            id: Set(id),
            site_id: Set(input.site_id),
            media_type: Set(input.media_type),
            storage_key: Set(Some(input.storage_key)),
            url: Set(url),
            caption: Set(input.caption),
            is_primary: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        let mut created = self.media_repo.create(model).await?;

        // Rows are inserted unflagged; the conditional update below flips the
        // flag site-wide in one statement, so no sibling stays primary.
        if input.is_primary {
            self.media_repo
                .set_primary_exclusive(&created.site_id, &created.id)
                .await?;
            created.is_primary = true;
        }

        Ok(created)
    }

    /// Remove a media row (admin).
    pub async fn remove(&self, media_id: &str) -> AppResult<()> {
        self.media_repo.get_by_id(media_id).await?;
        self.media_repo.delete(media_id).await
    }

    /// Make one of a site's media rows the primary (admin). Idempotent.
    pub async fn set_primary(&self, site_id: &str, media_id: &str) -> AppResult<()> {
        let media = self.media_repo.get_by_id(media_id).await?;
        if media.site_id != site_id {
            return Err(AppError::NotFound(format!(
                "media {media_id} does not belong to site {site_id}"
            )));
        }

        self.media_repo.set_primary_exclusive(site_id, media_id).await?;
        Ok(())
    }

    /// Insert externally sourced candidate photos, skipping URLs the site
    /// already has. Returns the number of rows inserted.
    pub async fn import_photos(&self, site_id: &str, urls: &[String]) -> AppResult<u64> {
        let site = self.site_repo.get_by_id(site_id).await?;

        let mut added = 0;
        for url in urls {
            if self.media_repo.exists_by_site_and_url(site_id, url).await? {
                continue;
            }

            let id = self.id_gen.generate();
            self.media_repo
                .create(media::ActiveModel {
                    id: Set(id),
                    site_id: Set(site_id.to_string()),
                    media_type: Set(MediaType::Image),
                    storage_key: Set(None),
                    url: Set(url.clone()),
                    caption: Set(Some(format!("{} - Auto-added photo", site.name))),
                    is_primary: Set(false),
                    created_at: Set(chrono::Utc::now().into()),
                })
                .await?;
            added += 1;
        }

        if added > 0 {
            tracing::info!(site_id = %site_id, added, "Imported candidate photos");
        }

        Ok(added)
    }

    /// Number of image rows a site currently has.
    pub async fn image_count(&self, site_id: &str) -> AppResult<u64> {
        self.media_repo.count_images_by_site(site_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use virasat_common::UploadedFile;
    use virasat_db::entities::heritage_site;

    /// Storage stub: every key under `present/` exists.
    struct StubStorage;

    #[async_trait::async_trait]
    impl StorageBackend for StubStorage {
        async fn upload(
            &self,
            key: &str,
            data: &[u8],
            content_type: &str,
        ) -> AppResult<UploadedFile> {
            Ok(UploadedFile {
                key: key.to_string(),
                url: self.public_url(key),
                size: data.len() as u64,
                content_type: content_type.to_string(),
                md5: String::new(),
            })
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://files.example.com/{key}")
        }

        async fn exists(&self, key: &str) -> AppResult<bool> {
            Ok(key.starts_with("present/"))
        }
    }

    fn create_test_site(id: &str, name: &str) -> heritage_site::Model {
        heritage_site::Model {
            id: id.to_string(),
            name: name.to_string(),
            description: "A test site".to_string(),
            historical_significance: "Significant".to_string(),
            category: heritage_site::Category::Temple,
            state: "Odisha".to_string(),
            city: "Konark".to_string(),
            latitude: None,
            longitude: None,
            is_unesco: true,
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

    fn test_media(id: &str, uploaded: bool, primary: bool, media_type: MediaType) -> media::Model {
        media::Model {
            id: id.to_string(),
            site_id: "site1".to_string(),
            media_type,
            storage_key: uploaded.then(|| format!("present/{id}.jpg")),
            url: format!("https://example.com/{id}.jpg"),
            caption: None,
            is_primary: primary,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_primary_image_prefers_uploaded_primary() {
        let rows = vec![
            test_media("m1", false, true, MediaType::Image),
            test_media("m2", true, false, MediaType::Image),
            test_media("m3", true, true, MediaType::Image),
        ];
        assert_eq!(primary_image(&rows).map(|m| m.id.as_str()), Some("m3"));
    }

    #[test]
    fn test_primary_image_falls_back_to_first_uploaded() {
        let rows = vec![
            test_media("m1", false, false, MediaType::Image),
            test_media("m2", true, false, MediaType::Image),
        ];
        assert_eq!(primary_image(&rows).map(|m| m.id.as_str()), Some("m2"));
    }

    #[test]
    fn test_primary_image_falls_back_to_flagged_then_first() {
        let flagged = vec![
            test_media("m1", false, false, MediaType::Image),
            test_media("m2", false, true, MediaType::Image),
        ];
        assert_eq!(primary_image(&flagged).map(|m| m.id.as_str()), Some("m2"));

        let unflagged = vec![
            test_media("m1", false, false, MediaType::Image),
            test_media("m2", false, false, MediaType::Image),
        ];
        assert_eq!(primary_image(&unflagged).map(|m| m.id.as_str()), Some("m1"));
    }

    #[test]
    fn test_primary_image_ignores_non_images() {
        let rows = vec![
            test_media("m1", true, true, MediaType::Panorama),
            test_media("m2", false, false, MediaType::Video),
        ];
        assert!(primary_image(&rows).is_none());
    }

    #[tokio::test]
    async fn test_add_rejects_missing_storage_object() {
        let site = create_test_site("site1", "Konark Sun Temple");

        let site_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[site]])
            .into_connection();
        let media_db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = MediaService::new(
            MediaRepository::new(Arc::new(media_db)),
            HeritageSiteRepository::new(Arc::new(site_db)),
            Arc::new(StubStorage),
        );

        let result = service
            .add(AddMediaInput {
                site_id: "site1".to_string(),
                media_type: MediaType::Image,
                storage_key: "missing/key.jpg".to_string(),
                caption: None,
                is_primary: false,
            })
            .await;

        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }

    #[tokio::test]
    async fn test_set_primary_rejects_wrong_site() {
        let mut foreign = test_media("m1", true, false, MediaType::Image);
        foreign.site_id = "other".to_string();

        let media_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[foreign]])
            .into_connection();
        let site_db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = MediaService::new(
            MediaRepository::new(Arc::new(media_db)),
            HeritageSiteRepository::new(Arc::new(site_db)),
            Arc::new(StubStorage),
        );

        let result = service.set_primary("site1", "m1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_import_photos_dedups_existing_urls() {
        let site = create_test_site("site1", "Konark Sun Temple");

        let site_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[site]])
            .into_connection();

        // u1 already present; u2 absent then inserted
        let inserted = test_media("m9", false, false, MediaType::Image);
        let media_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_media("m1", false, false, MediaType::Image)]])
            .append_query_results([Vec::<media::Model>::new()])
            .append_query_results([[inserted]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = MediaService::new(
            MediaRepository::new(Arc::new(media_db)),
            HeritageSiteRepository::new(Arc::new(site_db)),
            Arc::new(StubStorage),
        );

        let added = service
            .import_photos(
                "site1",
                &[
                    "https://example.com/u1.jpg".to_string(),
                    "https://example.com/u2.jpg".to_string(),
                ],
            )
            .await
            .unwrap();

        assert_eq!(added, 1);
    }

    #[tokio::test]
    async fn test_import_photos_two_batches_insert_each_url_once() {
        let site = create_test_site("site1", "Konark Sun Temple");

        let site_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[site.clone()]])
            .append_query_results([[site]])
            .into_connection();

        let row = |id: &str| test_media(id, false, false, MediaType::Image);
        let exec_ok = MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        };
        // Batch one: u1 and u2 both absent, both inserted.
        // Batch two: u1 present and skipped, u3 inserted.
        let media_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<media::Model>::new()])
            .append_query_results([[row("m1")]])
            .append_query_results([Vec::<media::Model>::new()])
            .append_query_results([[row("m2")]])
            .append_query_results([[row("m1")]])
            .append_query_results([Vec::<media::Model>::new()])
            .append_query_results([[row("m3")]])
            .append_exec_results([exec_ok.clone(), exec_ok.clone(), exec_ok])
            .into_connection();

        let service = MediaService::new(
            MediaRepository::new(Arc::new(media_db)),
            HeritageSiteRepository::new(Arc::new(site_db)),
            Arc::new(StubStorage),
        );

        let u1 = "https://example.com/u1.jpg".to_string();
        let u2 = "https://example.com/u2.jpg".to_string();
        let u3 = "https://example.com/u3.jpg".to_string();

        let first = service
            .import_photos("site1", &[u1.clone(), u2])
            .await
            .unwrap();
        let second = service.import_photos("site1", &[u1, u3]).await.unwrap();

        assert_eq!(first, 2);
        assert_eq!(second, 1);
    }
}
