//! Audio guide service.

use std::sync::Arc;

use serde::Deserialize;
use virasat_common::{AppError, AppResult, IdGenerator, StorageBackend};
use virasat_db::entities::audio_summary;
use virasat_db::repositories::{AudioSummaryRepository, HeritageSiteRepository};
use sea_orm::Set;

/// Input for attaching an uploaded audio guide to a site.
#[derive(Debug, Clone, Deserialize)]
pub struct AddAudioInput {
    pub site_id: String,
    pub storage_key: String,
    pub language: String,
    pub duration: Option<f64>,
}

/// Audio service for narrated site guides.
#[derive(Clone)]
pub struct AudioService {
    audio_repo: AudioSummaryRepository,
    site_repo: HeritageSiteRepository,
    storage: Arc<dyn StorageBackend>,
    id_gen: IdGenerator,
}

impl AudioService {
    /// Create a new audio service.
    #[must_use]
    pub fn new(
        audio_repo: AudioSummaryRepository,
        site_repo: HeritageSiteRepository,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            audio_repo,
            site_repo,
            storage,
            id_gen: IdGenerator::new(),
        }
    }

    /// Attach an uploaded audio guide to a site (admin).
    ///
    /// Same storage contract as media: a key without a stored object is an
    /// error, never a partial record.
    pub async fn add(&self, input: AddAudioInput) -> AppResult<audio_summary::Model> {
        self.site_repo.get_by_id(&input.site_id).await?;

        if !self.storage.exists(&input.storage_key).await? {
            return Err(AppError::ExternalService(format!(
                "No stored object for key {}",
                input.storage_key
            )));
        }
        let url = self.storage.public_url(&input.storage_key);

        let id = self.id_gen.generate();
        let model = audio_summary::ActiveModel {
            id: Set(id),
            site_id: Set(input.site_id),
            storage_key: Set(input.storage_key),
            url: Set(url),
            duration: Set(input.duration),
            language: Set(input.language),
            play_count: Set(0),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.audio_repo.create(model).await
    }

    /// Remove an audio guide (admin).
    pub async fn remove(&self, audio_id: &str) -> AppResult<()> {
        self.audio_repo.get_by_id(audio_id).await?;
        self.audio_repo.delete(audio_id).await
    }

    /// Count one playback start. Unconditional, like site views.
    pub async fn record_play(&self, audio_id: &str) -> AppResult<()> {
        let rows = self.audio_repo.increment_play_count(audio_id).await?;
        if rows == 0 {
            return Err(AppError::NotFound(format!("audio {audio_id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use virasat_common::UploadedFile;

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

    fn create_test_audio(id: &str) -> audio_summary::Model {
        audio_summary::Model {
            id: id.to_string(),
            site_id: "site1".to_string(),
            storage_key: "present/guide.mp3".to_string(),
            url: "https://files.example.com/present/guide.mp3".to_string(),
            duration: Some(95.0),
            language: "Hindi".to_string(),
            play_count: 0,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_missing_storage_object() {
        let site_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[virasat_db::entities::heritage_site::Model {
                id: "site1".to_string(),
                name: "Hampi".to_string(),
                description: "Ruins".to_string(),
                historical_significance: "Vijayanagara capital".to_string(),
                category: virasat_db::entities::heritage_site::Category::Archaeological,
                state: "Karnataka".to_string(),
                city: "Hampi".to_string(),
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
            }]])
            .into_connection();
        let audio_db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = AudioService::new(
            AudioSummaryRepository::new(Arc::new(audio_db)),
            HeritageSiteRepository::new(Arc::new(site_db)),
            Arc::new(StubStorage),
        );

        let result = service
            .add(AddAudioInput {
                site_id: "site1".to_string(),
                storage_key: "missing/guide.mp3".to_string(),
                language: "Hindi".to_string(),
                duration: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }

    #[tokio::test]
    async fn test_record_play_missing_audio() {
        let audio_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let site_db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = AudioService::new(
            AudioSummaryRepository::new(Arc::new(audio_db)),
            HeritageSiteRepository::new(Arc::new(site_db)),
            Arc::new(StubStorage),
        );

        let result = service.record_play("nope").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_checks_existence_first() {
        let audio = create_test_audio("a1");
        let audio_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[audio]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let site_db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = AudioService::new(
            AudioSummaryRepository::new(Arc::new(audio_db)),
            HeritageSiteRepository::new(Arc::new(site_db)),
            Arc::new(StubStorage),
        );

        assert!(service.remove("a1").await.is_ok());
    }
}
