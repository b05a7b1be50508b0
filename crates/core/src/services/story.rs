//! User story service: submission and the moderation approval gate.

use serde::Deserialize;
use virasat_common::{AppError, AppResult, IdGenerator};
use virasat_db::entities::user_story::{self, StoryType};
use virasat_db::entities::user;
use virasat_db::repositories::{HeritageSiteRepository, UserStoryRepository};
use sea_orm::Set;

/// Minimum story length in characters, after trimming.
///
/// The submission form enforces this too, but a direct API call must not be
/// able to bypass it.
const MIN_CONTENT_LEN: usize = 10;

/// Input for submitting a story.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitStoryInput {
    pub site_id: String,
    pub content: String,
    pub story_type: StoryType,
}

/// Story service for user-submitted stories.
#[derive(Clone)]
pub struct StoryService {
    story_repo: UserStoryRepository,
    site_repo: HeritageSiteRepository,
    id_gen: IdGenerator,
}

impl StoryService {
    /// Create a new story service.
    #[must_use]
    pub const fn new(story_repo: UserStoryRepository, site_repo: HeritageSiteRepository) -> Self {
        Self {
            story_repo,
            site_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a story. Always lands unapproved, whoever submits it.
    pub async fn submit(
        &self,
        author: &user::Model,
        input: SubmitStoryInput,
    ) -> AppResult<user_story::Model> {
        let content = input.content.trim();
        if content.chars().count() < MIN_CONTENT_LEN {
            return Err(AppError::Validation(format!(
                "Story content must be at least {MIN_CONTENT_LEN} characters"
            )));
        }

        self.site_repo.get_by_id(&input.site_id).await?;

        let id = self.id_gen.generate();
        let model = user_story::ActiveModel {
            id: Set(id),
            site_id: Set(input.site_id),
            user_id: Set(author.id.clone()),
            content: Set(content.to_string()),
            story_type: Set(input.story_type),
            author_name: Set(author
                .name
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string())),
            is_approved: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.story_repo.create(model).await
    }

    /// Approved stories of one type for a site (public read).
    ///
    /// The (site, approved) index narrows the read; the type filter runs on
    /// the retrieved rows.
    pub async fn list_by_site(
        &self,
        site_id: &str,
        story_type: StoryType,
    ) -> AppResult<Vec<user_story::Model>> {
        let stories = self.story_repo.find_approved_by_site(site_id).await?;
        Ok(stories
            .into_iter()
            .filter(|s| s.story_type == story_type)
            .collect())
    }

    /// Every story, approved or not (admin moderation queue).
    pub async fn list_all(&self) -> AppResult<Vec<user_story::Model>> {
        self.story_repo.find_all().await
    }

    /// Approve a story (admin).
    pub async fn approve(&self, story_id: &str) -> AppResult<user_story::Model> {
        self.story_repo.set_approved(story_id).await
    }

    /// Reject a story (admin). A hard delete; nothing is retained.
    pub async fn reject(&self, story_id: &str) -> AppResult<()> {
        self.story_repo.get_by_id(story_id).await?;
        self.story_repo.delete(story_id).await
    }
}
