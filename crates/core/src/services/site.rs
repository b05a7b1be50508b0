//! Catalog service: listing, search, detail retrieval, and admin CRUD for
//! heritage sites.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use virasat_common::{AppError, AppResult, IdGenerator};
use virasat_db::entities::{audio_summary, heritage_site, media};
use virasat_db::repositories::{
    AudioSummaryRepository, FavoriteRepository, HeritageSiteRepository, MediaRepository,
    UserStoryRepository,
};
use sea_orm::{ActiveValue::NotSet, Set};

/// Minimum number of characters (after trimming) for a free-text search.
const MIN_SEARCH_TERM_LEN: usize = 3;

/// Filter criteria for the public catalog listing.
///
/// The literal `"all"` is a sentinel meaning "no filter", matching what the
/// category/state dropdowns submit.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListFilter {
    pub category: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub unesco_only: bool,
}

/// A published site enriched with its full media list.
#[derive(Debug, Clone, Serialize)]
pub struct SiteWithMedia {
    pub site: heritage_site::Model,
    pub media: Vec<media::Model>,
}

/// A site with everything the detail page renders.
#[derive(Debug, Clone, Serialize)]
pub struct SiteDetail {
    pub site: heritage_site::Model,
    pub media: Vec<media::Model>,
    pub audio: Vec<audio_summary::Model>,
}

/// Input for creating a site.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSiteInput {
    pub name: String,
    pub description: String,
    pub historical_significance: String,
    pub category: heritage_site::Category,
    pub state: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_unesco: bool,
    pub time_period: Option<String>,
    pub visitor_guidelines: Option<String>,
    pub is_published: bool,
    pub folk_tales: Option<String>,
    pub cultural_heritage: Option<String>,
    pub cuisine: Option<String>,
    pub stories: Option<String>,
    pub community: Option<String>,
    pub ticket_price: Option<String>,
    pub opening_hours: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub timezone: Option<String>,
    pub view360_url: Option<String>,
    pub view3d_url: Option<String>,
}

/// Partial update for a site; absent fields are left unchanged.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateSiteInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub historical_significance: Option<String>,
    pub category: Option<heritage_site::Category>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_unesco: Option<bool>,
    pub time_period: Option<String>,
    pub visitor_guidelines: Option<String>,
    pub is_published: Option<bool>,
    pub folk_tales: Option<String>,
    pub cultural_heritage: Option<String>,
    pub cuisine: Option<String>,
    pub stories: Option<String>,
    pub community: Option<String>,
    pub ticket_price: Option<String>,
    pub opening_hours: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub timezone: Option<String>,
    pub view360_url: Option<String>,
    pub view3d_url: Option<String>,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_sites: u64,
    pub published_sites: u64,
    pub unesco_sites: u64,
    pub total_views: i64,
    pub total_audio_plays: i64,
}

/// Catalog service for heritage sites.
#[derive(Clone)]
pub struct SiteService {
    site_repo: HeritageSiteRepository,
    media_repo: MediaRepository,
    audio_repo: AudioSummaryRepository,
    story_repo: UserStoryRepository,
    favorite_repo: FavoriteRepository,
    id_gen: IdGenerator,
}

impl SiteService {
    /// Create a new site service.
    #[must_use]
    pub const fn new(
        site_repo: HeritageSiteRepository,
        media_repo: MediaRepository,
        audio_repo: AudioSummaryRepository,
        story_repo: UserStoryRepository,
        favorite_repo: FavoriteRepository,
    ) -> Self {
        Self {
            site_repo,
            media_repo,
            audio_repo,
            story_repo,
            favorite_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Published sites matching the filter, most viewed first, each with its
    /// full media list.
    pub async fn list_published(&self, filter: ListFilter) -> AppResult<Vec<SiteWithMedia>> {
        let category = match filter.category.as_deref() {
            None | Some("all") => None,
            Some(raw) => Some(parse_category(raw)?),
        };
        let state = filter.state.filter(|s| s != "all");

        let sites = self
            .site_repo
            .find_published(category, state.as_deref(), filter.unesco_only)
            .await?;

        self.attach_media(sites).await
    }

    /// Free-text search over published sites.
    ///
    /// A separate query path from [`Self::list_published`]: the term is
    /// matched against name, state, city, and description, and the
    /// category/state/UNESCO filters do not apply.
    pub async fn search(&self, term: &str) -> AppResult<Vec<SiteWithMedia>> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_TERM_LEN {
            return Err(AppError::Validation(format!(
                "Search term must be at least {MIN_SEARCH_TERM_LEN} characters"
            )));
        }

        let sites = self.site_repo.find_published_matching(term).await?;
        self.attach_media(sites).await
    }

    /// One site with media and audio attached, or `None` when absent.
    ///
    /// The publish flag is deliberately not checked here: a direct link
    /// doubles as the admin preview of an unpublished record.
    pub async fn get_detail(&self, id: &str) -> AppResult<Option<SiteDetail>> {
        let Some(site) = self.site_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let media = self.media_repo.find_by_site(id).await?;
        let audio = self.audio_repo.find_by_site(id).await?;

        Ok(Some(SiteDetail { site, media, audio }))
    }

    /// Count one detail-page visit. Unconditional; callers dedup nothing.
    pub async fn record_view(&self, id: &str) -> AppResult<()> {
        let rows = self.site_repo.increment_view_count(id).await?;
        if rows == 0 {
            return Err(AppError::SiteNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Create a site (admin).
    pub async fn create(
        &self,
        created_by: &str,
        input: CreateSiteInput,
    ) -> AppResult<heritage_site::Model> {
        let id = self.id_gen.generate();
        let model = heritage_site::ActiveModel {
            id: Set(id),
            name: Set(input.name),
            description: Set(input.description),
            historical_significance: Set(input.historical_significance),
            category: Set(input.category),
            state: Set(input.state),
            city: Set(input.city),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            is_unesco: Set(input.is_unesco),
            time_period: Set(input.time_period),
            visitor_guidelines: Set(input.visitor_guidelines),
            view_count: Set(0),
            is_published: Set(input.is_published),
            created_by: Set(created_by.to_string()),
            folk_tales: Set(input.folk_tales),
            cultural_heritage: Set(input.cultural_heritage),
            cuisine: Set(input.cuisine),
            stories: Set(input.stories),
            community: Set(input.community),
            ticket_price: Set(input.ticket_price),
            opening_hours: Set(input.opening_hours),
            best_time_to_visit: Set(input.best_time_to_visit),
            timezone: Set(input.timezone),
            view360_url: Set(input.view360_url),
            view3d_url: Set(input.view3d_url),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: NotSet,
        };

        self.site_repo.create(model).await
    }

    /// Apply a partial update to a site (admin).
    pub async fn update(
        &self,
        id: &str,
        input: UpdateSiteInput,
    ) -> AppResult<heritage_site::Model> {
        let existing = self.site_repo.get_by_id(id).await?;
        let mut model: heritage_site::ActiveModel = existing.into();

        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        if let Some(historical_significance) = input.historical_significance {
            model.historical_significance = Set(historical_significance);
        }
        if let Some(category) = input.category {
            model.category = Set(category);
        }
        if let Some(state) = input.state {
            model.state = Set(state);
        }
        if let Some(city) = input.city {
            model.city = Set(city);
        }
        if let Some(latitude) = input.latitude {
            model.latitude = Set(Some(latitude));
        }
        if let Some(longitude) = input.longitude {
            model.longitude = Set(Some(longitude));
        }
        if let Some(is_unesco) = input.is_unesco {
            model.is_unesco = Set(is_unesco);
        }
        if let Some(time_period) = input.time_period {
            model.time_period = Set(Some(time_period));
        }
        if let Some(visitor_guidelines) = input.visitor_guidelines {
            model.visitor_guidelines = Set(Some(visitor_guidelines));
        }
        if let Some(is_published) = input.is_published {
            model.is_published = Set(is_published);
        }
        if let Some(folk_tales) = input.folk_tales {
            model.folk_tales = Set(Some(folk_tales));
        }
        if let Some(cultural_heritage) = input.cultural_heritage {
            model.cultural_heritage = Set(Some(cultural_heritage));
        }
        if let Some(cuisine) = input.cuisine {
            model.cuisine = Set(Some(cuisine));
        }
        if let Some(stories) = input.stories {
            model.stories = Set(Some(stories));
        }
        if let Some(community) = input.community {
            model.community = Set(Some(community));
        }
        if let Some(ticket_price) = input.ticket_price {
            model.ticket_price = Set(Some(ticket_price));
        }
        if let Some(opening_hours) = input.opening_hours {
            model.opening_hours = Set(Some(opening_hours));
        }
        if let Some(best_time_to_visit) = input.best_time_to_visit {
            model.best_time_to_visit = Set(Some(best_time_to_visit));
        }
        if let Some(timezone) = input.timezone {
            model.timezone = Set(Some(timezone));
        }
        if let Some(view360_url) = input.view360_url {
            model.view360_url = Set(Some(view360_url));
        }
        if let Some(view3d_url) = input.view3d_url {
            model.view3d_url = Set(Some(view3d_url));
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.site_repo.update(model).await
    }

    /// Delete a site and everything attached to it (admin).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        // Surface SiteNotFound before touching child rows
        self.site_repo.get_by_id(id).await?;

        let media_removed = self.media_repo.delete_by_site(id).await?;
        let audio_removed = self.audio_repo.delete_by_site(id).await?;
        let stories_removed = self.story_repo.delete_by_site(id).await?;
        let favorites_removed = self.favorite_repo.delete_by_site(id).await?;

        self.site_repo.delete(id).await?;

        tracing::info!(
            site_id = %id,
            media_removed,
            audio_removed,
            stories_removed,
            favorites_removed,
            "Deleted site and attached records"
        );

        Ok(())
    }

    /// All sites including unpublished (admin).
    pub async fn list_all(&self) -> AppResult<Vec<heritage_site::Model>> {
        self.site_repo.find_all().await
    }

    /// Aggregate counts for the admin dashboard.
    pub async fn stats(&self) -> AppResult<CatalogStats> {
        let sites = self.site_repo.find_all().await?;
        let audio = self.audio_repo.find_all().await?;

        Ok(CatalogStats {
            total_sites: sites.len() as u64,
            published_sites: sites.iter().filter(|s| s.is_published).count() as u64,
            unesco_sites: sites.iter().filter(|s| s.is_unesco).count() as u64,
            total_views: sites.iter().map(|s| s.view_count).sum(),
            total_audio_plays: audio.iter().map(|a| a.play_count).sum(),
        })
    }

    /// Attach each site's media list with one batched query.
    async fn attach_media(
        &self,
        sites: Vec<heritage_site::Model>,
    ) -> AppResult<Vec<SiteWithMedia>> {
        let ids: Vec<String> = sites.iter().map(|s| s.id.clone()).collect();
        let media = self.media_repo.find_by_sites(&ids).await?;

        let mut by_site: HashMap<String, Vec<media::Model>> = HashMap::new();
        for m in media {
            by_site.entry(m.site_id.clone()).or_default().push(m);
        }

        Ok(sites
            .into_iter()
            .map(|site| {
                let media = by_site.remove(&site.id).unwrap_or_default();
                SiteWithMedia { site, media }
            })
            .collect())
    }
}

fn parse_category(raw: &str) -> AppResult<heritage_site::Category> {
    use sea_orm::ActiveEnum;
    heritage_site::Category::try_from_value(&raw.to_string())
        .map_err(|_| AppError::Validation(format!("Unknown category: {raw}")))
}
