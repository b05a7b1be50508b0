//! Heritage site endpoints: public catalog plus admin CRUD.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;
use virasat_common::AppResult;
use virasat_core::{
    primary_image, CatalogStats, CreateSiteInput, ListFilter, SiteDetail, SiteWithMedia,
    UpdateSiteInput,
};
use virasat_db::entities::{audio_summary, heritage_site, media};

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::ApiResponse,
};

/// Catalog listing request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSitesRequest {
    pub category: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub unesco_only: bool,
}

/// Free-text search request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSitesRequest {
    pub search_term: String,
}

/// Request addressing one site.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteIdRequest {
    pub site_id: String,
}

/// Site response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponse {
    pub id: String,
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
    pub view_count: i64,
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
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<heritage_site::Model> for SiteResponse {
    fn from(site: heritage_site::Model) -> Self {
        Self {
            id: site.id,
            name: site.name,
            description: site.description,
            historical_significance: site.historical_significance,
            category: site.category,
            state: site.state,
            city: site.city,
            latitude: site.latitude,
            longitude: site.longitude,
            is_unesco: site.is_unesco,
            time_period: site.time_period,
            visitor_guidelines: site.visitor_guidelines,
            view_count: site.view_count,
            is_published: site.is_published,
            folk_tales: site.folk_tales,
            cultural_heritage: site.cultural_heritage,
            cuisine: site.cuisine,
            stories: site.stories,
            community: site.community,
            ticket_price: site.ticket_price,
            opening_hours: site.opening_hours,
            best_time_to_visit: site.best_time_to_visit,
            timezone: site.timezone,
            view360_url: site.view360_url,
            view3d_url: site.view3d_url,
            created_at: site.created_at.to_rfc3339(),
            updated_at: site.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Media row as rendered inside site responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMediaResponse {
    pub id: String,
    pub site_id: String,
    pub media_type: media::MediaType,
    pub url: String,
    pub caption: Option<String>,
    pub is_primary: bool,
}

impl From<media::Model> for SiteMediaResponse {
    fn from(m: media::Model) -> Self {
        Self {
            id: m.id,
            site_id: m.site_id,
            media_type: m.media_type,
            url: m.url,
            caption: m.caption,
            is_primary: m.is_primary,
        }
    }
}

/// Audio row as rendered inside the detail response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAudioResponse {
    pub id: String,
    pub site_id: String,
    pub url: String,
    pub duration: Option<f64>,
    pub language: String,
    pub play_count: i64,
}

impl From<audio_summary::Model> for SiteAudioResponse {
    fn from(a: audio_summary::Model) -> Self {
        Self {
            id: a.id,
            site_id: a.site_id,
            url: a.url,
            duration: a.duration,
            language: a.language,
            play_count: a.play_count,
        }
    }
}

/// A catalog entry: the site, its media, and the resolved card image.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteWithMediaResponse {
    #[serde(flatten)]
    pub site: SiteResponse,
    pub media: Vec<SiteMediaResponse>,
    pub primary_image_url: Option<String>,
}

impl From<SiteWithMedia> for SiteWithMediaResponse {
    fn from(entry: SiteWithMedia) -> Self {
        let primary_image_url = primary_image(&entry.media).map(|m| m.url.clone());
        Self {
            site: entry.site.into(),
            media: entry.media.into_iter().map(Into::into).collect(),
            primary_image_url,
        }
    }
}

/// The detail-page payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDetailResponse {
    #[serde(flatten)]
    pub site: SiteResponse,
    pub media: Vec<SiteMediaResponse>,
    pub audio: Vec<SiteAudioResponse>,
    pub primary_image_url: Option<String>,
}

impl From<SiteDetail> for SiteDetailResponse {
    fn from(detail: SiteDetail) -> Self {
        let primary_image_url = primary_image(&detail.media).map(|m| m.url.clone());
        Self {
            site: detail.site.into(),
            media: detail.media.into_iter().map(Into::into).collect(),
            audio: detail.audio.into_iter().map(Into::into).collect(),
            primary_image_url,
        }
    }
}

/// Create request (admin).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub historical_significance: String,
    pub category: heritage_site::Category,
    #[validate(length(min = 1, max = 128))]
    pub state: String,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_unesco: bool,
    pub time_period: Option<String>,
    pub visitor_guidelines: Option<String>,
    #[serde(default)]
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

impl From<CreateSiteRequest> for CreateSiteInput {
    fn from(req: CreateSiteRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            historical_significance: req.historical_significance,
            category: req.category,
            state: req.state,
            city: req.city,
            latitude: req.latitude,
            longitude: req.longitude,
            is_unesco: req.is_unesco,
            time_period: req.time_period,
            visitor_guidelines: req.visitor_guidelines,
            is_published: req.is_published,
            folk_tales: req.folk_tales,
            cultural_heritage: req.cultural_heritage,
            cuisine: req.cuisine,
            stories: req.stories,
            community: req.community,
            ticket_price: req.ticket_price,
            opening_hours: req.opening_hours,
            best_time_to_visit: req.best_time_to_visit,
            timezone: req.timezone,
            view360_url: req.view360_url,
            view3d_url: req.view3d_url,
        }
    }
}

/// Partial update request (admin).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteRequest {
    pub site_id: String,
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub historical_significance: Option<String>,
    pub category: Option<heritage_site::Category>,
    #[validate(length(min = 1, max = 128))]
    pub state: Option<String>,
    #[validate(length(min = 1, max = 128))]
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

/// Id response for create calls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteIdResponse {
    pub id: String,
}

/// Public catalog listing.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListSitesRequest>,
) -> AppResult<ApiResponse<Vec<SiteWithMediaResponse>>> {
    let sites = state
        .site_service
        .list_published(ListFilter {
            category: req.category,
            state: req.state,
            unesco_only: req.unesco_only,
        })
        .await?;

    Ok(ApiResponse::ok(sites.into_iter().map(Into::into).collect()))
}

/// Free-text search over published sites.
async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchSitesRequest>,
) -> AppResult<ApiResponse<Vec<SiteWithMediaResponse>>> {
    let sites = state.site_service.search(&req.search_term).await?;
    Ok(ApiResponse::ok(sites.into_iter().map(Into::into).collect()))
}

/// Site detail. Absence is `data: null`, not an error.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<SiteIdRequest>,
) -> AppResult<ApiResponse<Option<SiteDetailResponse>>> {
    let detail = state.site_service.get_detail(&req.site_id).await?;
    Ok(ApiResponse::ok(detail.map(Into::into)))
}

/// Count a detail-page visit.
async fn view(
    State(state): State<AppState>,
    Json(req): Json<SiteIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.site_service.record_view(&req.site_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Create a site (admin).
async fn create(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateSiteRequest>,
) -> AppResult<ApiResponse<SiteIdResponse>> {
    req.validate()?;

    let site = state.site_service.create(&admin.id, req.into()).await?;
    Ok(ApiResponse::ok(SiteIdResponse { id: site.id }))
}

/// Partially update a site (admin).
async fn update(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateSiteRequest>,
) -> AppResult<ApiResponse<SiteResponse>> {
    req.validate()?;

    let input = UpdateSiteInput {
        name: req.name,
        description: req.description,
        historical_significance: req.historical_significance,
        category: req.category,
        state: req.state,
        city: req.city,
        latitude: req.latitude,
        longitude: req.longitude,
        is_unesco: req.is_unesco,
        time_period: req.time_period,
        visitor_guidelines: req.visitor_guidelines,
        is_published: req.is_published,
        folk_tales: req.folk_tales,
        cultural_heritage: req.cultural_heritage,
        cuisine: req.cuisine,
        stories: req.stories,
        community: req.community,
        ticket_price: req.ticket_price,
        opening_hours: req.opening_hours,
        best_time_to_visit: req.best_time_to_visit,
        timezone: req.timezone,
        view360_url: req.view360_url,
        view3d_url: req.view3d_url,
    };

    let site = state.site_service.update(&req.site_id, input).await?;
    Ok(ApiResponse::ok(site.into()))
}

/// Delete a site and its media/audio/stories/favorites (admin).
async fn delete(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<SiteIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.site_service.delete(&req.site_id).await?;
    Ok(ApiResponse::ok(()))
}

/// All sites including unpublished (admin).
async fn list_all(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SiteResponse>>> {
    let sites = state.site_service.list_all().await?;
    Ok(ApiResponse::ok(sites.into_iter().map(Into::into).collect()))
}

/// Dashboard statistics (admin).
async fn stats(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<CatalogStats>> {
    let stats = state.site_service.stats().await?;
    Ok(ApiResponse::ok(stats))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/search", post(search))
        .route("/show", post(show))
        .route("/view", post(view))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/delete", post(delete))
        .route("/list", post(list_all))
        .route("/stats", post(stats))
}
