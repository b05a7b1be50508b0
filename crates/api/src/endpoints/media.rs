//! Media endpoints (admin: upload attachment, removal, primary flag, import).

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;
use virasat_common::AppResult;
use virasat_core::AddMediaInput;
use virasat_db::entities::media;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Add-media request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMediaRequest {
    pub site_id: String,
    pub media_type: media::MediaType,
    #[validate(length(min = 1, max = 512))]
    pub storage_key: String,
    #[validate(length(max = 512))]
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Request addressing one media row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaIdRequest {
    pub media_id: String,
}

/// Set-primary request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPrimaryRequest {
    pub site_id: String,
    pub media_id: String,
}

/// Bulk photo import request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPhotosRequest {
    pub site_id: String,
    pub urls: Vec<String>,
}

/// Media response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
    pub id: String,
    pub site_id: String,
    pub media_type: media::MediaType,
    pub storage_key: Option<String>,
    pub url: String,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub created_at: String,
}

impl From<media::Model> for MediaResponse {
    fn from(m: media::Model) -> Self {
        Self {
            id: m.id,
            site_id: m.site_id,
            media_type: m.media_type,
            storage_key: m.storage_key,
            url: m.url,
            caption: m.caption,
            is_primary: m.is_primary,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

/// Import outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPhotosResponse {
    pub added: u64,
}

/// Attach an uploaded file to a site.
async fn add(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<AddMediaRequest>,
) -> AppResult<ApiResponse<MediaResponse>> {
    req.validate()?;

    let created = state
        .media_service
        .add(AddMediaInput {
            site_id: req.site_id,
            media_type: req.media_type,
            storage_key: req.storage_key,
            caption: req.caption,
            is_primary: req.is_primary,
        })
        .await?;

    Ok(ApiResponse::ok(created.into()))
}

/// Remove a media row.
async fn remove(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<MediaIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.media_service.remove(&req.media_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Flag one media row as the site's primary.
async fn set_primary(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<SetPrimaryRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .media_service
        .set_primary(&req.site_id, &req.media_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Deduplicated import of externally sourced photo URLs.
async fn import(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<ImportPhotosRequest>,
) -> AppResult<ApiResponse<ImportPhotosResponse>> {
    let added = state
        .media_service
        .import_photos(&req.site_id, &req.urls)
        .await?;
    Ok(ApiResponse::ok(ImportPhotosResponse { added }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add))
        .route("/remove", post(remove))
        .route("/set-primary", post(set_primary))
        .route("/import", post(import))
}
