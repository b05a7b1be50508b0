//! Audio guide endpoints.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;
use virasat_common::AppResult;
use virasat_core::AddAudioInput;
use virasat_db::entities::audio_summary;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Add-audio request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddAudioRequest {
    pub site_id: String,
    #[validate(length(min = 1, max = 512))]
    pub storage_key: String,
    #[validate(length(min = 1, max = 64))]
    pub language: String,
    pub duration: Option<f64>,
}

/// Request addressing one audio guide.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioIdRequest {
    pub audio_id: String,
}

/// Audio response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioResponse {
    pub id: String,
    pub site_id: String,
    pub url: String,
    pub duration: Option<f64>,
    pub language: String,
    pub play_count: i64,
    pub created_at: String,
}

impl From<audio_summary::Model> for AudioResponse {
    fn from(a: audio_summary::Model) -> Self {
        Self {
            id: a.id,
            site_id: a.site_id,
            url: a.url,
            duration: a.duration,
            language: a.language,
            play_count: a.play_count,
            created_at: a.created_at.to_rfc3339(),
        }
    }
}

/// Attach an uploaded audio guide (admin).
async fn add(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<AddAudioRequest>,
) -> AppResult<ApiResponse<AudioResponse>> {
    req.validate()?;

    let created = state
        .audio_service
        .add(AddAudioInput {
            site_id: req.site_id,
            storage_key: req.storage_key,
            language: req.language,
            duration: req.duration,
        })
        .await?;

    Ok(ApiResponse::ok(created.into()))
}

/// Remove an audio guide (admin).
async fn remove(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<AudioIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.audio_service.remove(&req.audio_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Count a playback start (public: the player fires this).
async fn play(
    State(state): State<AppState>,
    Json(req): Json<AudioIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.audio_service.record_play(&req.audio_id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add))
        .route("/remove", post(remove))
        .route("/play", post(play))
}
