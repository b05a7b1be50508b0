//! User story endpoints: submission, public reads, admin moderation.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use virasat_common::AppResult;
use virasat_core::SubmitStoryInput;
use virasat_db::entities::user_story;

use crate::{
    extractors::{AdminUser, AuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Story submission request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStoryRequest {
    pub site_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub story_type: user_story::StoryType,
}

/// Public story listing request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoriesBySiteRequest {
    pub site_id: String,
    #[serde(rename = "type")]
    pub story_type: user_story::StoryType,
}

/// Request addressing one story.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryIdRequest {
    pub story_id: String,
}

/// Story response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    pub id: String,
    pub site_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub story_type: user_story::StoryType,
    pub author_name: String,
    pub is_approved: bool,
    pub created_at: String,
}

impl From<user_story::Model> for StoryResponse {
    fn from(story: user_story::Model) -> Self {
        Self {
            id: story.id,
            site_id: story.site_id,
            content: story.content,
            story_type: story.story_type,
            author_name: story.author_name,
            is_approved: story.is_approved,
            created_at: story.created_at.to_rfc3339(),
        }
    }
}

/// Id response for submissions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryIdResponse {
    pub id: String,
}

/// Submit a story. Lands unapproved whoever the caller is.
async fn submit(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SubmitStoryRequest>,
) -> AppResult<ApiResponse<StoryIdResponse>> {
    let story = state
        .story_service
        .submit(
            &user,
            SubmitStoryInput {
                site_id: req.site_id,
                content: req.content,
                story_type: req.story_type,
            },
        )
        .await?;

    Ok(ApiResponse::ok(StoryIdResponse { id: story.id }))
}

/// Approved stories of one type for a site (public).
async fn by_site(
    State(state): State<AppState>,
    Json(req): Json<StoriesBySiteRequest>,
) -> AppResult<ApiResponse<Vec<StoryResponse>>> {
    let stories = state
        .story_service
        .list_by_site(&req.site_id, req.story_type)
        .await?;
    Ok(ApiResponse::ok(
        stories.into_iter().map(Into::into).collect(),
    ))
}

/// Every story, for the moderation queue (admin).
async fn list_all(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<StoryResponse>>> {
    let stories = state.story_service.list_all().await?;
    Ok(ApiResponse::ok(
        stories.into_iter().map(Into::into).collect(),
    ))
}

/// Approve a story (admin).
async fn approve(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<StoryIdRequest>,
) -> AppResult<ApiResponse<StoryResponse>> {
    let story = state.story_service.approve(&req.story_id).await?;
    Ok(ApiResponse::ok(story.into()))
}

/// Reject a story: a hard delete (admin).
async fn reject(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<StoryIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.story_service.reject(&req.story_id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit))
        .route("/by-site", post(by_site))
        .route("/list", post(list_all))
        .route("/approve", post(approve))
        .route("/reject", post(reject))
}
