//! Favorites endpoints.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use virasat_common::AppResult;

use crate::{
    endpoints::sites::SiteResponse,
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Request addressing one site.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub site_id: String,
}

/// Toggle response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub favorited: bool,
}

/// Toggle a favorite. Requires an authenticated caller.
async fn toggle(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> AppResult<ApiResponse<ToggleResponse>> {
    let result = state.favorite_service.toggle(&user.id, &req.site_id).await?;
    Ok(ApiResponse::ok(ToggleResponse {
        favorited: result.favorited,
    }))
}

/// Whether the caller has favorited the site; anonymous callers get false.
async fn show(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> AppResult<ApiResponse<bool>> {
    let favorited = match user {
        Some(user) => {
            state
                .favorite_service
                .is_favorited(&user.id, &req.site_id)
                .await?
        }
        None => false,
    };

    Ok(ApiResponse::ok(favorited))
}

/// The caller's favorited sites. Dangling targets are dropped, not errors.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SiteResponse>>> {
    let sites = state.favorite_service.list(&user.id).await?;
    Ok(ApiResponse::ok(sites.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(toggle))
        .route("/show", post(show))
        .route("/list", post(list))
}
