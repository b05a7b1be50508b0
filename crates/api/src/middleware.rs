//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use virasat_core::{
    AudioService, FavoriteService, MediaService, SiteService, StoryService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub site_service: SiteService,
    pub media_service: MediaService,
    pub audio_service: AudioService,
    pub favorite_service: FavoriteService,
    pub story_service: StoryService,
}

/// Authentication middleware.
///
/// Resolves the bearer token into a user row once per request and stashes it
/// in the request extensions; extractors read it from there. Handlers never
/// consult ambient session state.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // An invalid token degrades to an anonymous request; gated
        // endpoints reject via their extractors.
        match state.user_service.authenticate_token(token).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Token did not resolve to a user");
            }
        }
    }

    next.run(req).await
}
