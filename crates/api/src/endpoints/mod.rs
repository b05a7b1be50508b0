//! API endpoints.

mod audio;
mod favorites;
mod media;
mod sites;
mod stories;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/sites", sites::router())
        .nest("/media", media::router())
        .nest("/audio", audio::router())
        .nest("/favorites", favorites::router())
        .nest("/stories", stories::router())
        .nest("/admin/sites", sites::admin_router())
}
