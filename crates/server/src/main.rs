//! Virasat server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use virasat_api::{middleware::AppState, router as api_router};
use virasat_common::{Config, LocalStorage, StorageBackend};
use virasat_core::{
    AudioService, FavoriteService, MediaService, PhotoSearchClient, PhotoSearchConfig,
    SiteService, StoryService, TokenVerifier, UserService,
};
use virasat_db::repositories::{
    AudioSummaryRepository, FavoriteRepository, HeritageSiteRepository, MediaRepository,
    UserRepository, UserStoryRepository,
};
use virasat_queue::{run_scheduler, PhotoImportExecutor, SchedulerConfig};
use sea_orm::{ConnectOptions, Database};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "virasat=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting virasat server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let mut db_opts = ConnectOptions::new(&config.database.url);
    db_opts
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections);

    let db = Database::connect(db_opts).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    virasat_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize storage backend
    let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(
        PathBuf::from(&config.storage.base_path),
        config.storage.base_url.clone(),
    ));

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let site_repo = HeritageSiteRepository::new(Arc::clone(&db));
    let media_repo = MediaRepository::new(Arc::clone(&db));
    let audio_repo = AudioSummaryRepository::new(Arc::clone(&db));
    let favorite_repo = FavoriteRepository::new(Arc::clone(&db));
    let story_repo = UserStoryRepository::new(Arc::clone(&db));

    // Initialize services
    let token_verifier = TokenVerifier::new(
        &config.auth.token_secret,
        config.auth.issuer.as_deref(),
    );
    let user_service = UserService::new(user_repo, token_verifier);
    let site_service = SiteService::new(
        site_repo.clone(),
        media_repo.clone(),
        audio_repo.clone(),
        story_repo.clone(),
        favorite_repo.clone(),
    );
    let media_service = MediaService::new(media_repo, site_repo.clone(), storage.clone());
    let audio_service = AudioService::new(audio_repo, site_repo.clone(), storage);
    let favorite_service = FavoriteService::new(favorite_repo, site_repo.clone());
    let story_service = StoryService::new(story_repo, site_repo.clone());

    // Create app state
    let state = AppState {
        user_service,
        site_service,
        media_service: media_service.clone(),
        audio_service,
        favorite_service,
        story_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            virasat_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the weekly photo import sweep if configured
    if config.photo_import.enabled {
        info!("Starting photo import scheduler...");
        let search_client = PhotoSearchClient::new(PhotoSearchConfig {
            endpoint: config.photo_import.search_endpoint.clone(),
            access_key: config.photo_import.access_key.clone(),
            per_page: config.photo_import.photos_per_query,
        });
        let executor = Arc::new(PhotoImportExecutor::new(
            site_repo,
            media_service,
            search_client,
            config.photo_import.min_photos_per_site,
        ));

        run_scheduler(
            SchedulerConfig {
                photo_import_interval: Duration::from_secs(7 * 24 * 3600),
            },
            executor,
        )
        .await;
        info!("Photo import scheduler started");
    }

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
