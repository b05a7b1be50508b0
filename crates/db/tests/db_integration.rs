//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `virasat_test`)
//!   `TEST_DB_PASSWORD` (default: `virasat_test`)
//!   `TEST_DB_NAME` (default: `virasat_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{Database, Set};
use virasat_db::entities::{heritage_site, media};
use virasat_db::repositories::{HeritageSiteRepository, MediaRepository};
use virasat_db::test_utils::{TestDatabase, TestDbConfig};

fn test_site_model(id: &str, name: &str) -> heritage_site::ActiveModel {
    heritage_site::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        description: Set("Integration test site".to_string()),
        historical_significance: Set("Significant".to_string()),
        category: Set(heritage_site::Category::Fort),
        state: Set("Rajasthan".to_string()),
        city: Set("Jaipur".to_string()),
        is_unesco: Set(false),
        view_count: Set(0),
        is_published: Set(true),
        created_by: Set("admin1".to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrations_and_site_roundtrip() {
    let db = TestDatabase::create_unique().await.unwrap();
    db.migrate().await.unwrap();

    let conn = Arc::new(Database::connect(&db.config.database_url()).await.unwrap());
    let sites = HeritageSiteRepository::new(Arc::clone(&conn));

    sites.create(test_site_model("site1", "Amber Fort")).await.unwrap();

    let loaded = sites.get_by_id("site1").await.unwrap();
    assert_eq!(loaded.name, "Amber Fort");

    // Atomic view counter
    sites.increment_view_count("site1").await.unwrap();
    sites.increment_view_count("site1").await.unwrap();
    sites.increment_view_count("site1").await.unwrap();
    let loaded = sites.get_by_id("site1").await.unwrap();
    assert_eq!(loaded.view_count, 3);

    drop(sites);
    drop(conn);
    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_search_matches_substring_case_insensitively() {
    let db = TestDatabase::create_unique().await.unwrap();
    db.migrate().await.unwrap();

    let conn = Arc::new(Database::connect(&db.config.database_url()).await.unwrap());
    let sites = HeritageSiteRepository::new(Arc::clone(&conn));

    sites.create(test_site_model("site1", "Taj Mahal")).await.unwrap();
    sites.create(test_site_model("site2", "Red Fort")).await.unwrap();

    let hits = sites.find_published_matching("taj").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Taj Mahal");

    // Unpublished sites never surface, whatever they contain
    let mut draft = test_site_model("site3", "Taj Gardens");
    draft.is_published = Set(false);
    sites.create(draft).await.unwrap();

    let hits = sites.find_published_matching("taj").await.unwrap();
    assert_eq!(hits.len(), 1);

    drop(sites);
    drop(conn);
    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_set_primary_is_exclusive_and_idempotent() {
    let db = TestDatabase::create_unique().await.unwrap();
    db.migrate().await.unwrap();

    let conn = Arc::new(Database::connect(&db.config.database_url()).await.unwrap());
    let sites = HeritageSiteRepository::new(Arc::clone(&conn));
    let media_repo = MediaRepository::new(Arc::clone(&conn));

    sites.create(test_site_model("site1", "Amber Fort")).await.unwrap();

    for (id, url) in [("m1", "https://example.com/1.jpg"), ("m2", "https://example.com/2.jpg")] {
        media_repo
            .create(media::ActiveModel {
                id: Set(id.to_string()),
                site_id: Set("site1".to_string()),
                media_type: Set(media::MediaType::Image),
                url: Set(url.to_string()),
                is_primary: Set(false),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    media_repo.set_primary_exclusive("site1", "m2").await.unwrap();
    media_repo.set_primary_exclusive("site1", "m2").await.unwrap();

    let rows = media_repo.find_by_site("site1").await.unwrap();
    let primaries: Vec<_> = rows.iter().filter(|m| m.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].id, "m2");

    drop(sites);
    drop(media_repo);
    drop(conn);
    db.drop_database().await.unwrap();
}
