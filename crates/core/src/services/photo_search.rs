//! Image search client, the third-party photo collaborator boundary.
//!
//! Talks to an Unsplash-style search API: one query per site, a handful of
//! landscape candidates back, and a best-effort download-tracking ping per
//! picked photo as the provider's guidelines ask.

use serde::Deserialize;
use virasat_common::{AppError, AppResult};

/// Configuration for the image search collaborator.
#[derive(Debug, Clone)]
pub struct PhotoSearchConfig {
    /// Search API endpoint.
    pub endpoint: String,
    /// API access key.
    pub access_key: Option<String>,
    /// Candidates requested per query.
    pub per_page: u8,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: Option<ResultUrls>,
    links: Option<ResultLinks>,
}

#[derive(Debug, Deserialize)]
struct ResultUrls {
    regular: Option<String>,
    full: Option<String>,
    small: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResultLinks {
    download_location: Option<String>,
}

impl ResultUrls {
    fn pick(self) -> Option<String> {
        self.regular.or(self.full).or(self.small)
    }
}

/// Build the site-specific search query.
fn build_query(name: &str, state: &str) -> String {
    format!("{name} {state} India heritage architecture")
        .trim()
        .to_string()
}

/// Client for the image search collaborator.
#[derive(Clone)]
pub struct PhotoSearchClient {
    config: PhotoSearchConfig,
    http: reqwest::Client,
}

impl PhotoSearchClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: PhotoSearchConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Search candidate photo URLs for a site.
    pub async fn search_photos(&self, name: &str, state: &str) -> AppResult<Vec<String>> {
        let Some(access_key) = self.config.access_key.as_deref() else {
            return Err(AppError::Config(
                "Photo search access key is not configured".to_string(),
            ));
        };

        let query = build_query(name, state);
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("query", query.as_str()),
                ("per_page", &self.config.per_page.to_string()),
                ("orientation", "landscape"),
                ("content_filter", "high"),
                ("client_id", access_key),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Photo search request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Photo search returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Photo search response invalid: {e}")))?;

        let mut urls = Vec::new();
        for result in body.results {
            if let Some(url) = result.urls.and_then(ResultUrls::pick) {
                urls.push(url);
            }

            // Track the download event per provider guidelines (best effort)
            if let Some(download_location) =
                result.links.and_then(|links| links.download_location)
            {
                let ping = self
                    .http
                    .get(&download_location)
                    .query(&[("client_id", access_key)])
                    .send()
                    .await;
                if let Err(e) = ping {
                    tracing::debug!(error = %e, "Download tracking ping failed");
                }
            }
        }

        Ok(urls)
    }
}
