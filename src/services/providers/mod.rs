/// Outbound data providers
///
/// The discovery pipeline talks to two third-party services: a movie catalog (search by
/// filters, details by id) and a streaming availability index (offers by IMDB ID, movies
/// by service catalog). Each is
/// a trait here so the pipeline can be driven by test doubles, with a reqwest-backed
/// implementation per service.
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::models::{
    ApiShowDetails, DiscoverPage, DiscoverQuery, ShowSearchPage, ShowSearchQuery, TmdbMovieDetails,
};

pub mod streaming_availability;
pub mod tmdb;

pub use streaming_availability::StreamingAvailabilityProvider;
pub use tmdb::TmdbProvider;

/// Failure talking to a third-party API
#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Resource not found")]
    NotFound,

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Whether repeating the same call could plausibly succeed
    ///
    /// Timeouts, connection failures, rate limiting and server errors are transient.
    /// Other client errors (bad key, bad query) and unparseable bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Network(e) => !e.is_decode() && !e.is_builder(),
            UpstreamError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            UpstreamError::NotFound | UpstreamError::Decode(_) => false,
        }
    }
}

/// Movie catalog: filtered discovery and per-movie details
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch one page of movies matching the query
    async fn discover_movies(&self, query: &DiscoverQuery) -> Result<DiscoverPage, UpstreamError>;

    /// Fetch full metadata with embedded credits for one movie
    async fn movie_details(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<TmdbMovieDetails, UpstreamError>;
}

/// Streaming availability index keyed by IMDB ID
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StreamingProvider: Send + Sync {
    /// Fetch every streaming option recorded for the title in the given country
    async fn fetch_show(&self, imdb_id: &str, country: &str)
        -> Result<ApiShowDetails, UpstreamError>;

    /// Search movies available on any of the query's service catalogs
    async fn search_shows(&self, query: &ShowSearchQuery) -> Result<ShowSearchPage, UpstreamError>;
}

/// Checks the status and decodes a JSON body
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, UpstreamError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(UpstreamError::NotFound);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::debug!(error = %e, response = %text, "Unparseable upstream response");
        UpstreamError::Decode(e.to_string())
    })
}
