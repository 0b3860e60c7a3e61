#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use flickpick_api::models::{
    ApiService, ApiShowDetails, ApiShowGenre, ApiStreamingOption, DiscoverPage, DiscoverQuery,
    ShowSearchPage, ShowSearchQuery, TmdbCastMember, TmdbCredits, TmdbCrewMember,
    TmdbMovieDetails, TmdbMovieSummary,
};
use flickpick_api::services::providers::{CatalogProvider, StreamingProvider, UpstreamError};
use flickpick_api::services::sampler::SamplingPolicy;
use flickpick_api::services::{DiscoverySettings, MovieDiscovery};

/// Catalog that serves the same page and details on every call
pub struct StubCatalog {
    pub page: DiscoverPage,
    pub details: TmdbMovieDetails,
    pub unavailable: bool,
    pub discover_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl StubCatalog {
    pub fn new(page: DiscoverPage, details: TmdbMovieDetails) -> Self {
        Self {
            page,
            details,
            unavailable: false,
            discover_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(DiscoverPage::default(), TmdbMovieDetails::default())
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::empty()
        }
    }

    pub fn discover_calls(&self) -> usize {
        self.discover_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StubCatalog {
    async fn discover_movies(&self, _query: &DiscoverQuery) -> Result<DiscoverPage, UpstreamError> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(UpstreamError::Status {
                status: 503,
                body: "maintenance".to_string(),
            });
        }
        Ok(self.page.clone())
    }

    async fn movie_details(
        &self,
        _movie_id: u64,
        _language: &str,
    ) -> Result<TmdbMovieDetails, UpstreamError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.details.clone())
    }
}

/// Catalog whose discovery call never completes; `abandoned` flips once the call is dropped
#[derive(Default)]
pub struct StalledCatalog {
    pub abandoned: Arc<std::sync::atomic::AtomicBool>,
}

struct SetOnDrop(Arc<std::sync::atomic::AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StalledCatalog {
    async fn discover_movies(&self, _query: &DiscoverQuery) -> Result<DiscoverPage, UpstreamError> {
        let _in_flight = SetOnDrop(self.abandoned.clone());
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(DiscoverPage::default())
    }

    async fn movie_details(
        &self,
        _movie_id: u64,
        _language: &str,
    ) -> Result<TmdbMovieDetails, UpstreamError> {
        Ok(TmdbMovieDetails::default())
    }
}

/// Streaming index answering every lookup with one fixed show and every search with a fixed list
#[derive(Default)]
pub struct StubStreaming {
    pub show: ApiShowDetails,
    pub search: Vec<ApiShowDetails>,
    pub searches: std::sync::Mutex<Vec<ShowSearchQuery>>,
}

impl StubStreaming {
    pub fn searches(&self) -> Vec<ShowSearchQuery> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl StreamingProvider for StubStreaming {
    async fn fetch_show(
        &self,
        _imdb_id: &str,
        _country: &str,
    ) -> Result<ApiShowDetails, UpstreamError> {
        Ok(self.show.clone())
    }

    async fn search_shows(&self, query: &ShowSearchQuery) -> Result<ShowSearchPage, UpstreamError> {
        self.searches.lock().unwrap().push(query.clone());
        Ok(ShowSearchPage {
            shows: self.search.clone(),
            ..ShowSearchPage::default()
        })
    }
}

pub fn settings() -> DiscoverySettings {
    DiscoverySettings {
        default_region: "us".to_string(),
        detail_language: "en-US".to_string(),
        image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
        sampling: SamplingPolicy {
            backoff_base: Duration::ZERO,
            ..SamplingPolicy::default()
        },
    }
}

pub fn discovery(catalog: Arc<StubCatalog>, streaming: StubStreaming) -> MovieDiscovery {
    MovieDiscovery::new(catalog, Arc::new(streaming), settings())
}

pub fn shared_discovery(catalog: Arc<StubCatalog>, streaming: Arc<StubStreaming>) -> MovieDiscovery {
    MovieDiscovery::new(catalog, streaming, settings())
}

pub fn summary(id: u64, title: &str, genre_ids: Vec<u32>, release_date: &str) -> TmdbMovieSummary {
    TmdbMovieSummary {
        id,
        title: title.to_string(),
        genre_ids,
        release_date: Some(release_date.to_string()),
        ..TmdbMovieSummary::default()
    }
}

pub fn page(results: Vec<TmdbMovieSummary>) -> DiscoverPage {
    DiscoverPage {
        page: 1,
        total_pages: 1,
        total_results: results.len() as u32,
        results,
    }
}

/// Detail payload of the reference scenario: runtime 100, five cast names, director D1
pub fn test_movie_details() -> TmdbMovieDetails {
    TmdbMovieDetails {
        runtime: Some(100),
        imdb_id: Some("tt001".to_string()),
        original_language: Some("en".to_string()),
        credits: TmdbCredits {
            cast: ["A1", "A2", "A3", "A4", "A5"]
                .iter()
                .map(|name| TmdbCastMember {
                    name: name.to_string(),
                })
                .collect(),
            crew: vec![TmdbCrewMember {
                name: "D1".to_string(),
                job: "Director".to_string(),
            }],
        },
        ..TmdbMovieDetails::default()
    }
}

pub fn offer(service_id: &str, kind: &str) -> ApiStreamingOption {
    ApiStreamingOption {
        service: ApiService {
            id: service_id.to_string(),
            name: service_id.to_string(),
            image_set: None,
        },
        availability_type: kind.to_string(),
        quality: None,
        link: Some(format!("https://{service_id}.example/{kind}")),
    }
}

pub fn show(region: &str, options: Vec<ApiStreamingOption>) -> ApiShowDetails {
    ApiShowDetails {
        imdb_id: Some("tt001".to_string()),
        streaming_options: HashMap::from([(region.to_string(), options)]),
        ..ApiShowDetails::default()
    }
}

/// A movie as the streaming search returns it, linked to catalog id `tmdb_id`
pub fn searched_show(
    tmdb_id: u64,
    title: &str,
    genres: &[&str],
    runtime: u32,
    options: Vec<ApiStreamingOption>,
) -> ApiShowDetails {
    ApiShowDetails {
        imdb_id: Some(format!("tt{tmdb_id:07}")),
        tmdb_id: Some(format!("movie/{tmdb_id}")),
        title: title.to_string(),
        release_year: Some(2015),
        runtime: Some(runtime),
        genres: genres
            .iter()
            .map(|name| ApiShowGenre {
                id: name.to_ascii_lowercase(),
                name: name.to_string(),
            })
            .collect(),
        streaming_options: HashMap::from([("us".to_string(), options)]),
        ..ApiShowDetails::default()
    }
}

pub fn no_streaming() -> StubStreaming {
    StubStreaming::default()
}
