use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod genre;
pub mod streaming_service;

pub use genre::{Genre, GENRES};
pub use streaming_service::{StreamingService, STREAMING_SERVICES};

/// Discovery filters exactly as they arrive from the caller
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverParams {
    /// Comma-separated genre names or ids
    pub genre: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub min_runtime: Option<String>,
    pub max_runtime: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    /// Comma-separated streaming service ids
    pub streaming_service: Option<String>,
}

/// Validated discovery filters
///
/// Only produced by the filter validator, so every instance satisfies
/// `start_year <= end_year` and `min_runtime <= max_runtime` when both bounds are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    genres: Vec<u32>,
    start_year: Option<i32>,
    end_year: Option<i32>,
    min_runtime: Option<u32>,
    max_runtime: Option<u32>,
    language: Option<String>,
    region: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    streaming_services: Vec<&'static str>,
}

impl FilterCriteria {
    pub(crate) fn new(
        genres: Vec<u32>,
        (start_year, end_year): (Option<i32>, Option<i32>),
        (min_runtime, max_runtime): (Option<u32>, Option<u32>),
        language: Option<String>,
        region: String,
    ) -> Self {
        Self {
            genres,
            start_year,
            end_year,
            min_runtime,
            max_runtime,
            language,
            region,
            streaming_services: Vec::new(),
        }
    }

    pub(crate) fn with_streaming_services(mut self, services: Vec<&'static str>) -> Self {
        self.streaming_services = services;
        self
    }

    /// Genre codes, deduplicated, at most three
    pub fn genres(&self) -> &[u32] {
        &self.genres
    }

    pub fn start_year(&self) -> Option<i32> {
        self.start_year
    }

    pub fn end_year(&self) -> Option<i32> {
        self.end_year
    }

    pub fn min_runtime(&self) -> Option<u32> {
        self.min_runtime
    }

    pub fn max_runtime(&self) -> Option<u32> {
        self.max_runtime
    }

    /// Original-language filter; `None` means any language
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Streaming service ids the movie must be available on; empty means unrestricted
    pub fn streaming_services(&self) -> &[&'static str] {
        &self.streaming_services
    }

    /// Whether a runtime in minutes falls inside the requested bounds
    pub fn accepts_runtime(&self, runtime: u32) -> bool {
        self.min_runtime.map_or(true, |min| runtime >= min)
            && self.max_runtime.map_or(true, |max| runtime <= max)
    }
}

/// One movie from a catalog result page
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCandidate {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub genre_ids: Vec<u32>,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub original_language: Option<String>,
}

impl CatalogCandidate {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|date| date.year())
    }
}

/// A candidate completed with detail and credit data
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMovie {
    pub candidate: CatalogCandidate,
    /// Minutes; 0 when the catalog does not know
    pub runtime: u32,
    /// Top five billed cast members
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub producers: Vec<String>,
    /// Cross-reference id used by the streaming lookup
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
}

/// A single provider offering a movie, serialized in the shape the UI renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingOffer {
    pub service: OfferService,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferService {
    pub id: String,
    pub name: String,
    pub image_set: OfferImageSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferImageSet {
    pub light_theme_image: String,
    pub dark_theme_image: String,
}

impl StreamingOffer {
    pub fn provider_id(&self) -> &str {
        &self.service.id
    }
}

/// The discovery pipeline's output, shaped for the persistence and presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub movie_id: String,
    pub title: String,
    pub genres: Vec<String>,
    pub release_year: String,
    pub synopsis: String,
    pub poster: Option<String>,
    pub runtime: u32,
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub producers: Vec<String>,
    pub language: String,
    pub imdb_id: Option<String>,
    pub streaming: Vec<StreamingOffer>,
}

// ============================================================================
// Catalog (TMDB) API Types
// ============================================================================

/// Query string for GET /discover/movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoverQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_genres: Option<String>,
    #[serde(
        rename = "primary_release_date.gte",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date_gte: Option<String>,
    #[serde(
        rename = "primary_release_date.lte",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date_lte: Option<String>,
    #[serde(rename = "with_runtime.gte", skip_serializing_if = "Option::is_none")]
    pub runtime_gte: Option<u32>,
    #[serde(rename = "with_runtime.lte", skip_serializing_if = "Option::is_none")]
    pub runtime_lte: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_original_language: Option<String>,
    pub sort_by: String,
    pub include_adult: bool,
    pub page: u32,
}

/// One page of GET /discover/movie
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbMovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl From<TmdbMovieSummary> for CatalogCandidate {
    fn from(summary: TmdbMovieSummary) -> Self {
        CatalogCandidate {
            id: summary.id,
            title: summary.title,
            overview: summary.overview,
            genre_ids: summary.genre_ids,
            release_date: summary.release_date.as_deref().and_then(parse_release_date),
            poster_path: summary.poster_path.filter(|path| !path.is_empty()),
            original_language: summary.original_language,
        }
    }
}

/// Response from GET /movie/{id}?append_to_response=credits
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub credits: TmdbCredits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

fn parse_release_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

// ============================================================================
// Streaming Availability API Types
// ============================================================================

/// API response from GET /shows/{id}, also the element of a filtered search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiShowDetails {
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Catalog reference in the form `movie/{id}`
    #[serde(default)]
    pub tmdb_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<ApiShowGenre>,
    #[serde(default)]
    pub streaming_options: HashMap<String, Vec<ApiStreamingOption>>,
}

impl ApiShowDetails {
    /// Numeric catalog id, when the show links to a catalog movie
    pub fn catalog_movie_id(&self) -> Option<u64> {
        self.tmdb_id
            .as_deref()?
            .strip_prefix("movie/")?
            .parse()
            .ok()
    }

    /// Catalog genre codes for the show's genres, skipping any the catalog does not know
    pub fn genre_ids(&self) -> Vec<u32> {
        self.genres
            .iter()
            .filter_map(|genre| genre::name_to_id(&genre.name))
            .collect()
    }
}

impl From<ApiShowDetails> for CatalogCandidate {
    fn from(show: ApiShowDetails) -> Self {
        CatalogCandidate {
            id: show.catalog_movie_id().unwrap_or_default(),
            genre_ids: show.genre_ids(),
            release_date: show
                .release_year
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
            title: show.title,
            overview: show.overview,
            poster_path: None,
            original_language: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiShowGenre {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// Query string for GET /shows/search/filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSearchQuery {
    pub country: String,
    /// Comma-separated service ids
    pub catalogs: String,
    pub show_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_original_language: Option<String>,
    pub order_by: String,
}

/// One page of GET /shows/search/filters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowSearchPage {
    #[serde(default)]
    pub shows: Vec<ApiShowDetails>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStreamingOption {
    pub service: ApiService,
    #[serde(rename = "type", default)]
    pub availability_type: String,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiService {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_set: Option<ApiImageSet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiImageSet {
    #[serde(default)]
    pub light_theme_image: Option<String>,
    #[serde(default)]
    pub dark_theme_image: Option<String>,
}

impl From<ApiStreamingOption> for StreamingOffer {
    fn from(option: ApiStreamingOption) -> Self {
        let (light, dark) = option
            .service
            .image_set
            .map(|set| {
                (
                    set.light_theme_image.unwrap_or_default(),
                    set.dark_theme_image.unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        StreamingOffer {
            service: OfferService {
                id: option.service.id,
                name: option.service.name,
                image_set: OfferImageSet {
                    light_theme_image: light,
                    dark_theme_image: dark,
                },
            },
            link: option.link.unwrap_or_default(),
        }
    }
}
