use std::{collections::HashSet, sync::Arc};

use crate::{
    models::{ApiShowDetails, ApiStreamingOption, FilterCriteria, ShowSearchQuery, StreamingOffer},
    services::providers::{StreamingProvider, UpstreamError},
};

const SHOW_TYPE_MOVIE: &str = "movie";
const SEARCH_ORDER: &str = "popularity_1year";

/// Looks up where a movie can be streamed, one offer per provider
pub struct StreamingResolver {
    provider: Arc<dyn StreamingProvider>,
}

impl StreamingResolver {
    pub fn new(provider: Arc<dyn StreamingProvider>) -> Self {
        Self { provider }
    }

    /// Offers for the title in one region
    ///
    /// A title or region the index knows nothing about is an empty list, not an error.
    /// Transport and parse failures are returned for the caller to decide on.
    pub async fn resolve(
        &self,
        imdb_id: &str,
        region: &str,
    ) -> Result<Vec<StreamingOffer>, UpstreamError> {
        let mut details = match self.provider.fetch_show(imdb_id, region).await {
            Ok(details) => details,
            Err(UpstreamError::NotFound) => {
                tracing::debug!(imdb_id = %imdb_id, "Title unknown to streaming index");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let offers = take_region_offers(&mut details, region);

        tracing::debug!(
            imdb_id = %imdb_id,
            region = %region,
            offers = offers.len(),
            "Streaming offers resolved"
        );

        Ok(offers)
    }

    /// Movies on any of the criteria's services that satisfy every other filter
    ///
    /// Years, language and services are filtered by the index. Genres and runtime are
    /// checked here, and shows without a catalog movie id are dropped since they cannot
    /// be enriched.
    pub async fn search(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<ApiShowDetails>, UpstreamError> {
        let page = self.provider.search_shows(&build_search_query(criteria)).await?;
        let returned = page.shows.len();

        let shows: Vec<ApiShowDetails> = page
            .shows
            .into_iter()
            .filter(|show| matches_filters(show, criteria))
            .collect();

        tracing::debug!(
            services = ?criteria.streaming_services(),
            returned,
            kept = shows.len(),
            "Streaming catalogs searched"
        );

        Ok(shows)
    }
}

/// Builds the index search for the criteria's services, years and language
pub fn build_search_query(criteria: &FilterCriteria) -> ShowSearchQuery {
    ShowSearchQuery {
        country: criteria.region().to_string(),
        catalogs: criteria.streaming_services().join(","),
        show_type: SHOW_TYPE_MOVIE.to_string(),
        year_min: criteria.start_year(),
        year_max: criteria.end_year(),
        show_original_language: criteria.language().map(str::to_string),
        order_by: SEARCH_ORDER.to_string(),
    }
}

fn matches_filters(show: &ApiShowDetails, criteria: &FilterCriteria) -> bool {
    if show.catalog_movie_id().is_none() {
        return false;
    }

    let genre_ids = show.genre_ids();
    let genres_match = criteria.genres().iter().all(|id| genre_ids.contains(id));

    let runtime_match = match show.runtime {
        Some(runtime) => criteria.accepts_runtime(runtime),
        None => criteria.min_runtime().is_none() && criteria.max_runtime().is_none(),
    };

    genres_match && runtime_match
}

/// Removes and deduplicates the show's offers for one region
pub(crate) fn take_region_offers(show: &mut ApiShowDetails, region: &str) -> Vec<StreamingOffer> {
    let options = show.streaming_options.remove(region).unwrap_or_default();
    dedupe_by_provider(options)
}

/// Keeps the first option seen for each provider, in upstream order
///
/// Providers commonly list several tiers (rent and buy, HD and 4K) for one title;
/// only the first listed survives.
pub fn dedupe_by_provider(options: Vec<ApiStreamingOption>) -> Vec<StreamingOffer> {
    let mut seen = HashSet::new();
    options
        .into_iter()
        .filter(|option| seen.insert(option.service.id.clone()))
        .map(StreamingOffer::from)
        .collect()
}
