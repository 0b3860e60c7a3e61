use chrono::NaiveDate;
use rand::Rng;
use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{CatalogCandidate, DiscoverQuery, FilterCriteria},
    services::providers::{CatalogProvider, UpstreamError},
};

/// Popularity-first ordering biases the random pages toward well-known titles
const SORT_BY: &str = "popularity.desc";

/// Bounds on how hard the sampler searches for a non-empty page
#[derive(Debug, Clone)]
pub struct SamplingPolicy {
    pub max_attempts: u32,
    /// Highest page the catalog serves; first draws are uniform over `1..=page_ceiling`
    pub page_ceiling: u32,
    /// Wait after the first failed call, doubled for each further failure
    pub backoff_base: Duration,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            page_ceiling: 500,
            backoff_base: Duration::from_millis(250),
        }
    }
}

impl From<&Config> for SamplingPolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.sample_max_attempts.max(1),
            page_ceiling: config.sample_page_ceiling.max(1),
            backoff_base: config.sample_backoff(),
        }
    }
}

/// What ended the previous attempt
enum Miss {
    EmptyPage,
    Upstream(UpstreamError),
}

/// Draws random result pages from the catalog until one has movies in it
pub struct CatalogSampler {
    catalog: Arc<dyn CatalogProvider>,
    policy: SamplingPolicy,
}

impl CatalogSampler {
    pub fn new(catalog: Arc<dyn CatalogProvider>, policy: SamplingPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Returns the movies of the first non-empty random page
    ///
    /// Each attempt requests a freshly drawn page. An empty page narrows later draws to the
    /// page count the catalog reported. Retryable upstream failures back off before the next
    /// attempt; anything else stops the search at once. When the budget runs out the last
    /// attempt decides the error: an empty page is [`AppError::NoResults`], a failed call is
    /// [`AppError::UpstreamUnavailable`].
    pub async fn sample<R>(
        &self,
        criteria: &FilterCriteria,
        rng: &mut R,
    ) -> AppResult<Vec<CatalogCandidate>>
    where
        R: Rng + Send,
    {
        let mut query = build_query(criteria);
        let mut page_bound = self.policy.page_ceiling.max(1);
        let mut last_miss = Miss::EmptyPage;

        for attempt in 1..=self.policy.max_attempts {
            query.page = rng.random_range(1..=page_bound);

            match self.catalog.discover_movies(&query).await {
                Ok(page) if !page.results.is_empty() => {
                    tracing::info!(
                        attempt,
                        page = query.page,
                        results = page.results.len(),
                        "Catalog sample found candidates"
                    );
                    return Ok(page.results.into_iter().map(CatalogCandidate::from).collect());
                }
                Ok(page) => {
                    tracing::warn!(
                        attempt,
                        page = query.page,
                        total_pages = page.total_pages,
                        "Catalog page was empty"
                    );
                    if page.total_pages > 0 {
                        page_bound = page.total_pages.min(self.policy.page_ceiling).max(1);
                    }
                    last_miss = Miss::EmptyPage;
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!(attempt, page = query.page, error = %e, "Catalog query failed");
                    last_miss = Miss::Upstream(e);
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.backoff(attempt)).await;
                    }
                }
                Err(e) => {
                    tracing::error!(attempt, error = %e, "Catalog query failed permanently");
                    return Err(AppError::UpstreamUnavailable(format!("catalog: {e}")));
                }
            }
        }

        match last_miss {
            Miss::EmptyPage => Err(AppError::NoResults(criteria.clone())),
            Miss::Upstream(e) => Err(AppError::UpstreamUnavailable(format!(
                "catalog failed after {} attempts: {e}",
                self.policy.max_attempts
            ))),
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.policy
            .backoff_base
            .saturating_mul(1u32 << (attempt - 1).min(16))
    }
}

/// Translates criteria into catalog query parameters; the page is filled in per attempt
pub fn build_query(criteria: &FilterCriteria) -> DiscoverQuery {
    let with_genres = (!criteria.genres().is_empty()).then(|| {
        criteria
            .genres()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    });

    DiscoverQuery {
        with_genres,
        release_date_gte: criteria.start_year().and_then(|y| format_date(y, 1, 1)),
        release_date_lte: criteria.end_year().and_then(|y| format_date(y, 12, 31)),
        runtime_gte: criteria.min_runtime(),
        runtime_lte: criteria.max_runtime(),
        with_original_language: criteria.language().map(str::to_string),
        sort_by: SORT_BY.to_string(),
        include_adult: false,
        page: 1,
    }
}

fn format_date(year: i32, month: u32, day: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format("%Y-%m-%d").to_string())
}
