use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogCandidate, EnrichedMovie, TmdbCredits, TmdbMovieDetails},
    services::providers::{CatalogProvider, UpstreamError},
};

/// Number of billed cast members kept per movie
pub const CAST_LIMIT: usize = 5;

const DIRECTOR_JOB: &str = "Director";
const PRODUCER_JOB: &str = "Producer";

/// Completes a sampled candidate with runtime, credits and its IMDB ID
pub struct DetailEnricher {
    catalog: Arc<dyn CatalogProvider>,
    language: String,
}

impl DetailEnricher {
    pub fn new(catalog: Arc<dyn CatalogProvider>, language: String) -> Self {
        Self { catalog, language }
    }

    /// Fetches details for the candidate's id in a single request
    ///
    /// The candidate may have been removed upstream since it was sampled, which surfaces as
    /// [`AppError::NotFound`]. Nothing is retried here.
    pub async fn enrich(&self, candidate: CatalogCandidate) -> AppResult<EnrichedMovie> {
        let details = self
            .catalog
            .movie_details(candidate.id, &self.language)
            .await
            .map_err(|e| match e {
                UpstreamError::NotFound => {
                    AppError::NotFound(format!("catalog movie {}", candidate.id))
                }
                other => AppError::UpstreamUnavailable(format!(
                    "details for movie {}: {other}",
                    candidate.id
                )),
            })?;

        tracing::debug!(
            movie_id = candidate.id,
            runtime = ?details.runtime,
            imdb_id = ?details.imdb_id,
            "Movie details fetched"
        );

        Ok(merge_details(candidate, details))
    }
}

fn merge_details(mut candidate: CatalogCandidate, details: TmdbMovieDetails) -> EnrichedMovie {
    if candidate.genre_ids.is_empty() {
        candidate.genre_ids = details.genres.iter().map(|g| g.id).collect();
    }
    if candidate.poster_path.is_none() {
        candidate.poster_path = details.poster_path.filter(|path| !path.is_empty());
    }

    let original_language = details
        .original_language
        .filter(|lang| !lang.is_empty())
        .or_else(|| candidate.original_language.clone());

    EnrichedMovie {
        runtime: details.runtime.unwrap_or(0),
        cast: top_billed(&details.credits),
        directors: crew_with_job(&details.credits, DIRECTOR_JOB),
        producers: crew_with_job(&details.credits, PRODUCER_JOB),
        imdb_id: details.imdb_id.filter(|id| !id.is_empty()),
        original_language,
        candidate,
    }
}

/// First billed cast members, in the order the catalog lists them
fn top_billed(credits: &TmdbCredits) -> Vec<String> {
    credits
        .cast
        .iter()
        .take(CAST_LIMIT)
        .map(|member| member.name.clone())
        .collect()
}

fn crew_with_job(credits: &TmdbCredits, job: &str) -> Vec<String> {
    credits
        .crew
        .iter()
        .filter(|member| member.job == job)
        .map(|member| member.name.clone())
        .collect()
}
