use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{future::Future, sync::Arc};
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        genre, CatalogCandidate, DiscoverParams, EnrichedMovie, FilterCriteria, MovieRecord,
        StreamingOffer,
    },
    services::{
        enricher::DetailEnricher,
        providers::{
            CatalogProvider, StreamingAvailabilityProvider, StreamingProvider, TmdbProvider,
        },
        sampler::{CatalogSampler, SamplingPolicy},
        streaming::{take_region_offers, StreamingResolver},
        validation::{validate_filters, validate_streaming_filters},
    },
};

/// Tunables for the discovery pipeline
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    pub default_region: String,
    pub detail_language: String,
    pub image_base_url: String,
    pub sampling: SamplingPolicy,
}

impl From<&Config> for DiscoverySettings {
    fn from(config: &Config) -> Self {
        Self {
            default_region: config.default_region.clone(),
            detail_language: config.detail_language.clone(),
            image_base_url: config.tmdb_image_base_url.clone(),
            sampling: SamplingPolicy::from(config),
        }
    }
}

/// Picks a random movie matching the caller's filters and assembles everything known about it
///
/// Stages run strictly in sequence: validate, sample the catalog, pick one candidate,
/// enrich it, resolve streaming offers. Only the sampling stage retries. Streaming is
/// best-effort: any failure there yields an empty offer list.
///
/// When the filters name streaming services the catalog is not sampled. The streaming
/// index is searched for movies on those services instead, and the picked show's own
/// offers are attached. That search is essential, so its failures are not swallowed.
pub struct MovieDiscovery {
    sampler: CatalogSampler,
    enricher: DetailEnricher,
    resolver: StreamingResolver,
    default_region: String,
    image_base_url: String,
}

impl MovieDiscovery {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        streaming: Arc<dyn StreamingProvider>,
        settings: DiscoverySettings,
    ) -> Self {
        Self {
            sampler: CatalogSampler::new(catalog.clone(), settings.sampling),
            enricher: DetailEnricher::new(catalog, settings.detail_language),
            resolver: StreamingResolver::new(streaming),
            default_region: settings.default_region,
            image_base_url: settings.image_base_url,
        }
    }

    /// Wires the reqwest-backed providers from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = TmdbProvider::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.http_timeout(),
        )?;
        let streaming = StreamingAvailabilityProvider::new(
            config.streaming_api_key.clone(),
            config.streaming_api_url.clone(),
            config.http_timeout(),
        )?;

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(streaming),
            DiscoverySettings::from(config),
        ))
    }

    /// Discovers a movie using a freshly seeded random source
    pub async fn discover(
        &self,
        raw: &DiscoverParams,
        cancel: &CancellationToken,
    ) -> AppResult<MovieRecord> {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        self.discover_with_rng(raw, &mut rng, cancel).await
    }

    /// Discovers a movie on at least one of the requested streaming services
    pub async fn discover_streaming(
        &self,
        raw: &DiscoverParams,
        cancel: &CancellationToken,
    ) -> AppResult<MovieRecord> {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        self.discover_streaming_with_rng(raw, &mut rng, cancel).await
    }

    /// Discovers a movie drawing every random choice from `rng`
    ///
    /// Identical upstream responses and an identically seeded `rng` give identical records.
    pub async fn discover_with_rng<R>(
        &self,
        raw: &DiscoverParams,
        rng: &mut R,
        cancel: &CancellationToken,
    ) -> AppResult<MovieRecord>
    where
        R: Rng + Send,
    {
        let criteria = validate_filters(raw, &self.default_region)?;
        self.run(criteria, rng, cancel).await
    }

    pub async fn discover_streaming_with_rng<R>(
        &self,
        raw: &DiscoverParams,
        rng: &mut R,
        cancel: &CancellationToken,
    ) -> AppResult<MovieRecord>
    where
        R: Rng + Send,
    {
        let criteria = validate_streaming_filters(raw, &self.default_region)?;
        self.run(criteria, rng, cancel).await
    }

    async fn run<R>(
        &self,
        criteria: FilterCriteria,
        rng: &mut R,
        cancel: &CancellationToken,
    ) -> AppResult<MovieRecord>
    where
        R: Rng + Send,
    {
        tracing::info!(criteria = ?criteria, "Discovering random movie");

        if criteria.streaming_services().is_empty() {
            self.from_catalog(criteria, rng, cancel).await
        } else {
            self.from_streaming_services(criteria, rng, cancel).await
        }
    }

    async fn from_catalog<R>(
        &self,
        criteria: FilterCriteria,
        rng: &mut R,
        cancel: &CancellationToken,
    ) -> AppResult<MovieRecord>
    where
        R: Rng + Send,
    {
        let mut candidates = until_cancelled(cancel, self.sampler.sample(&criteria, rng)).await??;

        let picked = candidates.swap_remove(rng.random_range(0..candidates.len()));
        tracing::info!(movie_id = picked.id, title = %picked.title, "Candidate picked");

        let movie = until_cancelled(cancel, self.enricher.enrich(picked)).await??;

        let streaming = match movie.imdb_id.as_deref() {
            Some(imdb_id) => {
                match until_cancelled(cancel, self.resolver.resolve(imdb_id, criteria.region()))
                    .await?
                {
                    Ok(offers) => offers,
                    Err(e) => {
                        tracing::warn!(
                            imdb_id = %imdb_id,
                            error = %e,
                            "Streaming lookup failed, continuing without offers"
                        );
                        Vec::new()
                    }
                }
            }
            None => {
                tracing::debug!(movie_id = movie.candidate.id, "No IMDB ID, skipping streaming lookup");
                Vec::new()
            }
        };

        Ok(self.assemble(movie, streaming))
    }

    async fn from_streaming_services<R>(
        &self,
        criteria: FilterCriteria,
        rng: &mut R,
        cancel: &CancellationToken,
    ) -> AppResult<MovieRecord>
    where
        R: Rng + Send,
    {
        let mut shows = until_cancelled(cancel, self.resolver.search(&criteria))
            .await?
            .map_err(|e| {
                tracing::warn!(error = %e, "Streaming catalog search failed");
                AppError::UpstreamUnavailable(format!("streaming search: {e}"))
            })?;

        if shows.is_empty() {
            tracing::info!(criteria = ?criteria, "No streaming matches");
            return Err(AppError::NoResults(criteria));
        }

        let mut show = shows.swap_remove(rng.random_range(0..shows.len()));
        let streaming = take_region_offers(&mut show, criteria.region());
        let picked = CatalogCandidate::from(show);
        tracing::info!(
            movie_id = picked.id,
            title = %picked.title,
            offers = streaming.len(),
            "Streaming candidate picked"
        );

        let movie = until_cancelled(cancel, self.enricher.enrich(picked)).await??;

        Ok(self.assemble(movie, streaming))
    }

    fn assemble(&self, movie: EnrichedMovie, streaming: Vec<StreamingOffer>) -> MovieRecord {
        let EnrichedMovie {
            candidate,
            runtime,
            cast,
            directors,
            producers,
            imdb_id,
            original_language,
        } = movie;

        MovieRecord {
            movie_id: candidate.id.to_string(),
            genres: candidate
                .genre_ids
                .iter()
                .map(|id| genre::id_to_name(*id).to_string())
                .collect(),
            release_year: candidate
                .release_year()
                .map(|year| year.to_string())
                .unwrap_or_default(),
            poster: candidate
                .poster_path
                .as_deref()
                .map(|path| self.poster_url(path)),
            title: candidate.title,
            synopsis: candidate.overview,
            runtime,
            cast,
            directors,
            producers,
            language: original_language.unwrap_or_default(),
            imdb_id,
            streaming,
        }
    }

    fn poster_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Runs a stage unless the caller gives up first, in which case the stage is dropped mid-flight
async fn until_cancelled<F: Future>(cancel: &CancellationToken, stage: F) -> AppResult<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        output = stage => Ok(output),
    }
}
